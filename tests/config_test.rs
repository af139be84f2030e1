use retell_preflight::config::{Config, ConfigError, DEFAULT_BASE_URL};
use std::env;
use std::io::Write;

#[test]
fn test_config_with_api_key() {
    env::set_var("OPENAI_API_KEY", "test_key_12345");
    let config = Config::from_env();
    assert!(config.has_api_key());
    assert_eq!(config.openai_api_key, Some("test_key_12345".to_string()));
    env::remove_var("OPENAI_API_KEY");
}

#[test]
fn test_config_defaults() {
    let config = Config::from_source(&std::collections::HashMap::<String, String>::new());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.model, "gpt-4-turbo-preview");
    assert_eq!(config.prompt, "Hello, are you working?");
    assert_eq!(config.max_tokens, 50);
}

#[test]
fn test_load_dotenv_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "PREFLIGHT_DOTENV_FRESH=from-file").unwrap();
    writeln!(file, "PREFLIGHT_DOTENV_EXISTING=from-file").unwrap();

    env::set_var("PREFLIGHT_DOTENV_EXISTING", "from-process");
    let loaded = Config::load_dotenv(Some(file.path())).unwrap();

    assert_eq!(loaded.as_deref(), Some(file.path()));
    assert_eq!(env::var("PREFLIGHT_DOTENV_FRESH").unwrap(), "from-file");
    assert_eq!(env::var("PREFLIGHT_DOTENV_EXISTING").unwrap(), "from-process");

    env::remove_var("PREFLIGHT_DOTENV_FRESH");
    env::remove_var("PREFLIGHT_DOTENV_EXISTING");
}

#[test]
fn test_load_dotenv_missing_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.env");

    let err = Config::load_dotenv(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::Dotenv { .. }));
    assert!(err.to_string().contains("absent.env"));
}

#[test]
fn test_malformed_implicit_dotenv_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "PREFLIGHT_DOTENV_BEFORE_BAD_LINE=abc\nTHIS IS NOT VALID\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let loaded = Config::load_dotenv(None);
    env::set_current_dir(original).unwrap();

    assert!(loaded.unwrap().is_none());
    env::remove_var("PREFLIGHT_DOTENV_BEFORE_BAD_LINE");
}

#[test]
fn test_malformed_explicit_dotenv_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "THIS IS NOT VALID").unwrap();

    let err = Config::load_dotenv(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Dotenv { .. }));
}

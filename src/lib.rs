pub mod checks;
pub mod config;
pub mod llm;
pub mod runner;
pub mod runtime;

pub use config::Config;
pub use runner::{RunReport, Runner};
pub use runtime::Runtime;

use checks::{ConnectivityCheck, EnvironmentCheck};
use config::{EnvSource, ProcessEnv};
use llm::{ChatClient, OpenAiClient};
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] runtime::RuntimeError),

    #[error("Client error: {0}")]
    Client(#[from] llm::RemoteCallError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PreflightError>;

/// The standard pipeline: environment first, then the chat-completion probe.
pub fn default_runner(
    source: Arc<dyn EnvSource>,
    config: Config,
    client: Arc<dyn ChatClient>,
) -> Runner {
    let mut runner = Runner::new();
    runner.register(Box::new(EnvironmentCheck::new(source)));
    runner.register(Box::new(ConnectivityCheck::new(config, client)));
    runner
}

/// Runs the standard pipeline against the process environment and the real
/// OpenAI client, blocking the calling thread until the report is printed.
pub fn run_blocking(config: Config, out: &mut dyn Write) -> Result<RunReport> {
    let runtime = Runtime::new()?;
    let client = Arc::new(OpenAiClient::new(config.base_url.clone())?);
    let runner = default_runner(Arc::new(ProcessEnv), config, client);
    runtime.block_on(runner.run(out))
}

use anyhow::Result;
use clap::Parser;
use retell_preflight::{config::Config, run_blocking};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "retell-preflight")]
#[command(about = "Check environment and OpenAI connectivity for a Retell custom LLM backend", long_about = None)]
struct Args {
    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,

    #[arg(short, long, help = "Model used for the connectivity probe")]
    model: Option<String>,

    #[arg(long, help = "Load variables from this file instead of ./.env")]
    env_file: Option<PathBuf>,

    #[arg(long, help = "Do not load any .env file", conflicts_with = "env_file")]
    no_dotenv: bool,

    #[arg(long, help = "Exit with status 0 even when a check fails")]
    exit_zero: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::from_default_env()
            .add_directive("retell_preflight=debug".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::from_default_env()
            .add_directive("retell_preflight=info".parse()?)
            .add_directive("warn".parse()?)
    };

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!("Starting retell-preflight v{}", env!("CARGO_PKG_VERSION"));

    if !args.no_dotenv {
        Config::load_dotenv(args.env_file.as_deref())?;
    }

    let mut config = Config::from_env();
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    debug!("Resolved config: {:?}", config);

    let mut stdout = io::stdout().lock();
    let report = run_blocking(config, &mut stdout)?;

    if report.all_passed() || args.exit_zero {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

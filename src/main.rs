use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod outputs;
pub mod synth;
pub mod writer;

/// Generate the Amplify auth configuration from CFN stack Outputs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the YAML file listing the stacks to sync
    #[arg(short, long, value_name = "FILE", default_value = "./config.yaml")]
    config: PathBuf,
}

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),

    #[error(transparent)]
    Outputs(#[from] outputs::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Writer(#[from] writer::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    return match run(&cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    };
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let config = config::parse(&cli.config)?;

    for config_entry in config {
        let stack = outputs::Stack::new(&config_entry).await?;
        let resolved = stack.resolve_outputs().await?;

        let document = synth::synthesize(stack.region(), &resolved, config_entry.schema);
        let contents = document.to_json()?;

        // The document is fully serialized before the write; a failure
        // anywhere above leaves the previous artifact untouched.
        writer::write(&config_entry.artifact.location, &contents)?;

        tracing::info!(
            stack = %stack.stack_name,
            region = %stack.region(),
            artifact = %config_entry.artifact.location.display(),
            "wrote amplify configuration"
        );
    }

    return Ok(());
}

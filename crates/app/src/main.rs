//! apitesto - declarative API test configuration checker
//!
//! Loads a YAML test document, resolves groups and reports every
//! validation problem at once.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use apitesto_application::{ConfigLoader, LoadError};
use apitesto_domain::Config;
use apitesto_infrastructure::{FileConfigSource, config_to_json};

#[derive(Parser)]
#[command(name = "apitesto", about = "Validate and resolve API test definitions")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a test document and summarize its contents
    Check {
        /// Path to the YAML document
        file: PathBuf,
    },

    /// Print the fully resolved configuration as JSON
    Resolve {
        /// Path to the YAML document
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check(file),
        Commands::Resolve { file } => resolve(file),
    }
}

fn load(file: PathBuf) -> Result<Config, LoadError> {
    ConfigLoader::new().load(&FileConfigSource::new(file))
}

fn check(file: PathBuf) -> ExitCode {
    match load(file) {
        Ok(config) => {
            tracing::info!(tests = config.test_count(), "configuration is valid");
            println!(
                "ok: {} base URL(s), {} functional test(s), {} load test(s)",
                config.base_urls.len(),
                config.functional_tests.len(),
                config.load_tests.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn resolve(file: PathBuf) -> ExitCode {
    let config = match load(file) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    match config_to_json(&config) {
        Ok(json) => {
            print!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn report(error: &LoadError) -> ExitCode {
    tracing::debug!(error = %error, "configuration rejected");
    eprintln!("error: {error}");
    ExitCode::FAILURE
}

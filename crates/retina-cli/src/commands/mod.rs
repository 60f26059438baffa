//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use retina_client::PredictionClient;
use retina_core::config::{API_URL_ENV, DEFAULT_API_URL};
use retina_core::{ClientConfig, PredictionService};
use std::path::PathBuf;
use std::sync::Arc;

pub mod analyze;
pub mod classes;
pub mod health;
pub mod serve;

/// Retina - diabetic retinopathy screening client
#[derive(Parser)]
#[command(name = "retina")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the prediction API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the prediction service is up and has a model loaded
    Health,

    /// List the severity classes the service grades into
    Classes(classes::ClassesArgs),

    /// Grade one or more retinal images
    Analyze(analyze::AnalyzeArgs),

    /// Start the browser front-end
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = ClientConfig::with_url(&self.api_url)?;
        let service: Arc<dyn PredictionService> = Arc::new(PredictionClient::new(config.clone()));

        match self.command {
            Commands::Health => health::execute(service, config.base_url()).await,
            Commands::Classes(args) => classes::execute(args, service).await,
            Commands::Analyze(args) => analyze::execute(args, service).await,
            Commands::Serve(args) => serve::execute(args, service, &config).await,
        }
    }
}

//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use retina_core::pipeline::health_notification;
use retina_core::{ClientConfig, PredictionService};
use std::sync::Arc;

use crate::output;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "RETINA_WEB_PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "RETINA_WEB_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn execute(
    args: ServeArgs,
    service: Arc<dyn PredictionService>,
    config: &ClientConfig,
) -> Result<()> {
    println!();
    println!("  {} {}", "Retina".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}  http://{}:{}",
        "Dashboard".green(),
        args.host,
        args.port
    );
    println!(
        "  {}        http://{}:{}/api",
        "API".green(),
        args.host,
        args.port
    );
    println!("  {}  {}", "Predictor".green(), config.base_url());
    println!();

    if let Some(note) = health_notification(&service.health().await) {
        output::print_notification(&note);
        println!();
    }

    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    retina_web::run_server(service, &args.host, args.port).await?;

    Ok(())
}

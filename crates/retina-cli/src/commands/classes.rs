//! Severity class catalog command.

use anyhow::{bail, Result};
use clap::Args;
use retina_core::PredictionService;
use std::sync::Arc;

use crate::output;

#[derive(Args)]
pub struct ClassesArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ClassesArgs, service: Arc<dyn PredictionService>) -> Result<()> {
    let catalog = match service.classes().await {
        Ok(catalog) => catalog,
        Err(e) => {
            output::print_notification(&e.notification());
            bail!("Could not load the severity class catalog");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        output::print_catalog(&catalog);
    }

    Ok(())
}

//! Prediction service health command.

use anyhow::{bail, Result};
use retina_core::pipeline::health_notification;
use retina_core::PredictionService;
use std::sync::Arc;

use crate::output;

pub async fn execute(service: Arc<dyn PredictionService>, base_url: &str) -> Result<()> {
    let outcome = service.health().await;
    let notification = health_notification(&outcome);

    match outcome {
        Ok(health) => {
            output::print_health(base_url, &health);
            if let Some(note) = notification {
                println!();
                output::print_notification(&note);
            }
            Ok(())
        }
        Err(e) => {
            output::print_notification(&e.notification());
            bail!("Prediction service at {} is unreachable", base_url)
        }
    }
}

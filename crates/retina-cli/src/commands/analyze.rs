//! Image analysis command.

use anyhow::{bail, Result};
use clap::Args;
use retina_core::{CandidateFile, Notification, Pipeline, PredictionService};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Retinal images to grade (PNG or JPEG, up to 16MB each)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the startup health check
    #[arg(long)]
    pub skip_health: bool,
}

/// Grade each file in turn. A failed file is reported and skipped; the
/// command fails at the end if any file did.
pub async fn execute(args: AnalyzeArgs, service: Arc<dyn PredictionService>) -> Result<()> {
    let mut pipeline = Pipeline::new(service);

    if !args.skip_health {
        if let Some(note) = pipeline.check_health().await {
            output::print_notification(&note);
        }
    }

    let mut failures = 0;
    let mut results = Vec::new();

    for path in &args.files {
        debug!(path = %path.display(), "Analyzing file");
        let candidate = match CandidateFile::from_path(path) {
            Ok(candidate) => candidate,
            Err(e) => {
                output::print_notification(&Notification::error(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
                failures += 1;
                continue;
            }
        };

        let summary = match pipeline.select(candidate) {
            Ok(file) => file.summary(),
            Err(e) => {
                let note = e.notification();
                output::print_notification(&Notification {
                    message: format!("{}: {}", path.display(), note.message),
                    ..note
                });
                failures += 1;
                continue;
            }
        };

        if !args.json {
            output::print_selected(&summary);
        }

        let spinner = output::spinner(format!("Analyzing {}...", summary.file_name));
        let outcome = pipeline.submit().await;
        spinner.finish_and_clear();

        match outcome {
            Ok(model) if args.json => {
                results.push(json!({ "file": path, "result": model }));
            }
            Ok(model) => output::print_display_model(model),
            Err(e) => {
                output::print_notification(&e.notification());
                failures += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if failures > 0 {
        bail!(
            "{} of {} file(s) could not be analyzed",
            failures,
            args.files.len()
        );
    }

    Ok(())
}

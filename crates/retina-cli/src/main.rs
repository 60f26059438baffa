//! Retina CLI - diabetic retinopathy screening client
//!
//! Validates retinal images, submits them to a remote prediction service
//! and renders the graded result in the terminal or the browser.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Pick the log filter used when `RUST_LOG` is not set.
fn default_filter(verbose: bool, serving: bool) -> &'static str {
    if verbose {
        "retina=debug,retina_core=debug,retina_client=debug,retina_web=debug,tower_http=debug"
    } else if serving {
        "retina=info,retina_core=info,retina_client=info,retina_web=info,tower_http=info"
    } else {
        "error"
    }
}

/// Initialize tracing with optional file logging.
///
/// Terminal output always goes to stderr so `--json` output on stdout stays
/// machine-readable. The returned guard must live until exit to flush the
/// log file.
fn init_tracing(log_file: Option<&std::path::Path>, filter: &str) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let _ = std::fs::create_dir_all(dir);
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "retina.log".into());

        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(&cli.command, Commands::Serve(_));
    let _guard = init_tracing(cli.log_file.as_deref(), default_filter(cli.verbose, serving));

    cli.execute().await
}

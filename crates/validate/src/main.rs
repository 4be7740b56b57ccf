//! `coursedesk-validate` -- validate admin form snapshots from the shell.
//!
//! Prints the JSON report on stdout; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default | Description                              |
//! |----------------------|----------|---------|------------------------------------------|
//! | `SUCCESS_DISPLAY_MS` | no       | `3000`  | Success indicator lifetime after a pass  |
//! | `REPORT_PRETTY`      | no       | `true`  | Pretty-print JSON output                 |
//! | `RUST_LOG`           | no       | `coursedesk_validate=info` | Log filter    |
//!
//! # Exit codes
//!
//! `0` passed, `1` the form has errors, `2` usage or input failure.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursedesk_validate::cli::{self, USAGE};
use coursedesk_validate::config::ValidateConfig;
use coursedesk_validate::runner;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursedesk_validate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match ValidateConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "Loaded configuration");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match cli::parse_args(args.as_slice()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match runner::run(&invocation, &config) {
        Ok(output) => {
            println!("{}", output.text);
            if output.form_rejected {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("Validation run failed: {e:#}");
            ExitCode::from(2)
        }
    }
}

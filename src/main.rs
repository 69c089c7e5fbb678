//! Atlas - Application Entry Point
//!
//! Reads an edge list from stdin, runs the configured workload and prints
//! the results to stdout. Diagnostics and logs go to stderr.

use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atlas::{
    AppError, AppResult, Config, Shutdown,
    benchmark::StressRunner,
    config::{OutputFormat, Workload},
    constants::exit_codes,
};

#[tokio::main]
async fn main() -> ExitCode {
    let workload_arg = std::env::args().nth(1);
    let config = match Config::from_env().and_then(|c| c.with_workload_arg(workload_arg.as_deref())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("atlas: {}", e);
            return ExitCode::from(exit_codes::CONFIGURATION as u8);
        }
    };

    init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(config: &Config) {
    let (text, json) = match config.logging.format {
        OutputFormat::Text => (Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)), None),
        OutputFormat::Json => (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.logging.rust_log)
                .unwrap_or_else(|_| "atlas=info".into()),
        )
        .with(text)
        .with(json)
        .init();
}

async fn run(config: Config) -> AppResult<()> {
    tracing::info!(workload = %config.workload, "Starting Atlas stress workload");

    let shutdown = Shutdown::new();
    let listener = shutdown.listen();
    let runner = StressRunner::new(config, shutdown);

    if runner.config().workload == Workload::Generate {
        runner.generate(io::stdout().lock())?;
        listener.abort();
        return Ok(());
    }

    let report = runner.run(BufReader::new(io::stdin())).await;
    listener.abort();
    let report = report?;

    let rendered = match runner.config().report.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report
                .render_json()
                .map_err(|e| AppError::Internal(e.into()))?;
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    tracing::info!("Atlas run complete");
    Ok(())
}

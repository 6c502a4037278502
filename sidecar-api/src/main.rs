use anyhow::{Context, Result};
use clap::Parser;
use sidecar_api::{create_app, reload, AppState, Args};
use sidecar_logging::{bridge, classify, fields, LineSink, LogContext};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Attach the structured sink first; an unusable stdout means the
    // supervisor cannot see us, so refuse to start.
    let sink = LineSink::stdout().context("failed to attach structured log sink to stdout")?;
    let root = LogContext::new(sink, args.log_level);
    bridge::install(&root);

    let log = root.named("runner");

    match &args.app_path {
        Some(path) => log.info(&format!("Application path set to: {path}")),
        None => log.warning("No application path provided in command line arguments"),
    }
    log.info_with(
        "Runtime information",
        fields! {
            "version" => env!("CARGO_PKG_VERSION"),
            "platform" => std::env::consts::OS,
        },
    );

    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    log.info(&format!("Current working directory: {}", cwd.display()));

    if args.reload {
        reload::start_change_watcher(&log, cwd)?;
    }

    let state = AppState::new(
        root.clone(),
        args.app_path.clone().unwrap_or_else(|| "Unknown".to_string()),
    );
    let app = create_app(state);

    log.info(&format!("Starting HTTP server on port {}", args.port));
    let listener = match TcpListener::bind(("127.0.0.1", args.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            log.error_with_cause(
                &format!("Failed to start server on port {}", args.port),
                &err,
            );
            return Err(err).context("bind failed");
        }
    };
    log.info(classify::STARTUP_COMPLETE_MESSAGE);

    // Serves until the supervisor terminates the process.
    if let Err(err) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        log.error_with_cause("Server terminated unexpectedly", &err);
        return Err(err).context("server error");
    }

    Ok(())
}

//! GetSet - Key/Value Command Server
//!
//! This is the main entry point for the GetSet server.
//! It resolves the data paths, loads the store and serves the HTTP routes.

use clap::Parser;
use getset::commands::CommandService;
use getset::config::{Paths, ServerArgs};
use getset::http::build_router;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The web root is missing.
const EXIT_STATIC_MOUNT: u8 = 1;

/// The key/value file could not be loaded.
const EXIT_STORE_LOAD: u8 = 2;

fn print_banner(args: &ServerArgs, paths: &Paths) {
    println!(
        r#"
GetSet v{} - Key/Value Command Server
──────────────────────────────────────────────────────────────
Server started on http://{}
Data file: {}
Web root:  {}

Use Ctrl+C to shutdown gracefully.
"#,
        getset::VERSION,
        args.bind_address(),
        paths.config_file.display(),
        paths.www_dir.display(),
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse command-line arguments
    let args = ServerArgs::parse();

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_target(false)
        .init();

    let paths = args.paths()?;

    let service = match CommandService::initialize(&paths) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!(path = %paths.config_file.display(), error = %e, "Failed to load store");
            return Ok(ExitCode::from(EXIT_STORE_LOAD));
        }
    };

    if !paths.www_dir.is_dir() {
        error!(path = %paths.www_dir.display(), "Static mount failed");
        return Ok(ExitCode::from(EXIT_STATIC_MOUNT));
    }

    let app = build_router(service, &paths.www_dir);

    // Bind the TCP listener
    let listener = TcpListener::bind(args.bind_address()).await?;
    info!("Listening on {}", listener.local_addr()?);
    print_banner(&args, &paths);

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(ExitCode::SUCCESS)
}

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;

use wikid::logger::Logger;
use wikid::{app, AppState, Config, PageStore, Templates, WikiError};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = Logger::init() {
        eprintln!("failed to install logger: {}", e);
    }

    let config = Config::parse();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), WikiError> {
    config.validate()?;
    info!(
        "Starting with data dir {:?}, templates {:?}, front page {:?}",
        config.data_dir, config.templates_dir, config.front_page
    );

    let templates = Templates::load(&config.templates_dir)?;
    let store = PageStore::new(&config.data_dir);
    let state = AppState::new(store, templates, &config.front_page);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Wiki listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("ctrl+c received, shutting down");
}

// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use clap::Parser;
use greeting_config::{Config, ConfigPrefix};
use tokio::signal;

use crate::{cli::Cli, routes::greeting::build_schema};

mod release;
mod router;
mod server;

pub use release::GreetingServiceRelease;
pub use router::ServiceRouter;
pub use server::GreetingServer;

/// Run the greeting service until a shutdown signal arrives
pub async fn run() -> anyhow::Result<()> {
    // Parse command line and environment arguments
    let cli = Cli::parse();

    // Load the service configuration
    let config = Config::parse(ConfigPrefix::Service, cli.config.as_ref()).map_err(|e| {
        tracing::error!(
            "Invalid configuration file `{}`: {}",
            cli.config.unwrap_or_default().display(),
            e
        );
        anyhow!(e)
    })?;

    build_info::build_info!(fn build_info);
    let release = GreetingServiceRelease::from(build_info());

    let router = ServiceRouter::builder()
        .schema(build_schema())
        .release(release)
        .build();

    let server =
        GreetingServer::start(config.service.host_and_port, router.create_router()).await?;

    shutdown_handler().await;

    Ok(server.stop().await?)
}

/// Graceful shutdown handler
async fn shutdown_handler() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Signal received, starting graceful shutdown");
}

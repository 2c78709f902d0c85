// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{io, net::SocketAddr};

use axum::{extract::Request, serve, Router, ServiceExt};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tower_http::normalize_path::NormalizePath;
use url::Url;

use crate::error::ServerError;

/// A running HTTP listener serving a router.
///
/// The server runs on a background task from [`GreetingServer::start`] until
/// [`GreetingServer::stop`] is awaited. Dropping the handle also requests a
/// graceful shutdown, but nothing waits for in-flight requests in that case.
pub struct GreetingServer {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: Option<JoinHandle<io::Result<()>>>,
}

impl GreetingServer {
    pub async fn start(host_and_port: SocketAddr, router: Router) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(host_and_port)
            .await
            .map_err(|source| ServerError::Bind {
                addr: host_and_port,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone().cancelled_owned();

        let app = NormalizePath::trim_trailing_slash(router);
        let service = ServiceExt::<Request>::into_make_service(app);
        let task = tokio::spawn(async move {
            serve(listener, service)
                .with_graceful_shutdown(signal)
                .await
        });

        let server = Self {
            local_addr,
            shutdown,
            task: Some(task),
        };
        tracing::info!(address = %local_addr, "Server running at {}", server.url());

        Ok(server)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL clients should post queries to. Wildcard bind addresses are
    /// reported as `localhost`.
    pub fn url(&self) -> Url {
        let authority = if self.local_addr.ip().is_unspecified() {
            format!("localhost:{}", self.local_addr.port())
        } else {
            self.local_addr.to_string()
        };
        Url::parse(&format!("http://{authority}/")).expect("Socket address is a valid authority")
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    pub async fn stop(mut self) -> Result<(), ServerError> {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.await??;
        }
        tracing::info!(address = %self.local_addr, "Server stopped");
        Ok(())
    }
}

impl Drop for GreetingServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

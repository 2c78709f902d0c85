// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{io, net::SocketAddr};

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to `{addr}`: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read the bound address: {0}")]
    LocalAddr(#[source] io::Error),
    #[error("Server stopped with an error: {0}")]
    Serve(#[from] io::Error),
    #[error("Server task did not finish cleanly: {0}")]
    Join(#[from] JoinError),
}

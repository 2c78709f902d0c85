// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod error;
pub mod routes;
pub mod service;

pub use error::ServerError;

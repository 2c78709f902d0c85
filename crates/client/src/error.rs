// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("Failed to send request: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Failed to fetch greeting, status code: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("Query failed: {0}")]
    GraphQl(String),
    #[error("Response did not contain a greeting")]
    MissingGreeting,
    #[error("No element with id `{0}`")]
    ElementNotFound(String),
}

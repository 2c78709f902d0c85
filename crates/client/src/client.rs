// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

/// The document sent on every request, unchanged.
pub const GREETING_QUERY: &str = "query { greeting }";

pub const DEFAULT_QUERY_URL: &str = "http://localhost:9001/";

/// GraphQL request body
#[derive(Clone, Debug, Serialize)]
pub struct QueryBody {
    pub query: String,
}

impl QueryBody {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GreetingData {
    pub greeting: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GreetingClient {
    http_client: reqwest::Client,
    query_url: Url,
}

impl GreetingClient {
    pub fn new(http_client: reqwest::Client, query_url: Url) -> Self {
        Self {
            http_client,
            query_url,
        }
    }

    /// Builds a client for `client.query_url`, applying
    /// `client.request_timeout_secs` when set.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_config(config: &greeting_config::ClientConfig) -> Result<Self, ClientError> {
        let mut http_client = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout_secs {
            http_client = http_client.timeout(timeout);
        }
        let http_client = http_client.build().map_err(ClientError::HttpClient)?;

        Ok(Self::new(http_client, config.query_url.clone()))
    }

    /// Sends one `query { greeting }` request and returns `data.greeting`.
    ///
    /// There is no retry. Responses carrying GraphQL errors are rejected even
    /// when partial data is present.
    pub async fn fetch_greeting(&self) -> Result<String, ClientError> {
        let body = QueryBody::new(GREETING_QUERY);
        tracing::debug!(url = %self.query_url, query = GREETING_QUERY, "Fetching greeting");

        let response = self
            .http_client
            .post(self.query_url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(status));
        }

        let response: graphql_client::Response<GreetingData> =
            response.json().await.map_err(ClientError::Decode)?;

        match (response.data, response.errors) {
            (_, Some(errors)) if !errors.is_empty() => {
                let messages = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(ClientError::GraphQl(messages))
            }
            (
                Some(GreetingData {
                    greeting: Some(greeting),
                }),
                _,
            ) => Ok(greeting),
            _ => Err(ClientError::MissingGreeting),
        }
    }
}

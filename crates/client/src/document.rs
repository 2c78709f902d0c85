// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::{client::GreetingClient, error::ClientError};

/// Id of the element that receives the greeting.
pub const GREETING_ELEMENT_ID: &str = "greeting";

/// Something holding elements addressable by id, like a browser DOM.
pub trait Document {
    /// Replaces the text content of the element `element_id`.
    fn set_text_content(&mut self, element_id: &str, text: &str) -> Result<(), ClientError>;
}

/// A document kept in memory, mapping element ids to their text content.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    elements: HashMap<String, String>,
}

impl MemoryDocument {
    pub fn with_element(mut self, element_id: impl Into<String>) -> Self {
        self.insert_element(element_id);
        self
    }

    pub fn insert_element(&mut self, element_id: impl Into<String>) {
        self.elements.entry(element_id.into()).or_default();
    }

    pub fn text_content(&self, element_id: &str) -> Option<&str> {
        self.elements.get(element_id).map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn set_text_content(&mut self, element_id: &str, text: &str) -> Result<(), ClientError> {
        let content = self
            .elements
            .get_mut(element_id)
            .ok_or_else(|| ClientError::ElementNotFound(element_id.to_string()))?;
        *content = text.to_string();
        Ok(())
    }
}

/// Fetches the greeting and writes it as the text of `element_id`.
///
/// The element is looked up only once the response arrived, so a missing
/// element is reported after the request has been made.
pub async fn show_greeting<D>(
    client: &GreetingClient,
    document: &mut D,
    element_id: &str,
) -> Result<String, ClientError>
where
    D: Document + ?Sized,
{
    let greeting = client.fetch_greeting().await?;
    document.set_text_content(element_id, &greeting)?;
    tracing::info!(element_id, %greeting, "Rendered greeting");
    Ok(greeting)
}

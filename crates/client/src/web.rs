// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

//! Browser bindings, built with `--features web` for `wasm32-unknown-unknown`.

use url::Url;
use wasm_bindgen::prelude::*;

use crate::{
    client::GreetingClient,
    document::{show_greeting, Document, GREETING_ELEMENT_ID},
    error::ClientError,
};

/// The page's DOM.
pub struct BrowserDocument(web_sys::Document);

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }

    /// The document of the current window, if running in a page.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self)
    }
}

impl Document for BrowserDocument {
    fn set_text_content(&mut self, element_id: &str, text: &str) -> Result<(), ClientError> {
        let element = self
            .0
            .get_element_by_id(element_id)
            .ok_or_else(|| ClientError::ElementNotFound(element_id.to_string()))?;
        element.set_text_content(Some(text));
        Ok(())
    }
}

/// Queries the service at `url` and writes the greeting into the element
/// with id `element_id`, or `greeting` when omitted. Resolves to the
/// greeting, rejects with the error message otherwise.
#[wasm_bindgen(js_name = showGreeting)]
pub async fn show_greeting_in_page(
    url: String,
    element_id: Option<String>,
) -> Result<String, JsError> {
    let query_url = Url::parse(&url)?;
    let mut document =
        BrowserDocument::current().ok_or_else(|| JsError::new("No document to render into"))?;

    let client = GreetingClient::new(reqwest::Client::new(), query_url);
    let element_id = element_id.as_deref().unwrap_or(GREETING_ELEMENT_ID);
    Ok(show_greeting(&client, &mut document, element_id).await?)
}

// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

//! Client for the greeting service.
//!
//! [`GreetingClient`] posts the fixed `query { greeting }` document and
//! returns `data.greeting`. [`show_greeting`] additionally writes the result
//! into a [`Document`] element. With the `web` feature the crate also builds
//! a browser binding that renders into a page element, `greeting` unless
//! another id is given.

mod client;
mod document;
mod error;
#[cfg(feature = "web")]
pub mod web;

pub use client::{GreetingClient, GreetingData, QueryBody, DEFAULT_QUERY_URL, GREETING_QUERY};
pub use document::{show_greeting, Document, MemoryDocument, GREETING_ELEMENT_ID};
pub use error::ClientError;

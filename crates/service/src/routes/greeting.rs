// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};

/// The value every `greeting` query resolves to.
pub const GREETING: &str = "Hello world";

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    async fn greeting(&self) -> Option<String> {
        tracing::trace!("Resolving greeting");
        Some(GREETING.to_string())
    }
}

pub type GreetingSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> GreetingSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription).finish()
}

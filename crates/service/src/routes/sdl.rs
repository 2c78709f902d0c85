// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;

use super::greeting::GreetingSchema;

/// Serves the schema in SDL form.
pub async fn sdl(State(schema): State<GreetingSchema>) -> String {
    schema.sdl()
}

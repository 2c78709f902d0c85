// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_graphql_axum::GraphQL;
use axum::{
    extract::MatchedPath,
    http::{Method, Request},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use typed_builder::TypedBuilder;

use super::release::GreetingServiceRelease;
use crate::routes::{self, greeting::GreetingSchema};

const DEFAULT_ROUTE: &str = "/";

#[derive(TypedBuilder)]
pub struct ServiceRouter {
    schema: GreetingSchema,
    // release info
    #[builder(default, setter(strip_option))]
    release: Option<GreetingServiceRelease>,
}

impl ServiceRouter {
    pub fn create_router(self) -> Router {
        // GraphQL on POST, a liveness message on GET
        let root =
            get("Service is up and running").post_service(GraphQL::new(self.schema.clone()));

        let schema_route = Router::new()
            .route("/schema", get(routes::sdl))
            .with_state(self.schema);

        let version = match self.release {
            Some(release) => Router::new().route("/version", get(Json(release))),
            None => Router::new(),
        };

        // browsers call the service from other origins
        let cors_layer = CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_headers(cors::Any)
            .allow_methods([Method::OPTIONS, Method::POST, Method::GET]);

        // add tracing to all routes
        let tracing_layer = TraceLayer::new_for_http()
            .make_span_with(|req: &Request<_>| {
                let method = req.method();
                let uri = req.uri();
                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                info_span!(
                    "http_request",
                    %method,
                    %uri,
                    matched_path,
                )
            })
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: Duration,
                 _span: &tracing::Span| {
                    tracing::warn!(%error, ?latency, "Request failed");
                },
            );

        Router::new()
            .route(DEFAULT_ROUTE, root)
            .merge(schema_route)
            .merge(version)
            .layer(cors_layer)
            .layer(tracing_layer)
    }
}

//! Example HTTP API served by `jsonify-server`.
//!
//! Routes:
//! - `GET /health` - liveness probe
//! - `POST /users` - creates a user from a validated JSON body
//!
//! Every route sits behind [`JsonifyLayer`], so handlers receive a decoded
//! [`JsonBody`](crate::middleware::JsonBody) and answer with a
//! [`JsonPayload`](crate::middleware::JsonPayload).

mod handlers;

pub use handlers::{create_user, health_check, User};

use crate::middleware::{JsonifyConfig, JsonifyLayer};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(config: JsonifyConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", post(create_user))
        .layer(JsonifyLayer::new(config))
        .layer(TraceLayer::new_for_http())
}

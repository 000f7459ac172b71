//! JSON body middleware.
//!
//! Per request, the layer:
//! - reads the body once (bounded by `max_body_bytes`) and decodes it
//! - rejects undecodable bodies with 400 before the handler runs
//! - hands the handler a [`JsonBody`] through the request extensions
//! - serializes a [`JsonPayload`] attached to the response, if there is one
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonify_core::middleware::{JsonifyConfig, JsonifyLayer};
//!
//! let app = Router::new()
//!     .route("/users", post(create_user))
//!     .layer(JsonifyLayer::new(JsonifyConfig::default().with_help_messages(false)));
//! ```

use crate::body::{BodyDecoder, DecodedBody};
use crate::error::JsonifyError;
use crate::middleware::context::{JsonBody, JsonPayload};
use crate::middleware::rejection::Rejection;
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use futures::{future::BoxFuture, StreamExt};
use metrics::counter;
use serde::Deserialize;
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════════

/// Settings for [`JsonifyLayer`]. Fixed once the layer is built.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonifyConfig {
    /// Include title and description in 4xx rejections
    #[serde(default = "default_help_messages")]
    pub help_messages: bool,

    /// Largest request body that will be read, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for JsonifyConfig {
    fn default() -> Self {
        Self {
            help_messages: default_help_messages(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl JsonifyConfig {
    pub fn with_help_messages(mut self, help_messages: bool) -> Self {
        self.help_messages = help_messages;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

fn default_help_messages() -> bool { true }
fn default_max_body_bytes() -> usize { 1_048_576 }

// ═══════════════════════════════════════════════════════════════════════════════
// Tower Layer and Service
// ═══════════════════════════════════════════════════════════════════════════════

/// JSON body layer for Tower.
#[derive(Debug, Clone)]
pub struct JsonifyLayer {
    config: Arc<JsonifyConfig>,
}

impl JsonifyLayer {
    pub fn new(config: JsonifyConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &JsonifyConfig {
        &self.config
    }
}

impl Default for JsonifyLayer {
    fn default() -> Self {
        Self::new(JsonifyConfig::default())
    }
}

impl<S> Layer<S> for JsonifyLayer {
    type Service = JsonifyService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JsonifyService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// JSON body service.
#[derive(Debug, Clone)]
pub struct JsonifyService<S> {
    inner: S,
    config: Arc<JsonifyConfig>,
}

impl<S> Service<Request<Body>> for JsonifyService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let config = self.config.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let request = match decode_request(request, &config).await {
                Ok(request) => request,
                Err(error) => {
                    return Ok(Rejection::new(error, config.help_messages).into_response());
                }
            };

            let response = inner.call(request).await?;
            Ok(encode_payload(response))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Request / Response Phases
// ═══════════════════════════════════════════════════════════════════════════════

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
}

/// Read and decode the body, attaching the [`JsonBody`] context.
///
/// The collected bytes are put back so the inner service sees the same
/// payload.
async fn decode_request(
    request: Request<Body>,
    config: &JsonifyConfig,
) -> Result<Request<Body>, JsonifyError> {
    let (mut parts, body) = request.into_parts();

    let (decoded, body) = match content_length(&parts.headers) {
        Some(0) => (DecodedBody::empty(), body),
        Some(declared) if declared > config.max_body_bytes => {
            return Err(JsonifyError::PayloadTooLarge {
                limit: config.max_body_bytes,
            });
        }
        _ => {
            let bytes = collect_body(body, config.max_body_bytes).await?;
            let decoded = BodyDecoder::decode(&bytes)?;
            (decoded, Body::from(bytes))
        }
    };

    counter!("jsonify_requests_decoded_total").increment(1);
    debug!(fields = decoded.len(), path = %parts.uri.path(), "Attached JSON body");

    parts
        .extensions
        .insert(JsonBody::new(decoded, config.help_messages));
    Ok(Request::from_parts(parts, body))
}

/// Collect `body`, failing as soon as it grows past `limit` bytes.
///
/// Covers bodies without a usable Content-Length, such as chunked uploads.
async fn collect_body(body: Body, limit: usize) -> Result<Vec<u8>, JsonifyError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| JsonifyError::BodyRead(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            debug!(limit, received = buf.len() + chunk.len(), "Request body over limit");
            return Err(JsonifyError::PayloadTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Serialize an attached [`JsonPayload`] as the response body.
fn encode_payload(mut response: Response) -> Response {
    let Some(payload) = response.extensions_mut().remove::<JsonPayload>() else {
        return response;
    };

    match serde_json::to_vec(payload.value()) {
        Ok(bytes) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            parts.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => Rejection::bare(e).into_response(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

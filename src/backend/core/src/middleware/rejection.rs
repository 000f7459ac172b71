//! Bad-request signaling.
//!
//! A [`Rejection`] pairs an error with the verbosity flag that was in force
//! for the request. With verbose mode on, client errors are answered with a
//! JSON body carrying a title and a description; with it off, only the
//! status line goes out. Server errors are always answered bare.

use crate::error::JsonifyError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a verbose rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionBody {
    pub title: String,
    pub description: String,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejection {
    error: JsonifyError,
    help_messages: bool,
}

impl Rejection {
    pub fn new(error: impl Into<JsonifyError>, help_messages: bool) -> Self {
        Self {
            error: error.into(),
            help_messages,
        }
    }

    /// A rejection that never exposes details.
    pub fn bare(error: impl Into<JsonifyError>) -> Self {
        Self::new(error, false)
    }

    pub fn error(&self) -> &JsonifyError {
        &self.error
    }

    pub fn into_error(self) -> JsonifyError {
        self.error
    }

    pub fn status(&self) -> StatusCode {
        self.error.http_status()
    }

    /// Whether the response will carry a title and description.
    pub fn is_verbose(&self) -> bool {
        self.help_messages && self.status().is_client_error()
    }

    /// The response body, if one will be sent.
    pub fn body(&self) -> Option<RejectionBody> {
        self.is_verbose().then(|| RejectionBody {
            title: self.error.title().to_string(),
            description: self.error.description(),
        })
    }
}

impl From<JsonifyError> for Rejection {
    fn from(error: JsonifyError) -> Self {
        Self::bare(error)
    }
}

impl From<regex::Error> for Rejection {
    fn from(error: regex::Error) -> Self {
        Self::bare(error)
    }
}

impl From<serde_json::Error> for Rejection {
    fn from(error: serde_json::Error) -> Self {
        Self::bare(error)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.error.log();
        self.error.record_metrics();

        let status = self.status();
        match self.body() {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

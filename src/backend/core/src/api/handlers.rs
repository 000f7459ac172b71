//! Request handlers.
//!
//! Handlers return `Result<_, Rejection>` so that the first failing field
//! lookup ends the request with a 400.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::middleware::{JsonBody, JsonPayload, Rejection};
use crate::validation::FieldConstraint;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

// ═══════════════════════════════════════════════════════════════════════════════
// Health Check
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn health_check() -> JsonPayload {
    JsonPayload::new(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: u8,
    pub email: String,
    pub role: String,
    pub newsletter: bool,
}

pub async fn create_user(body: JsonBody) -> Result<(StatusCode, JsonPayload), Rejection> {
    let name: String = body.get_as("name", &FieldConstraint::text().min_value(3).max_value(64))?;
    let age: u8 = body.get_as("age", &FieldConstraint::integer().min_value(0).max_value(150))?;
    let email: String = body.get_as(
        "email",
        &FieldConstraint::text().max_value(254).try_pattern(EMAIL_PATTERN)?,
    )?;
    // clients cannot pick their own role
    let role: String = body.get_as("role", &FieldConstraint::text().with_default("member"))?;
    let newsletter = if body.body().contains("newsletter") {
        body.get_as("newsletter", &FieldConstraint::boolean())?
    } else {
        false
    };

    let user = User {
        name,
        age,
        email,
        role,
        newsletter,
    };
    tracing::info!(name = %user.name, role = %user.role, "Created user");

    Ok((StatusCode::CREATED, JsonPayload::from_serialize(&user)?))
}

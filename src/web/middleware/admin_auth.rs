//! HTTP Basic authentication for the admin panel.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::config::AdminCredentials;
use crate::{error::AppError, state::AppState};

/// Lowercase hex SHA-256 of a password, as stored in `ADMIN_PASSWORD_SHA256`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn verify(credentials: &AdminCredentials, user: &str, password: &str) -> bool {
    let user_ok = constant_time_eq(credentials.user.as_bytes(), user.as_bytes());
    let hash_ok = constant_time_eq(
        credentials.password_sha256.as_bytes(),
        hash_password(password).as_bytes(),
    );
    user_ok & hash_ok
}

/// Requires `Authorization: Basic ...` matching the configured admin.
///
/// # Errors
///
/// Returns `404 Not Found` when the admin panel is disabled and
/// `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge when the
/// credentials are missing or wrong.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(credentials) = st.admin.as_ref() else {
        return Err(AppError::not_found("Not found", json!({})));
    };

    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    if !verify(credentials, &user, password.as_deref().unwrap_or_default()) {
        tracing::warn!(user = %user, "Rejected admin login");
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Invalid credentials"}),
        ));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

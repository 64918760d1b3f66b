//! Error types shared across layers.
//!
//! - [`StoreError`] - failures of the persistence layer
//! - [`PriceM2Error`] - domain errors raised by the price-per-area engine
//! - [`AppError`] - HTTP-facing error rendered as the `{status, errors}` envelope

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Message shown when the requested construction type does not exist.
pub const NO_CONSTRUCTION_FOUND_MESSAGE: &str = "No se halló el tipo de construcción";

/// Message shown when no cadastral record carries the requested zip code.
pub const NO_ZIP_CODE_FOUND_MESSAGE: &str = "No se halló el código zip solicitado";

/// Failure of the underlying record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Domain errors of the price-per-area calculation.
///
/// The first three kinds are caller-visible and recoverable; `Store` means the
/// record store could not answer and the calculation was abandoned.
#[derive(Debug, Error)]
pub enum PriceM2Error {
    #[error("{}", NO_CONSTRUCTION_FOUND_MESSAGE)]
    ConstructionTypeNotFound,

    #[error("{}", NO_ZIP_CODE_FOUND_MESSAGE)]
    ZipCodeNotFound,

    #[error("Aggregate '{0}' no soportado. Valores válidos: avg, max, min.")]
    UnsupportedAggregate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    status: bool,
    errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            AppError::NotFound { message, details } => (StatusCode::NOT_FOUND, message, details),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, message, details)
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, details)
            }
        };

        tracing::debug!(status = status.as_u16(), %details, "request failed: {}", message);

        let body = ErrorBody {
            status: false,
            errors: vec![message],
        };

        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"price-m2 admin\"")],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<PriceM2Error> for AppError {
    fn from(e: PriceM2Error) -> Self {
        match e {
            PriceM2Error::Store(store) => store.into(),
            domain => AppError::bad_request(domain.to_string(), json!({})),
        }
    }
}

//! Unified error types for the Swartz gateway
//!
//! This module defines error types for each layer:
//! - `DomainError`: Business rule violations raised by the services
//! - `ProviderError`: Data Provider (contract gateway) errors
//! - `UploadError`: File pinning errors
//! - `ClassifierError`: Sentiment inference errors
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("You must create a profile to {0}")]
    NotRegistered(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Data Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid provider key")]
    Unauthorized,

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// File pinning errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Pinning API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Pinning response did not contain a content hash")]
    MissingHash,
}

/// Sentiment inference errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Inference API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Model returned no prediction")]
    EmptyPrediction,
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// A read during aggregation failed; nothing from that pass is returned
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Collapse a read failure into the single "fetch failed" condition
    pub fn fetch_failed(err: ProviderError) -> Self {
        tracing::error!(error = %err, "Aggregation aborted");
        AppError::FetchFailed(err.to_string())
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::WalletNotConnected) => (
                StatusCode::UNAUTHORIZED,
                "Wallet not connected",
                Some("Send the connected account in the X-Wallet-Address header".to_string()),
            ),
            AppError::Domain(e @ DomainError::NotRegistered(_)) => {
                (StatusCode::FORBIDDEN, "Profile required", Some(e.to_string()))
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Provider(e) => {
                tracing::error!("Provider error: {}", e);
                match e {
                    ProviderError::NotFound(msg) => {
                        (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
                    }
                    ProviderError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    ProviderError::Api { message, .. } => (
                        StatusCode::BAD_GATEWAY,
                        "Transaction failed",
                        Some(message.clone()),
                    ),
                    ProviderError::InvalidRecord(msg) => (
                        StatusCode::BAD_GATEWAY,
                        "Provider returned an invalid record",
                        Some(msg.clone()),
                    ),
                    _ => (StatusCode::BAD_GATEWAY, "Provider unavailable", None),
                }
            }
            AppError::Upload(e) => {
                tracing::error!("Upload error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upload failed",
                    Some(e.to_string()),
                )
            }
            AppError::Classifier(e) => {
                tracing::error!("Classifier error: {}", e);
                (StatusCode::BAD_GATEWAY, "Classification failed", None)
            }
            AppError::FetchFailed(msg) => {
                (StatusCode::BAD_GATEWAY, "Fetch failed", Some(msg.clone()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

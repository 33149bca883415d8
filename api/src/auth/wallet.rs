//! Wallet session middleware
//!
//! The client sends the connected account in the `X-Wallet-Address` header.
//! The middleware turns it into a `Viewer` and injects it into request
//! extensions; handlers receive it explicitly from there.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::domain::entities::{Address, Viewer};
use crate::error::{AppError, DomainError};

pub const WALLET_HEADER: &str = "X-Wallet-Address";

/// Read the viewer from the wallet header. `Ok(None)` when no wallet is connected.
fn extract_viewer(request: &Request<Body>) -> Result<Option<Viewer>, AppError> {
    let Some(value) = request.headers().get(WALLET_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("{} is not valid text", WALLET_HEADER)))?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let account: Address = raw.parse().map_err(AppError::BadRequest)?;
    Ok(Some(Viewer::new(account)))
}

/// Wallet-required middleware
///
/// Rejects the request with "wallet not connected" when no account is sent.
pub async fn wallet_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let viewer = extract_viewer(&request)?.ok_or(DomainError::WalletNotConnected)?;

    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}

/// Optional wallet middleware
///
/// Like wallet_middleware but lets anonymous requests through; the viewer is
/// absent from extensions and read views answer with an empty page.
pub async fn optional_wallet_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(viewer) = extract_viewer(&request)? {
        request.extensions_mut().insert(viewer);
    }

    Ok(next.run(request).await)
}

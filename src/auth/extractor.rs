// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Axum extractor for authenticated callers.
//!
//! Use the `Auth` extractor in handlers to require a valid session token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(caller): Auth) -> impl IntoResponse {
//!     // caller is AuthenticatedCaller
//! }
//! ```
//!
//! A rejected token never reaches the handler, so the ledger façades are
//! only ever invoked with a verified username/orgName pair.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{claims::SessionClaims, AuthError, AuthenticatedCaller};
use crate::state::AppState;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Extractor requiring a verified session token.
pub struct Auth(pub AuthenticatedCaller);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let caller = verify_token(token, &state.config.jwt_secret)?;
        tracing::debug!(
            username = %caller.username,
            org_name = %caller.org_name,
            "decoded caller from session token"
        );

        Ok(Auth(caller))
    }
}

/// Verify an HS256 session token against the configured secret.
fn verify_token(token: &str, secret: &str) -> Result<AuthenticatedCaller, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims.into())
}

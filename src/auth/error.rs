// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Authentication errors.
//!
//! Every verification failure is answered with the same fixed
//! `{success: false, message}` envelope so the response leaks nothing about
//! why the token was rejected; the specific variant is only logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::StatusEnvelope;

/// Uniform message returned for any token verification failure.
pub const AUTH_FAILED_MESSAGE: &str = "Failed to authenticate token. Make sure to include the \
     token returned from /users call in the authorization header as a Bearer token";

#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token failed decoding or signature verification
    InvalidToken,
    /// Token has expired
    TokenExpired,
    /// Token signing failed while minting
    SigningFailed(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken => write!(f, "Token is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::SigningFailed(msg) => write!(f, "Failed to sign session token: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "token verification failed");
        let status = match self {
            AuthError::SigningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        (status, Json(StatusEnvelope::failure(AUTH_FAILED_MESSAGE))).into_response()
    }
}

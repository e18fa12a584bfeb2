// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Session token claims and the authenticated caller they resolve to.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;

/// Claims carried in a gateway session token (HS256).
///
/// The decoded `username`/`orgName` supply the caller identity forwarded to
/// the ledger façades. Tokens carry no roles; authorization happens inside
/// the contract via `OwnerType`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub username: String,
    #[serde(rename = "orgName")]
    pub org_name: String,
    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims expiring `expire_secs` from now.
    pub fn new(username: impl Into<String>, org_name: impl Into<String>, expire_secs: u64) -> Self {
        Self {
            username: username.into(),
            org_name: org_name.into(),
            exp: Utc::now().timestamp() + expire_secs as i64,
        }
    }

    /// Sign the claims into a compact JWT.
    pub fn sign(&self, secret: &str) -> Result<String, AuthError> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }
}

/// Caller identity extracted from a verified session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    pub username: String,
    pub org_name: String,
}

impl From<SessionClaims> for AuthenticatedCaller {
    fn from(claims: SessionClaims) -> Self {
        Self {
            username: claims.username,
            org_name: claims.org_name,
        }
    }
}

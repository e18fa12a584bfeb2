// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # Identity Façade
//!
//! Wallet registry mapping (username, organization) to enrollment
//! credentials. Registration is explicit: a first-time caller going through
//! [`WalletRegistry::lookup`] triggers one-time registration and gets
//! [`CredentialLookup::RegistrationInitiated`] back, so the caller can
//! surface a retry-required error instead of silently proceeding with a
//! missing credential.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credential material held in the wallet for one enrolled user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub org_name: String,
    /// Enrollment secret issued at registration.
    pub secret: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Outcome of resolving a caller's credential for a ledger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialLookup {
    /// The caller is enrolled; proceed with the call.
    Resolved(Identity),
    /// The caller was not enrolled. Registration has been initiated; the
    /// current call must abort and the caller retry.
    RegistrationInitiated,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("User {username} is already registered with {org_name}")]
    AlreadyRegistered { username: String, org_name: String },
}

/// In-process wallet holding per-organization user credentials.
#[derive(Default)]
pub struct WalletRegistry {
    wallets: RwLock<HashMap<(String, String), Identity>>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and enroll a user, returning the enrollment credential.
    pub async fn register(
        &self,
        username: &str,
        org_name: &str,
    ) -> Result<Identity, IdentityError> {
        let key = (username.to_string(), org_name.to_string());
        let mut wallets = self.wallets.write().await;

        if wallets.contains_key(&key) {
            return Err(IdentityError::AlreadyRegistered {
                username: username.to_string(),
                org_name: org_name.to_string(),
            });
        }

        let identity = Identity {
            username: username.to_string(),
            org_name: org_name.to_string(),
            secret: Uuid::new_v4().to_string(),
            enrolled_at: Utc::now(),
        };
        wallets.insert(key, identity.clone());

        tracing::debug!(username, org_name, "registered user in wallet");
        Ok(identity)
    }

    pub async fn is_registered(&self, username: &str, org_name: &str) -> bool {
        let key = (username.to_string(), org_name.to_string());
        self.wallets.read().await.contains_key(&key)
    }

    /// Resolve the credential for a ledger call.
    ///
    /// A missing credential triggers one-time registration and reports
    /// `RegistrationInitiated`; it never hands back a half-enrolled identity.
    pub async fn lookup(&self, username: &str, org_name: &str) -> CredentialLookup {
        let key = (username.to_string(), org_name.to_string());
        if let Some(identity) = self.wallets.read().await.get(&key) {
            return CredentialLookup::Resolved(identity.clone());
        }

        tracing::info!(
            username,
            org_name,
            "identity not found in wallet, registering user"
        );
        match self.register(username, org_name).await {
            Ok(_) | Err(IdentityError::AlreadyRegistered { .. }) => {
                CredentialLookup::RegistrationInitiated
            }
        }
    }
}

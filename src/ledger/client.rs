// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Transaction and query façades over the ledger.
//!
//! Translates a logical operation name and positional string arguments into
//! a ledger submission or evaluation, resolving the caller's credential
//! through the wallet registry first. A first-time caller gets a
//! retry-required error while registration completes.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::{Ledger, LedgerError};
use crate::identity::{CredentialLookup, WalletRegistry};

/// Result of a successful transaction submission: the per-function outcome
/// message plus the committed record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InvokeOutcome {
    pub message: String,
    pub result: Value,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(
        "An identity for the user {username} does not exist in the wallet of {org_name}; \
         registration has been initiated, retry the request"
    )]
    RegistrationInitiated { username: String, org_name: String },

    #[error("ledger returned a non-JSON payload: {0}")]
    MalformedResult(serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ClientError {
    /// Stable error name for the `error` field of the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::RegistrationInitiated { .. } => "RegistrationInitiated",
            ClientError::MalformedResult(_) => "MalformedResult",
            ClientError::Ledger(e) => e.kind(),
        }
    }
}

/// Per-function outcome message shown to gateway callers.
fn outcome_message(function: &str, manufacturing_id: &str) -> String {
    match function {
        "CreateCar" => format!(
            "Car with Manufacturing ID {manufacturing_id} has been manufactured successfully"
        ),
        "DeliverCar" => {
            format!("Car with Manufacturing ID {manufacturing_id} has been delivered successfully")
        }
        "SellCar" => {
            format!("Car with Manufacturing ID {manufacturing_id} has been sold successfully")
        }
        other => format!("Function {other} completed successfully"),
    }
}

/// Client-side façade pairing the ledger with the wallet registry.
#[derive(Clone)]
pub struct LedgerClient {
    ledger: Arc<Ledger>,
    wallets: Arc<WalletRegistry>,
}

impl LedgerClient {
    pub fn new(ledger: Arc<Ledger>, wallets: Arc<WalletRegistry>) -> Self {
        Self { ledger, wallets }
    }

    async fn resolve_credential(
        &self,
        username: &str,
        org_name: &str,
    ) -> Result<(), ClientError> {
        match self.wallets.lookup(username, org_name).await {
            CredentialLookup::Resolved(_) => Ok(()),
            CredentialLookup::RegistrationInitiated => {
                Err(ClientError::RegistrationInitiated {
                    username: username.to_string(),
                    org_name: org_name.to_string(),
                })
            }
        }
    }

    /// Submit a state-changing transaction on behalf of the named caller.
    pub async fn invoke_transaction(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
        username: &str,
        org_name: &str,
    ) -> Result<InvokeOutcome, ClientError> {
        tracing::debug!(channel, chaincode, function, username, org_name, "invoke");
        self.resolve_credential(username, org_name).await?;

        let serialized = self
            .ledger
            .submit(channel, chaincode, function, args)
            .await?;
        let result: Value =
            serde_json::from_str(&serialized).map_err(ClientError::MalformedResult)?;

        let manufacturing_id = args.first().map(String::as_str).unwrap_or_default();
        Ok(InvokeOutcome {
            message: outcome_message(function, manufacturing_id),
            result,
        })
    }

    /// Evaluate a read-only query on behalf of the named caller.
    pub async fn query(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
        username: &str,
        org_name: &str,
    ) -> Result<Value, ClientError> {
        tracing::debug!(channel, chaincode, function, username, org_name, "query");
        self.resolve_credential(username, org_name).await?;

        let serialized = self
            .ledger
            .evaluate(channel, chaincode, function, args)
            .await?;
        serde_json::from_str(&serialized).map_err(ClientError::MalformedResult)
    }
}

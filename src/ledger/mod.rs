// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # In-process Ledger
//!
//! Stand-in for the external permissioned-ledger platform behind the same
//! façade contract. It keeps one world state per deployed channel/chaincode
//! pair and executes the contract atomically: writes are buffered in a
//! transaction simulator and committed only if the contract call succeeds.
//!
//! Ordering, consensus, and conflict detection are explicitly out of scope;
//! a real deployment would swap this module for a gateway SDK.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::contract::{self, ContractError, StateStore};

pub mod client;

pub use client::{ClientError, InvokeOutcome, LedgerClient};

/// Errors raised at the ledger boundary, before or while executing the
/// contract.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("channel {0} does not exist on this network")]
    UnknownChannel(String),

    #[error("chaincode {chaincode} is not deployed on channel {channel}")]
    ChaincodeNotDeployed { channel: String, chaincode: String },

    #[error("function {0} cannot be submitted as a transaction")]
    NotInvokable(String),

    #[error("function {0} cannot be evaluated as a query")]
    NotEvaluable(String),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl LedgerError {
    /// Stable error name for the `error` field of the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::UnknownChannel(_) => "UnknownChannel",
            LedgerError::ChaincodeNotDeployed { .. } => "ChaincodeNotDeployed",
            LedgerError::NotInvokable(_) => "NotInvokable",
            LedgerError::NotEvaluable(_) => "NotEvaluable",
            LedgerError::Contract(e) => e.kind(),
        }
    }
}

/// Keyed world state for one channel.
#[derive(Debug, Default)]
pub struct WorldState {
    records: HashMap<String, Vec<u8>>,
}

impl StateStore for WorldState {
    fn get_state(&self, key: &str) -> Option<Vec<u8>> {
        self.records.get(key).cloned()
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) {
        self.records.insert(key.to_string(), value);
    }
}

/// Write-buffering view over a committed world state. Reads fall through to
/// the base state; writes stay local until [`TxSimulator::into_writes`].
struct TxSimulator<'a> {
    base: &'a WorldState,
    writes: HashMap<String, Vec<u8>>,
}

impl<'a> TxSimulator<'a> {
    fn new(base: &'a WorldState) -> Self {
        Self {
            base,
            writes: HashMap::new(),
        }
    }

    fn into_writes(self) -> HashMap<String, Vec<u8>> {
        self.writes
    }
}

impl StateStore for TxSimulator<'_> {
    fn get_state(&self, key: &str) -> Option<Vec<u8>> {
        self.writes
            .get(key)
            .cloned()
            .or_else(|| self.base.get_state(key))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key.to_string(), value);
    }
}

/// The ledger network: a single channel with one deployed chaincode.
pub struct Ledger {
    channel_name: String,
    chaincode_name: String,
    state: RwLock<WorldState>,
}

impl Ledger {
    pub fn new(channel_name: impl Into<String>, chaincode_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            chaincode_name: chaincode_name.into(),
            state: RwLock::new(WorldState::default()),
        }
    }

    fn check_target(&self, channel: &str, chaincode: &str) -> Result<(), LedgerError> {
        if channel != self.channel_name {
            return Err(LedgerError::UnknownChannel(channel.to_string()));
        }
        if chaincode != self.chaincode_name {
            return Err(LedgerError::ChaincodeNotDeployed {
                channel: channel.to_string(),
                chaincode: chaincode.to_string(),
            });
        }
        Ok(())
    }

    /// Submit a state-changing transaction for ordering and commit.
    ///
    /// The contract runs against a simulator; its write set is applied to
    /// world state only on success, so an aborted transaction persists
    /// nothing.
    pub async fn submit(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
    ) -> Result<String, LedgerError> {
        self.check_target(channel, chaincode)?;
        if !contract::is_invokable(function) {
            return Err(LedgerError::NotInvokable(function.to_string()));
        }

        let mut state = self.state.write().await;
        let mut sim = TxSimulator::new(&state);
        let result = contract::dispatch(&mut sim, Utc::now(), function, args)?;

        for (key, value) in sim.into_writes() {
            state.put_state(&key, value);
        }

        tracing::debug!(channel, chaincode, function, "transaction committed");
        Ok(result)
    }

    /// Evaluate a read-only query against current world state.
    pub async fn evaluate(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
    ) -> Result<String, LedgerError> {
        self.check_target(channel, chaincode)?;
        if contract::is_invokable(function) {
            return Err(LedgerError::NotEvaluable(function.to_string()));
        }

        // Evaluation must not mutate world state; hand the contract a
        // simulator and drop its write set.
        let state = self.state.read().await;
        let mut sim = TxSimulator::new(&state);
        let result = contract::dispatch(&mut sim, Utc::now(), function, args)?;
        Ok(result)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # Asset State Machine
//!
//! The car tracking contract: pure state transitions over a keyed record
//! store. The contract has no concurrency control and no knowledge of the
//! gateway; it receives an explicit [`StateStore`] capability from the
//! ledger that executes it.
//!
//! Dispatch by function name mirrors how the contract is addressed on a
//! ledger network: a function name plus positional string arguments.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod car;

pub use car::{Car, CarState, OwnerType};

/// World-state access handed to contract functions by the ledger.
pub trait StateStore {
    fn get_state(&self, key: &str) -> Option<Vec<u8>>;
    fn put_state(&mut self, key: &str, value: Vec<u8>);
}

/// Errors surfaced by contract functions. Any error aborts the enclosing
/// ledger transaction, so no partial mutation is ever persisted.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("The car with manufacturing Id {id} already exists")]
    AlreadyExists { id: String },

    #[error("The car with manufacturing Id {id} does not exist")]
    NotFound { id: String },

    #[error("The car can only be created by Manufacturer but current user is {actual}")]
    NotManufacturer { actual: String },

    #[error("The car can only be sold by a Dealer but current user is {actual}")]
    NotDealer { actual: String },

    #[error("The car with manufacturing Id {id} cannot be {operation} from state {state}")]
    InvalidTransition {
        id: String,
        operation: &'static str,
        state: CarState,
    },

    #[error("invalid JSON in '{field}': {source}")]
    InvalidPayload {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error("stored record for manufacturing Id {id} is not valid JSON: {source}")]
    CorruptRecord {
        id: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize car record: {0}")]
    Serialize(serde_json::Error),

    #[error("function {function} expects {expected} argument(s) but got {got}")]
    WrongArity {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unknown contract function {0}")]
    UnknownFunction(String),
}

/// Number of positional arguments each contract function takes, or `None`
/// for unknown names.
pub fn arity(function: &str) -> Option<usize> {
    match function {
        "CreateCar" => Some(6),
        "DeliverCar" | "SellCar" => Some(3),
        "ReadCar" => Some(1),
        _ => None,
    }
}

/// Whether the function mutates world state (submission) or only reads it
/// (evaluation).
pub fn is_invokable(function: &str) -> bool {
    matches!(function, "CreateCar" | "DeliverCar" | "SellCar")
}

fn check_arity(
    function: &'static str,
    expected: usize,
    args: &[String],
) -> Result<(), ContractError> {
    if args.len() != expected {
        return Err(ContractError::WrongArity {
            function,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Entry point used by the ledger: dispatch a named function against the
/// given store. `now` is the transaction timestamp supplied by the ledger so
/// that a transaction's effects are a deterministic function of its inputs.
pub fn dispatch(
    store: &mut dyn StateStore,
    now: DateTime<Utc>,
    function: &str,
    args: &[String],
) -> Result<String, ContractError> {
    match function {
        "CreateCar" => {
            check_arity("CreateCar", 6, args)?;
            car::create_car(
                store, now, &args[0], &args[1], &args[2], &args[3], &args[4], &args[5],
            )
        }
        "DeliverCar" => {
            check_arity("DeliverCar", 3, args)?;
            car::deliver_car(store, now, &args[0], &args[1], &args[2])
        }
        "SellCar" => {
            check_arity("SellCar", 3, args)?;
            car::sell_car(store, now, &args[0], &args[1], &args[2])
        }
        "ReadCar" => {
            check_arity("ReadCar", 1, args)?;
            car::read_car(store, &args[0])
        }
        other => Err(ContractError::UnknownFunction(other.to_string())),
    }
}

impl ContractError {
    /// Stable error name for the `error` field of the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::AlreadyExists { .. } => "AlreadyExists",
            ContractError::NotFound { .. } => "NotFound",
            ContractError::NotManufacturer { .. } | ContractError::NotDealer { .. } => {
                "WrongOwnerType"
            }
            ContractError::InvalidTransition { .. } => "InvalidTransition",
            ContractError::InvalidPayload { .. } => "InvalidPayload",
            ContractError::CorruptRecord { .. } | ContractError::Serialize(_) => "CorruptRecord",
            ContractError::WrongArity { .. } => "WrongArity",
            ContractError::UnknownFunction(_) => "UnknownFunction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemStore(HashMap<String, Vec<u8>>);

    impl StateStore for MemStore {
        fn get_state(&self, key: &str) -> Option<Vec<u8>> {
            self.0.get(key).cloned()
        }

        fn put_state(&mut self, key: &str, value: Vec<u8>) {
            self.0.insert(key.to_string(), value);
        }
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arity_table_matches_contract() {
        assert_eq!(arity("CreateCar"), Some(6));
        assert_eq!(arity("DeliverCar"), Some(3));
        assert_eq!(arity("SellCar"), Some(3));
        assert_eq!(arity("ReadCar"), Some(1));
        assert_eq!(arity("RepaintCar"), None);
    }

    #[test]
    fn read_car_is_not_invokable() {
        assert!(is_invokable("CreateCar"));
        assert!(is_invokable("SellCar"));
        assert!(!is_invokable("ReadCar"));
    }

    #[test]
    fn dispatch_rejects_unknown_function() {
        let mut store = MemStore::default();
        let err = dispatch(&mut store, Utc::now(), "RepaintCar", &[]).unwrap_err();
        assert!(matches!(err, ContractError::UnknownFunction(_)));
        assert_eq!(err.kind(), "UnknownFunction");
    }

    #[test]
    fn dispatch_rejects_wrong_arity() {
        let mut store = MemStore::default();
        let err = dispatch(&mut store, Utc::now(), "CreateCar", &args(&["1234"])).unwrap_err();
        assert!(matches!(
            err,
            ContractError::WrongArity {
                function: "CreateCar",
                expected: 6,
                got: 1,
            }
        ));
    }

    #[test]
    fn dispatch_runs_full_lifecycle() {
        let mut store = MemStore::default();
        let now = Utc::now();

        dispatch(
            &mut store,
            now,
            "CreateCar",
            &args(&["1234", "{}", "{}", "35000", "m-1", "Manufacturer"]),
        )
        .unwrap();
        dispatch(&mut store, now, "DeliverCar", &args(&["1234", "{}", "d-1"])).unwrap();
        let serialized =
            dispatch(&mut store, now, "SellCar", &args(&["1234", "{}", "c-1"])).unwrap();

        let car: Car = serde_json::from_str(&serialized).unwrap();
        assert_eq!(car.state, CarState::Sold);

        let read = dispatch(&mut store, now, "ReadCar", &args(&["1234"])).unwrap();
        assert_eq!(read, serialized);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Car asset record and lifecycle transitions.
//!
//! The contract is a set of free functions over an explicit [`StateStore`]
//! handle. Each function validates, mutates a single record, and persists it;
//! the ledger layer guarantees that a failed call commits nothing.
//!
//! Lifecycle: `CREATED` → `READY_FOR_SALE` → `SOLD`. `SOLD` is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContractError, StateStore};

/// Holder category for a car record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OwnerType {
    Manufacturer,
    Dealer,
    Customer,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::Manufacturer => "Manufacturer",
            OwnerType::Dealer => "Dealer",
            OwnerType::Customer => "Customer",
        }
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a car record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarState {
    #[serde(rename = "CREATED")]
    Created,
    #[serde(rename = "READY_FOR_SALE")]
    ReadyForSale,
    #[serde(rename = "SOLD")]
    Sold,
}

impl std::fmt::Display for CarState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CarState::Created => "CREATED",
            CarState::ReadyForSale => "READY_FOR_SALE",
            CarState::Sold => "SOLD",
        };
        f.write_str(s)
    }
}

/// A car record as stored in world state, keyed by manufacturing id.
///
/// Field names are PascalCase on the wire to match the deployed record
/// format. Delivery and selling fields are absent until the corresponding
/// transition has run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Car {
    pub manufacturing_id: String,
    pub model_details: Value,
    pub manufacturer_details: Value,
    pub per_unit_cost: String,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub doc_type: String,
    pub manufacturing_date: DateTime<Utc>,
    pub state: CarState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_details: Option<Value>,
}

fn load_car(store: &dyn StateStore, id: &str) -> Result<Car, ContractError> {
    let bytes = store
        .get_state(id)
        .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;
    serde_json::from_slice(&bytes).map_err(|e| ContractError::CorruptRecord {
        id: id.to_string(),
        source: e,
    })
}

fn persist_car(store: &mut dyn StateStore, car: &Car) -> Result<String, ContractError> {
    let serialized =
        serde_json::to_string(car).map_err(ContractError::Serialize)?;
    store.put_state(&car.manufacturing_id, serialized.clone().into_bytes());
    Ok(serialized)
}

/// Adds a new car record in `CREATED` state.
///
/// Fails if a record with `id` already exists or if the caller is not a
/// Manufacturer. `model` and `manufacturer` must be JSON documents.
pub fn create_car(
    store: &mut dyn StateStore,
    now: DateTime<Utc>,
    id: &str,
    model: &str,
    manufacturer: &str,
    unit_cost: &str,
    owner: &str,
    owner_type: &str,
) -> Result<String, ContractError> {
    if car_exists(store, id) {
        return Err(ContractError::AlreadyExists { id: id.to_string() });
    }

    if owner_type != "Manufacturer" {
        return Err(ContractError::NotManufacturer {
            actual: owner_type.to_string(),
        });
    }

    let model_details: Value =
        serde_json::from_str(model).map_err(|e| ContractError::InvalidPayload {
            field: "model",
            source: e,
        })?;
    let manufacturer_details: Value =
        serde_json::from_str(manufacturer).map_err(|e| ContractError::InvalidPayload {
            field: "manufacturer",
            source: e,
        })?;

    let car = Car {
        manufacturing_id: id.to_string(),
        model_details,
        manufacturer_details,
        per_unit_cost: unit_cost.to_string(),
        owner_id: owner.to_string(),
        owner_type: OwnerType::Manufacturer,
        doc_type: "Car".to_string(),
        manufacturing_date: now,
        state: CarState::Created,
        delivery_date: None,
        delivery_details: None,
        selling_date: None,
        selling_details: None,
    };

    persist_car(store, &car)
}

/// Returns the serialized car record from world state; no side effects.
pub fn read_car(store: &dyn StateStore, id: &str) -> Result<String, ContractError> {
    let bytes = store
        .get_state(id)
        .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;
    String::from_utf8(bytes).map_err(|_| ContractError::NotFound { id: id.to_string() })
}

/// Returns true when a record with the given id exists in world state.
pub fn car_exists(store: &dyn StateStore, id: &str) -> bool {
    store.get_state(id).is_some()
}

/// Records a dealer delivery: `CREATED` → `READY_FOR_SALE`.
///
/// Ownership moves to the dealer named in `new_owner`. The record must
/// currently be in `CREATED` state; a delivered or sold car cannot be
/// re-delivered.
pub fn deliver_car(
    store: &mut dyn StateStore,
    now: DateTime<Utc>,
    id: &str,
    delivery_info: &str,
    new_owner: &str,
) -> Result<String, ContractError> {
    let mut car = load_car(store, id)?;

    if car.state != CarState::Created {
        return Err(ContractError::InvalidTransition {
            id: id.to_string(),
            operation: "delivered",
            state: car.state,
        });
    }

    let details: Value =
        serde_json::from_str(delivery_info).map_err(|e| ContractError::InvalidPayload {
            field: "deliveryInfo",
            source: e,
        })?;

    car.state = CarState::ReadyForSale;
    car.delivery_date = Some(now);
    car.delivery_details = Some(details);
    car.owner_id = new_owner.to_string();
    car.owner_type = OwnerType::Dealer;

    persist_car(store, &car)
}

/// Records a customer sale: `READY_FOR_SALE` → `SOLD`.
///
/// Only a Dealer-held car can be sold. `SOLD` is terminal.
pub fn sell_car(
    store: &mut dyn StateStore,
    now: DateTime<Utc>,
    id: &str,
    sell_info: &str,
    new_owner: &str,
) -> Result<String, ContractError> {
    let mut car = load_car(store, id)?;

    if car.owner_type != OwnerType::Dealer {
        return Err(ContractError::NotDealer {
            actual: car.owner_type.to_string(),
        });
    }

    if car.state != CarState::ReadyForSale {
        return Err(ContractError::InvalidTransition {
            id: id.to_string(),
            operation: "sold",
            state: car.state,
        });
    }

    let details: Value =
        serde_json::from_str(sell_info).map_err(|e| ContractError::InvalidPayload {
            field: "sellInfo",
            source: e,
        })?;

    car.state = CarState::Sold;
    car.selling_date = Some(now);
    car.selling_details = Some(details);
    car.owner_id = new_owner.to_string();
    car.owner_type = OwnerType::Customer;

    persist_car(store, &car)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Minimal in-memory store for exercising the contract directly.
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

    fn create_sample(store: &mut MemStore, id: &str) -> Car {
        let serialized = create_car(
            store,
            Utc::now(),
            id,
            r#"{"name":"Model S"}"#,
            r#"{"name":"Tesla"}"#,
            "35000",
            "manufacturer-1",
            "Manufacturer",
        )
        .expect("create succeeds");
        serde_json::from_str(&serialized).expect("record parses")
    }

    #[test]
    fn create_car_writes_created_record() {
        let mut store = MemStore::default();
        let car = create_sample(&mut store, "1234");

        assert_eq!(car.manufacturing_id, "1234");
        assert_eq!(car.state, CarState::Created);
        assert_eq!(car.owner_type, OwnerType::Manufacturer);
        assert_eq!(car.doc_type, "Car");
        assert!(car_exists(&store, "1234"));
    }

    #[test]
    fn create_then_read_round_trips() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        let read: Car =
            serde_json::from_str(&read_car(&store, "1234").unwrap()).unwrap();
        assert_eq!(read.manufacturing_id, "1234");
        assert_eq!(read.state, CarState::Created);
    }

    #[test]
    fn create_car_rejects_duplicate_id() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        let err = create_car(
            &mut store,
            Utc::now(),
            "1234",
            "{}",
            "{}",
            "1",
            "m",
            "Manufacturer",
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { .. }));
        assert_eq!(
            err.to_string(),
            "The car with manufacturing Id 1234 already exists"
        );
    }

    #[test]
    fn create_car_rejects_non_manufacturer() {
        let mut store = MemStore::default();
        let err =
            create_car(&mut store, Utc::now(), "1", "{}", "{}", "1", "d", "Dealer").unwrap_err();
        assert!(matches!(err, ContractError::NotManufacturer { .. }));
        assert!(!car_exists(&store, "1"));
    }

    #[test]
    fn read_car_fails_for_missing_id() {
        let store = MemStore::default();
        let err = read_car(&store, "9999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The car with manufacturing Id 9999 does not exist"
        );
    }

    #[test]
    fn car_exists_never_fails() {
        let store = MemStore::default();
        assert!(!car_exists(&store, "9999"));
    }

    #[test]
    fn deliver_car_moves_to_ready_for_sale() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        let serialized = deliver_car(
            &mut store,
            Utc::now(),
            "1234",
            r#"{"carrier":"ACME"}"#,
            "dealer-1",
        )
        .unwrap();
        let car: Car = serde_json::from_str(&serialized).unwrap();

        assert_eq!(car.state, CarState::ReadyForSale);
        assert_eq!(car.owner_type, OwnerType::Dealer);
        assert_eq!(car.owner_id, "dealer-1");
        assert!(car.delivery_date.is_some());
    }

    #[test]
    fn sell_car_requires_dealer_owner() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        // Still owned by the manufacturer.
        let err = sell_car(&mut store, Utc::now(), "1234", "{}", "customer-1").unwrap_err();
        assert!(matches!(err, ContractError::NotDealer { .. }));
        assert_eq!(
            err.to_string(),
            "The car can only be sold by a Dealer but current user is Manufacturer"
        );
    }

    #[test]
    fn full_lifecycle_created_to_sold() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        deliver_car(&mut store, Utc::now(), "1234", "{}", "dealer-1").unwrap();
        let serialized =
            sell_car(&mut store, Utc::now(), "1234", r#"{"price":36000}"#, "customer-1").unwrap();
        let car: Car = serde_json::from_str(&serialized).unwrap();

        assert_eq!(car.state, CarState::Sold);
        assert_eq!(car.owner_type, OwnerType::Customer);
        assert_eq!(car.owner_id, "customer-1");
        assert!(car.selling_date.is_some());
    }

    #[test]
    fn deliver_car_rejects_sold_car() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");
        deliver_car(&mut store, Utc::now(), "1234", "{}", "dealer-1").unwrap();
        sell_car(&mut store, Utc::now(), "1234", "{}", "customer-1").unwrap();

        let err = deliver_car(&mut store, Utc::now(), "1234", "{}", "dealer-2").unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidTransition {
                state: CarState::Sold,
                ..
            }
        ));
    }

    #[test]
    fn sell_car_rejects_double_sale() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");
        deliver_car(&mut store, Utc::now(), "1234", "{}", "dealer-1").unwrap();
        sell_car(&mut store, Utc::now(), "1234", "{}", "customer-1").unwrap();

        // The sold car now belongs to a Customer, so the owner check fires first.
        let err = sell_car(&mut store, Utc::now(), "1234", "{}", "customer-2").unwrap_err();
        assert!(matches!(err, ContractError::NotDealer { .. }));
    }

    #[test]
    fn state_serializes_as_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&CarState::ReadyForSale).unwrap(),
            r#""READY_FOR_SALE""#
        );
        assert_eq!(
            serde_json::to_string(&OwnerType::Manufacturer).unwrap(),
            r#""Manufacturer""#
        );
    }

    #[test]
    fn record_uses_pascal_case_field_names() {
        let mut store = MemStore::default();
        create_sample(&mut store, "1234");

        let raw: Value =
            serde_json::from_str(&read_car(&store, "1234").unwrap()).unwrap();
        assert_eq!(raw["ManufacturingId"], "1234");
        assert_eq!(raw["State"], "CREATED");
        assert_eq!(raw["OwnerType"], "Manufacturer");
        assert!(raw.get("DeliveryDate").is_none());
    }
}

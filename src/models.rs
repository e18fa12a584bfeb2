// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # API Data Models
//!
//! Request bodies and the two response envelopes used across the gateway:
//!
//! - [`TxEnvelope`]: `{result, error, errorData}` wrapping every ledger
//!   invoke/query outcome.
//! - [`StatusEnvelope`]: `{success, message}` for registration, login, and
//!   request-validation outcomes.
//!
//! Request fields are all optional so that a missing field produces the
//! gateway's own validation envelope rather than a framework rejection; the
//! handlers check each field explicitly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Response envelopes
// =============================================================================

/// Envelope for ledger invoke/query responses.
///
/// Exactly one of `result` and `error`/`errorData` is populated. `error`
/// holds a stable error name, `errorData` the descriptive message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TxEnvelope {
    #[schema(value_type = Object)]
    pub result: Option<Value>,
    pub error: Option<String>,
    #[serde(rename = "errorData")]
    pub error_data: Option<String>,
}

impl TxEnvelope {
    pub fn ok(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
            error_data: None,
        }
    }

    pub fn failure(error: impl Into<String>, error_data: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
            error_data: Some(error_data.into()),
        }
    }
}

/// `{success, message}` envelope for registration, login, and validation
/// outcomes. `message` may be a plain string or a structured payload (the
/// login response carries `{token}` here).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatusEnvelope {
    pub success: bool,
    #[schema(value_type = Object)]
    pub message: Value,
}

impl StatusEnvelope {
    pub fn success(message: impl Into<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Successful registration outcome: enrollment secret plus session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegisterResponse {
    pub success: bool,
    /// Enrollment secret issued by the wallet registry.
    pub secret: String,
    pub message: String,
    /// Session token to present as a bearer token on subsequent calls.
    pub token: String,
}

// =============================================================================
// Request bodies
// =============================================================================

/// Body for POST /register and POST /users/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub username: Option<String>,
    #[serde(rename = "orgName")]
    pub org_name: Option<String>,
}

/// Body for POST /createCar.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    /// Opaque model payload, serialized to text before submission.
    #[schema(value_type = Object)]
    pub model: Option<Value>,
    /// Opaque manufacturer payload, serialized to text before submission.
    #[schema(value_type = Object)]
    pub manufacturer: Option<Value>,
    /// Per-unit cost; accepted as JSON number or string.
    #[serde(rename = "unitCost")]
    #[schema(value_type = String)]
    pub unit_cost: Option<Value>,
    #[serde(rename = "ownerID")]
    pub owner_id: Option<String>,
}

/// Body for POST /deliverCar.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliverCarRequest {
    /// Manufacturing id; accepted as JSON number or string.
    #[serde(rename = "carId")]
    #[schema(value_type = String)]
    pub car_id: Option<Value>,
    #[serde(rename = "deliveryInfo")]
    #[schema(value_type = Object)]
    pub delivery_info: Option<Value>,
    #[serde(rename = "ownerID")]
    pub owner_id: Option<String>,
}

/// Body for POST /sellCar.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellCarRequest {
    /// Manufacturing id; accepted as JSON number or string.
    #[serde(rename = "carId")]
    #[schema(value_type = String)]
    pub car_id: Option<Value>,
    #[serde(rename = "sellInfo")]
    #[schema(value_type = Object)]
    pub sell_info: Option<Value>,
    #[serde(rename = "ownerID")]
    pub owner_id: Option<String>,
}

/// Query parameters for GET /getCarDetails.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CarDetailsQuery {
    #[serde(rename = "carId")]
    pub car_id: Option<String>,
}

// =============================================================================
// Argument conversion
// =============================================================================

/// Convert a scalar request field (string or number) into a positional
/// ledger argument. Empty strings and non-scalar values are rejected.
pub fn scalar_arg(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Serialize an opaque structured field to the text form the contract
/// expects. `null` counts as missing.
pub fn payload_arg(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.to_string()),
    }
}

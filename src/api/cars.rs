// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Car lifecycle endpoints: create, deliver, sell, and lookup.
//!
//! Each handler validates required fields, marshals them into the positional
//! argument list the contract expects, and wraps the façade outcome in the
//! `{result, error, errorData}` envelope. Contract and ledger failures are
//! reported inside the envelope, not as HTTP errors, so callers always get
//! the same response shape.

use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde_json::json;

use crate::{
    auth::Auth,
    error::{require, require_text, FieldError},
    ledger::ClientError,
    models::{
        payload_arg, scalar_arg, CarDetailsQuery, CreateCarRequest, DeliverCarRequest,
        SellCarRequest, TxEnvelope,
    },
    state::AppState,
};

/// Random 4-digit manufacturing id assigned by the gateway at creation.
fn new_manufacturing_id() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

fn envelope_from_error(e: &ClientError) -> TxEnvelope {
    TxEnvelope::failure(e.kind(), e.to_string())
}

/// Manufacture a new car.
///
/// The manufacturing id is generated by the gateway and the owner type is
/// fixed to `Manufacturer`; callers supply only the payloads and the owner.
#[utoipa::path(
    post,
    path = "/createCar",
    tag = "Cars",
    security(("bearer" = [])),
    request_body = CreateCarRequest,
    responses(
        (status = 200, description = "Invoke outcome envelope", body = TxEnvelope),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn create_car(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<Json<TxEnvelope>, FieldError> {
    tracing::debug!(username = %caller.username, "invoke on chaincode: CreateCar");

    let model = require(payload_arg(request.model.as_ref()), "'Model Details'")?;
    let manufacturer = require(
        payload_arg(request.manufacturer.as_ref()),
        "'Manufacturing Details'",
    )?;
    let unit_cost = require(scalar_arg(request.unit_cost.as_ref()), "'Unit Cost'")?;
    let owner = require_text(request.owner_id, "'Owner Id'")?;

    let args = vec![
        new_manufacturing_id(),
        model,
        manufacturer,
        unit_cost,
        owner,
        "Manufacturer".to_string(),
    ];

    let envelope = match state
        .client
        .invoke_transaction(
            &state.config.channel_name,
            &state.config.chaincode_name,
            "CreateCar",
            &args,
            &caller.username,
            &caller.org_name,
        )
        .await
    {
        Ok(outcome) => TxEnvelope::ok(json!({
            "message": outcome.message,
            "result": outcome.result,
        })),
        Err(e) => envelope_from_error(&e),
    };

    Ok(Json(envelope))
}

/// Deliver a car to a dealer.
#[utoipa::path(
    post,
    path = "/deliverCar",
    tag = "Cars",
    security(("bearer" = [])),
    request_body = DeliverCarRequest,
    responses(
        (status = 200, description = "Invoke outcome envelope", body = TxEnvelope),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn deliver_car(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Json(request): Json<DeliverCarRequest>,
) -> Result<Json<TxEnvelope>, FieldError> {
    tracing::debug!(username = %caller.username, "invoke on chaincode: DeliverCar");

    let car_id = require(scalar_arg(request.car_id.as_ref()), "'Car ID'")?;
    let delivery_info = require(payload_arg(request.delivery_info.as_ref()), "'Delivery Info'")?;
    let owner = require_text(request.owner_id, "'Owner ID'")?;

    let args = vec![car_id, delivery_info, owner];

    let envelope = match state
        .client
        .invoke_transaction(
            &state.config.channel_name,
            &state.config.chaincode_name,
            "DeliverCar",
            &args,
            &caller.username,
            &caller.org_name,
        )
        .await
    {
        Ok(outcome) => TxEnvelope::ok(json!({
            "message": outcome.message,
            "result": outcome.result,
        })),
        Err(e) => envelope_from_error(&e),
    };

    Ok(Json(envelope))
}

/// Sell a car to a customer.
#[utoipa::path(
    post,
    path = "/sellCar",
    tag = "Cars",
    security(("bearer" = [])),
    request_body = SellCarRequest,
    responses(
        (status = 200, description = "Invoke outcome envelope", body = TxEnvelope),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn sell_car(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Json(request): Json<SellCarRequest>,
) -> Result<Json<TxEnvelope>, FieldError> {
    tracing::debug!(username = %caller.username, "invoke on chaincode: SellCar");

    let car_id = require(scalar_arg(request.car_id.as_ref()), "'Car ID'")?;
    let sell_info = require(payload_arg(request.sell_info.as_ref()), "'Sell Info'")?;
    let owner = require_text(request.owner_id, "'Owner ID'")?;

    let args = vec![car_id, sell_info, owner];

    let envelope = match state
        .client
        .invoke_transaction(
            &state.config.channel_name,
            &state.config.chaincode_name,
            "SellCar",
            &args,
            &caller.username,
            &caller.org_name,
        )
        .await
    {
        Ok(outcome) => TxEnvelope::ok(json!({
            "message": outcome.message,
            "result": outcome.result,
        })),
        Err(e) => envelope_from_error(&e),
    };

    Ok(Json(envelope))
}

/// Fetch the current state of a car by manufacturing id (read-only
/// evaluation, no transaction is committed).
#[utoipa::path(
    get,
    path = "/getCarDetails",
    tag = "Cars",
    security(("bearer" = [])),
    params(CarDetailsQuery),
    responses(
        (status = 200, description = "Query outcome envelope", body = TxEnvelope),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn get_car_details(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Query(params): Query<CarDetailsQuery>,
) -> Result<Json<TxEnvelope>, FieldError> {
    tracing::debug!(username = %caller.username, "query on chaincode: ReadCar");

    let car_id = require_text(params.car_id, "'Car ID'")?;

    let envelope = match state
        .client
        .query(
            &state.config.channel_name,
            &state.config.chaincode_name,
            "ReadCar",
            &[car_id],
            &caller.username,
            &caller.org_name,
        )
        .await
    {
        Ok(record) => TxEnvelope::ok(record),
        Err(e) => envelope_from_error(&e),
    };

    Ok(Json(envelope))
}

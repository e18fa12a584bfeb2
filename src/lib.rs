// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Tracking Network - Car Asset Tracking Gateway
//!
//! HTTP gateway fronting a permissioned-ledger smart contract that models a
//! car's lifecycle (manufactured → delivered → sold).
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session-token authentication (HS256 JWT)
//! - `contract` - The car tracking smart contract (asset state machine)
//! - `ledger` - In-process ledger and the transaction/query façades
//! - `identity` - Wallet registry (per-organization user credentials)

pub mod api;
pub mod auth;
pub mod config;
pub mod contract;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod state;

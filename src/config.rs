// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and injected
//! into [`crate::state::AppState`]; nothing reads globals after boot.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `JWT_SECRET` | HS256 secret for session tokens | `secretPass` |
//! | `JWT_EXPIRE_SECS` | Session token lifetime in seconds | `36000` |
//! | `CHANNEL_NAME` | Ledger channel the contract is deployed to | `TrackingChannel` |
//! | `CHAINCODE_NAME` | Deployed contract name | `carTrackingCC` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    pub jwt_expire_secs: u64,
    /// Ledger channel addressed by the gateway.
    pub channel_name: String,
    /// Contract name as deployed on the channel.
    pub chaincode_name: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secretPass".to_string()),
            jwt_expire_secs: env::var("JWT_EXPIRE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(36_000),
            channel_name: env::var("CHANNEL_NAME")
                .unwrap_or_else(|_| "TrackingChannel".to_string()),
            chaincode_name: env::var("CHAINCODE_NAME")
                .unwrap_or_else(|_| "carTrackingCC".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            jwt_secret: "secretPass".to_string(),
            jwt_expire_secs: 36_000,
            channel_name: "TrackingChannel".to_string(),
            chaincode_name: "carTrackingCC".to_string(),
        }
    }
}

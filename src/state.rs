// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

use std::sync::Arc;

use crate::config::Config;
use crate::identity::WalletRegistry;
use crate::ledger::{Ledger, LedgerClient};

/// Shared application state: injected configuration, the ledger network,
/// the wallet registry, and the client façade over both.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub wallets: Arc<WalletRegistry>,
    pub client: LedgerClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let ledger = Arc::new(Ledger::new(
            config.channel_name.clone(),
            config.chaincode_name.clone(),
        ));
        let wallets = Arc::new(WalletRegistry::new());
        let client = LedgerClient::new(ledger, wallets.clone());

        Self {
            config: Arc::new(config),
            wallets,
            client,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

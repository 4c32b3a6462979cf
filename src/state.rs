//! Shared reactive state for the Raindrop client.

use std::sync::{Arc, Mutex};

use alloy::primitives::Address;

use crate::chain::EthClient;

/// Current RPC connection state, rendered by the header widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

/// Top-level reactive state, stored in a Dioxus `Signal`.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub connection_status: ConnectionStatus,
    /// Address derived from the unlocked signing key, if any.
    pub account: Option<Address>,
}

/// Thread-safe handle to the chain client. `None` until Connect succeeds.
pub type SharedEthClient = Arc<Mutex<Option<EthClient>>>;

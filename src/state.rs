// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::relay::ChatRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self { relay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ChatRelay::from_config(config))
    }
}

//! Application state for the exam compliance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::ConfigLoader;
use crate::store::RecordStore;

/// Shared application state.
///
/// Contains the record store, the loaded configuration (including the
/// access token registry), and an optional fixed evaluation date.
#[derive(Clone)]
pub struct AppState {
    /// The record store compliance data is read from.
    store: Arc<dyn RecordStore>,
    /// The loaded service configuration.
    config: Arc<ConfigLoader>,
    /// Evaluation date override; the local date is used when unset.
    today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The evaluation date override is taken from the configuration.
    pub fn new(config: ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        let today = config.fixed_today();
        Self {
            store,
            config: Arc::new(config),
            today,
        }
    }

    /// Pins the evaluation date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the date compliance is evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

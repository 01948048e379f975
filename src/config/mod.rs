//! Configuration loading and management for the exam compliance service.
//!
//! This module loads service settings, access tokens, and the optional seed
//! roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use exam_compliance::config::ConfigLoader;
//! use exam_compliance::store::InMemoryStore;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! let store = InMemoryStore::new();
//! config.seed(&store).unwrap();
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SeedSummary};
pub use types::{
    AccessToken, AccessTokens, Roster, RosterEmployer, RosterExam, RosterWorker, ServiceConfig,
    ServiceSettings,
};

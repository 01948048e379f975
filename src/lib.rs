//! Medical examination compliance tracking for migrant-worker employers.
//!
//! Every worker must pass medical examinations at fixed offsets from the
//! hire date (0, 6, 18 and 30 months). This crate derives the status of
//! each examination cycle from the worker's exam history, lists the workers
//! that need administrative attention, and serves that list over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod telemetry;

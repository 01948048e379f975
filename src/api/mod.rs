//! HTTP API module for the exam compliance service.
//!
//! This module exposes the administrator-only due list and per-worker
//! compliance endpoints over the record store.

mod auth;
mod handlers;
mod response;
mod state;

pub use auth::AdminUser;
pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

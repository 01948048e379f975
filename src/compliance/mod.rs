//! Compliance evaluation for the medical examination schedule.
//!
//! This module contains the calendar arithmetic behind required dates and
//! compliance windows, the per-cycle status evaluator, and the aggregation
//! of cycle results into the list of workers needing attention. Everything
//! here is pure: inputs are in-memory snapshots and the evaluation date.

mod due_list;
mod evaluator;
mod schedule;

pub use due_list::{CycleStatus, WorkerAlert, list_due_workers, worker_report};
pub use evaluator::{ComplianceResult, ComplianceStatus, evaluate, evaluate_all};
pub use schedule::{
    ComplianceWindow, UPCOMING_NOTICE_DAYS, WINDOW_DAYS, add_months, required_date,
};

//! Worker model and the eager-loaded worker snapshot.
//!
//! This module defines the [`Worker`] record and [`WorkerSnapshot`], the
//! read-only bundle of a worker, its employer name, and its full exam
//! history that compliance evaluation consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExamRecord;

fn default_active() -> bool {
    true
}

/// A migrant worker placed with an employer.
///
/// The hire date is fixed at creation and anchors every compliance window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// Alien resident certificate number, unique across workers.
    pub arc_number: String,
    /// Passport number.
    pub passport_number: String,
    /// Full legal name.
    pub full_name: String,
    /// Nationality as recorded on the passport.
    pub nationality: String,
    /// The first day of employment.
    pub hire_date: NaiveDate,
    /// The employer the worker is placed with.
    pub employer_id: u64,
    /// Whether the worker is currently employed.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Input for creating or editing a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorker {
    /// Alien resident certificate number, unique across workers.
    pub arc_number: String,
    /// Passport number.
    pub passport_number: String,
    /// Full legal name.
    pub full_name: String,
    /// Nationality as recorded on the passport.
    pub nationality: String,
    /// The first day of employment.
    pub hire_date: NaiveDate,
    /// The employer the worker is placed with.
    pub employer_id: u64,
    /// Whether the worker is currently employed.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewWorker {
    /// Materializes the input as a stored record with the given id.
    pub fn into_record(self, id: u64) -> Worker {
        Worker {
            id,
            arc_number: self.arc_number,
            passport_number: self.passport_number,
            full_name: self.full_name,
            nationality: self.nationality,
            hire_date: self.hire_date,
            employer_id: self.employer_id,
            is_active: self.is_active,
        }
    }
}

/// A worker together with everything compliance evaluation needs.
///
/// Snapshots are produced in one batch by the record store so that no
/// per-worker lookups happen while the due list is built.
///
/// # Example
///
/// ```
/// use exam_compliance::models::{Worker, WorkerSnapshot};
/// use chrono::NaiveDate;
///
/// let snapshot = WorkerSnapshot {
///     worker: Worker {
///         id: 1,
///         arc_number: "AC00000001".to_string(),
///         passport_number: "P1234567".to_string(),
///         full_name: "Nguyen Van An".to_string(),
///         nationality: "Vietnam".to_string(),
///         hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///         employer_id: 1,
///         is_active: true,
///     },
///     employer_name: "Formosa Precision Ltd.".to_string(),
///     exams: vec![],
/// };
/// assert!(snapshot.exams_for().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    /// The worker record.
    pub worker: Worker,
    /// The company name of the worker's employer.
    pub employer_name: String,
    /// Every exam record belonging to the worker.
    pub exams: Vec<ExamRecord>,
}

impl WorkerSnapshot {
    /// Returns the worker's exam records.
    pub fn exams_for(&self) -> &[ExamRecord] {
        &self.exams
    }
}

//! Aggregation of per-cycle results into the administrative due list.
//!
//! The due list contains every active worker with at least one cycle that is
//! overdue, due now, or upcoming within 30 days, in input order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ExamType, WorkerSnapshot};

use super::evaluator::{ComplianceResult, ComplianceStatus, evaluate_all};

/// One scheduled cycle as reported to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatus {
    /// The scheduled exam type.
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    /// Hire date plus the exam type's month offset.
    pub required_date: NaiveDate,
    /// The derived status.
    pub status: ComplianceStatus,
}

impl From<ComplianceResult> for CycleStatus {
    fn from(result: ComplianceResult) -> Self {
        Self {
            exam_type: result.exam_type,
            required_date: result.required_date,
            status: result.status,
        }
    }
}

/// A worker's identity together with the status of every scheduled cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerAlert {
    /// The worker's id.
    pub worker_id: u64,
    /// The worker's full name.
    pub full_name: String,
    /// The worker's resident certificate number.
    pub arc_number: String,
    /// The worker's hire date.
    pub hire_date: NaiveDate,
    /// The company name of the worker's employer.
    pub employer_name: String,
    /// Status of the four scheduled cycles in order.
    pub exam_statuses: Vec<CycleStatus>,
}

impl WorkerAlert {
    /// Returns true if any cycle needs administrative follow-up.
    pub fn requires_attention(&self) -> bool {
        self.exam_statuses
            .iter()
            .any(|cycle| cycle.status.requires_attention())
    }
}

/// Builds the unfiltered compliance report for one worker.
pub fn worker_report(snapshot: &WorkerSnapshot, today: NaiveDate) -> WorkerAlert {
    let worker = &snapshot.worker;
    let exam_statuses = evaluate_all(worker.hire_date, snapshot.exams_for(), today)
        .into_iter()
        .map(CycleStatus::from)
        .collect();

    WorkerAlert {
        worker_id: worker.id,
        full_name: worker.full_name.clone(),
        arc_number: worker.arc_number.clone(),
        hire_date: worker.hire_date,
        employer_name: snapshot.employer_name.clone(),
        exam_statuses,
    }
}

/// Lists the active workers that need administrative attention.
///
/// Inactive workers are skipped. A worker is included iff at least one of
/// its scheduled cycles is overdue, due now, or upcoming within 30 days.
/// Output order matches input order.
///
/// # Example
///
/// ```
/// use exam_compliance::compliance::list_due_workers;
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
///
/// // No entry exam on record and its window has closed
/// let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// let alerts = list_due_workers(&[snapshot], today);
/// assert_eq!(alerts.len(), 1);
/// assert_eq!(alerts[0].worker_id, 1);
/// ```
pub fn list_due_workers(snapshots: &[WorkerSnapshot], today: NaiveDate) -> Vec<WorkerAlert> {
    let alerts: Vec<WorkerAlert> = snapshots
        .iter()
        .filter(|snapshot| snapshot.worker.is_active)
        .map(|snapshot| worker_report(snapshot, today))
        .filter(WorkerAlert::requires_attention)
        .collect();

    debug!(
        evaluated = snapshots.len(),
        flagged = alerts.len(),
        %today,
        "Built compliance due list"
    );

    alerts
}

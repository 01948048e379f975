//! Compliance status derivation for a single examination cycle.
//!
//! A cycle is identified by a worker and a scheduled [`ExamType`]. Its
//! status is a pure projection of the hire date, the worker's exam records,
//! and the evaluation date; nothing is cached or persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ExamRecord, ExamType};

use super::schedule::{ComplianceWindow, UPCOMING_NOTICE_DAYS, required_date};

/// The compliance status of one examination cycle.
///
/// Variants are listed in the priority order used by [`evaluate`].
///
/// # Example
///
/// ```
/// use exam_compliance::compliance::ComplianceStatus;
///
/// assert!(ComplianceStatus::Overdue.requires_attention());
/// assert!(!ComplianceStatus::NotYetDue.requires_attention());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// A passing examination of the right type falls inside the window.
    Compliant,
    /// The window has closed without a passing examination.
    Overdue,
    /// The window is open and no passing examination exists yet.
    DueNow,
    /// The window opens within the next 30 days.
    #[serde(rename = "upcoming_within_30_days")]
    UpcomingWithin30Days,
    /// The window opens more than 30 days from now.
    NotYetDue,
}

impl ComplianceStatus {
    /// Returns true for statuses that need administrative follow-up.
    pub fn requires_attention(self) -> bool {
        match self {
            ComplianceStatus::Overdue
            | ComplianceStatus::DueNow
            | ComplianceStatus::UpcomingWithin30Days => true,
            ComplianceStatus::Compliant | ComplianceStatus::NotYetDue => false,
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "Compliant"),
            ComplianceStatus::Overdue => write!(f, "Overdue"),
            ComplianceStatus::DueNow => write!(f, "Due now"),
            ComplianceStatus::UpcomingWithin30Days => write!(f, "Upcoming (within 30 days)"),
            ComplianceStatus::NotYetDue => write!(f, "Not yet due"),
        }
    }
}

/// The evaluated state of one examination cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// The scheduled exam type of the cycle.
    pub exam_type: ExamType,
    /// Hire date plus the exam type's month offset.
    pub required_date: NaiveDate,
    /// The window in which a passing examination satisfies the cycle.
    pub window: ComplianceWindow,
    /// The derived status.
    pub status: ComplianceStatus,
    /// Whether a passing examination exists inside the window.
    pub is_compliant: bool,
}

/// Evaluates one examination cycle.
///
/// Returns `None` when `exam_type` has no compliance schedule
/// ([`ExamType::Other`]). `exams` is the worker's exam history; records of
/// other exam types are ignored.
///
/// The status is derived in priority order:
/// 1. a passed exam of this type inside the window → `Compliant`
/// 2. `today` after the window → `Overdue`
/// 3. `today` inside the window → `DueNow`
/// 4. window opens within 30 days → `UpcomingWithin30Days`
/// 5. otherwise → `NotYetDue`
///
/// # Example
///
/// ```
/// use exam_compliance::compliance::{evaluate, ComplianceStatus};
/// use exam_compliance::models::ExamType;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
///
/// let result = evaluate(hire, ExamType::Month6, &[], today).unwrap();
/// assert_eq!(result.required_date, today);
/// assert_eq!(result.status, ComplianceStatus::DueNow);
/// assert!(!result.is_compliant);
///
/// assert!(evaluate(hire, ExamType::Other, &[], today).is_none());
/// ```
pub fn evaluate(
    hire_date: NaiveDate,
    exam_type: ExamType,
    exams: &[ExamRecord],
    today: NaiveDate,
) -> Option<ComplianceResult> {
    let required_date = required_date(hire_date, exam_type)?;
    let window = ComplianceWindow::around(required_date)?;

    let is_compliant = exams.iter().any(|exam| {
        exam.exam_type == exam_type && exam.is_passed() && window.contains(exam.exam_date)
    });

    let status = if is_compliant {
        ComplianceStatus::Compliant
    } else if today > window.end {
        ComplianceStatus::Overdue
    } else if window.contains(today) {
        ComplianceStatus::DueNow
    } else if window.days_until_start(today) <= UPCOMING_NOTICE_DAYS {
        ComplianceStatus::UpcomingWithin30Days
    } else {
        ComplianceStatus::NotYetDue
    };

    Some(ComplianceResult {
        exam_type,
        required_date,
        window,
        status,
        is_compliant,
    })
}

/// Evaluates every scheduled cycle in order (entry, 6, 18, 30 months).
pub fn evaluate_all(
    hire_date: NaiveDate,
    exams: &[ExamRecord],
    today: NaiveDate,
) -> Vec<ComplianceResult> {
    ExamType::SCHEDULED
        .iter()
        .filter_map(|&exam_type| evaluate(hire_date, exam_type, exams, today))
        .collect()
}

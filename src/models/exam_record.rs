//! Exam record model and its closed enumerations.
//!
//! This module defines the [`ExamRecord`] struct together with the
//! [`ExamType`] and [`ReportStatus`] enums that classify every medical
//! examination a worker undergoes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of medical examination.
///
/// Four types follow a fixed schedule anchored on the hire date; `Other`
/// covers ad-hoc examinations that carry no compliance schedule.
///
/// # Example
///
/// ```
/// use exam_compliance::models::ExamType;
///
/// assert_eq!(ExamType::Month18.month_offset(), Some(18));
/// assert_eq!(ExamType::Other.month_offset(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    /// Examination on entry, due at the hire date.
    Entry,
    /// Examination due six months after hire.
    #[serde(rename = "month_6")]
    Month6,
    /// Examination due eighteen months after hire.
    #[serde(rename = "month_18")]
    Month18,
    /// Examination due thirty months after hire.
    #[serde(rename = "month_30")]
    Month30,
    /// Any examination outside the statutory schedule.
    Other,
}

impl ExamType {
    /// The scheduled exam types in cycle order.
    pub const SCHEDULED: [ExamType; 4] = [
        ExamType::Entry,
        ExamType::Month6,
        ExamType::Month18,
        ExamType::Month30,
    ];

    /// Returns the offset from the hire date in calendar months, or `None`
    /// for exam types without a compliance schedule.
    pub fn month_offset(self) -> Option<u32> {
        match self {
            ExamType::Entry => Some(0),
            ExamType::Month6 => Some(6),
            ExamType::Month18 => Some(18),
            ExamType::Month30 => Some(30),
            ExamType::Other => None,
        }
    }

    /// Returns true if this exam type follows the compliance schedule.
    pub fn is_scheduled(self) -> bool {
        self.month_offset().is_some()
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamType::Entry => write!(f, "Entry"),
            ExamType::Month6 => write!(f, "6-month"),
            ExamType::Month18 => write!(f, "18-month"),
            ExamType::Month30 => write!(f, "30-month"),
            ExamType::Other => write!(f, "Other"),
        }
    }
}

/// The outcome recorded on an examination report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The worker passed the examination.
    Passed,
    /// The worker failed the examination.
    Failed,
    /// A retest has been ordered and not yet reported.
    PendingRetest,
    /// The report awaits review.
    PendingReview,
    /// The examination was completed without a pass/fail verdict.
    Completed,
}

impl ReportStatus {
    /// Returns true only for [`ReportStatus::Passed`].
    pub fn is_passed(self) -> bool {
        self == ReportStatus::Passed
    }
}

/// A single medical examination taken by a worker.
///
/// The triple (worker, exam type, exam date) is unique; the record store
/// enforces it on create and update.
///
/// # Example
///
/// ```
/// use exam_compliance::models::{ExamRecord, ExamType, ReportStatus};
/// use chrono::NaiveDate;
///
/// let exam = ExamRecord {
///     id: 1,
///     worker_id: 10,
///     exam_type: ExamType::Entry,
///     exam_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     report_status: ReportStatus::Passed,
///     expiry_date: None,
///     facility_name: Some("Taipei General Hospital".to_string()),
///     report_document_url: None,
/// };
/// assert!(exam.is_passed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// The worker who took the examination.
    pub worker_id: u64,
    /// The kind of examination.
    pub exam_type: ExamType,
    /// The date the examination actually took place.
    pub exam_date: NaiveDate,
    /// The reported outcome.
    pub report_status: ReportStatus,
    /// The date the examination result stops being valid.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// The hospital or clinic that performed the examination.
    #[serde(default)]
    pub facility_name: Option<String>,
    /// Reference to the scanned report document.
    #[serde(default)]
    pub report_document_url: Option<String>,
}

impl ExamRecord {
    /// Returns true if the report status is [`ReportStatus::Passed`].
    pub fn is_passed(&self) -> bool {
        self.report_status.is_passed()
    }
}

/// Input for creating or editing an exam record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExamRecord {
    /// The worker who took the examination.
    pub worker_id: u64,
    /// The kind of examination.
    pub exam_type: ExamType,
    /// The date the examination actually took place.
    pub exam_date: NaiveDate,
    /// The reported outcome.
    pub report_status: ReportStatus,
    /// The date the examination result stops being valid.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// The hospital or clinic that performed the examination.
    #[serde(default)]
    pub facility_name: Option<String>,
    /// Reference to the scanned report document.
    #[serde(default)]
    pub report_document_url: Option<String>,
}

impl NewExamRecord {
    /// Materializes the input as a stored record with the given id.
    pub fn into_record(self, id: u64) -> ExamRecord {
        ExamRecord {
            id,
            worker_id: self.worker_id,
            exam_type: self.exam_type,
            exam_date: self.exam_date,
            report_status: self.report_status,
            expiry_date: self.expiry_date,
            facility_name: self.facility_name,
            report_document_url: self.report_document_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_offsets_follow_schedule() {
        assert_eq!(ExamType::Entry.month_offset(), Some(0));
        assert_eq!(ExamType::Month6.month_offset(), Some(6));
        assert_eq!(ExamType::Month18.month_offset(), Some(18));
        assert_eq!(ExamType::Month30.month_offset(), Some(30));
        assert_eq!(ExamType::Other.month_offset(), None);
    }

    #[test]
    fn test_scheduled_types_exclude_other() {
        assert!(ExamType::SCHEDULED.iter().all(|t| t.is_scheduled()));
        assert!(!ExamType::SCHEDULED.contains(&ExamType::Other));
        assert!(!ExamType::Other.is_scheduled());
    }

    #[test]
    fn test_exam_type_serialization() {
        assert_eq!(serde_json::to_string(&ExamType::Entry).unwrap(), "\"entry\"");
        assert_eq!(
            serde_json::to_string(&ExamType::Month6).unwrap(),
            "\"month_6\""
        );
        assert_eq!(
            serde_json::to_string(&ExamType::Month30).unwrap(),
            "\"month_30\""
        );

        let parsed: ExamType = serde_json::from_str("\"month_18\"").unwrap();
        assert_eq!(parsed, ExamType::Month18);
    }

    #[test]
    fn test_report_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::PendingRetest).unwrap(),
            "\"pending_retest\""
        );
        let parsed: ReportStatus = serde_json::from_str("\"pending_review\"").unwrap();
        assert_eq!(parsed, ReportStatus::PendingReview);
    }

    #[test]
    fn test_only_passed_counts_as_passed() {
        assert!(ReportStatus::Passed.is_passed());
        assert!(!ReportStatus::Failed.is_passed());
        assert!(!ReportStatus::PendingRetest.is_passed());
        assert!(!ReportStatus::PendingReview.is_passed());
        assert!(!ReportStatus::Completed.is_passed());
    }

    #[test]
    fn test_deserialize_exam_without_optional_fields() {
        let json = r#"{
            "id": 4,
            "worker_id": 2,
            "exam_type": "month_6",
            "exam_date": "2025-07-01",
            "report_status": "failed"
        }"#;

        let exam: ExamRecord = serde_json::from_str(json).unwrap();
        assert_eq!(exam.exam_type, ExamType::Month6);
        assert_eq!(exam.report_status, ReportStatus::Failed);
        assert!(exam.expiry_date.is_none());
        assert!(exam.facility_name.is_none());
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let input = NewExamRecord {
            worker_id: 9,
            exam_type: ExamType::Entry,
            exam_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            report_status: ReportStatus::Passed,
            expiry_date: NaiveDate::from_ymd_opt(2025, 2, 28),
            facility_name: None,
            report_document_url: Some("s3://reports/9/entry.pdf".to_string()),
        };

        let record = input.clone().into_record(31);
        assert_eq!(record.id, 31);
        assert_eq!(record.worker_id, input.worker_id);
        assert_eq!(record.exam_date, input.exam_date);
        assert_eq!(record.report_document_url, input.report_document_url);
    }
}

//! Core data models for the exam compliance service.
//!
//! This module contains the stored records (employers, workers, exam
//! records) and the snapshot type handed to compliance evaluation.

mod employer;
mod exam_record;
mod worker;

pub use employer::{Employer, NewEmployer};
pub use exam_record::{ExamRecord, ExamType, NewExamRecord, ReportStatus};
pub use worker::{NewWorker, Worker, WorkerSnapshot};

//! Error types for the exam compliance service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the configuration layer, the record store, and the
//! server binary can report. Compliance evaluation itself never fails.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ExamType;

/// The main error type for the exam compliance service.
///
/// # Example
///
/// ```
/// use exam_compliance::error::ServiceError;
///
/// let error = ServiceError::WorkerNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Worker not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employer exists with the given id.
    #[error("Employer not found: {id}")]
    EmployerNotFound {
        /// The requested employer id.
        id: u64,
    },

    /// No worker exists with the given id.
    #[error("Worker not found: {id}")]
    WorkerNotFound {
        /// The requested worker id.
        id: u64,
    },

    /// No exam record exists with the given id.
    #[error("Exam record not found: {id}")]
    ExamNotFound {
        /// The requested exam record id.
        id: u64,
    },

    /// The employer is still referenced by workers and cannot be deleted.
    #[error("Employer {id} is still referenced by {worker_count} worker(s)")]
    EmployerInUse {
        /// The employer id.
        id: u64,
        /// How many workers still reference the employer.
        worker_count: usize,
    },

    /// Another employer already uses this tax id.
    #[error("Tax id already registered: {tax_id}")]
    DuplicateTaxId {
        /// The conflicting tax id.
        tax_id: String,
    },

    /// Another worker already uses this resident certificate number.
    #[error("ARC number already registered: {arc_number}")]
    DuplicateArcNumber {
        /// The conflicting ARC number.
        arc_number: String,
    },

    /// The worker already has an exam of this type on this date.
    #[error("Worker {worker_id} already has a {exam_type} exam on {exam_date}")]
    DuplicateExam {
        /// The worker id.
        worker_id: u64,
        /// The exam type.
        exam_type: ExamType,
        /// The exam date.
        exam_date: NaiveDate,
    },

    /// The hire date anchors every compliance window and cannot change.
    #[error("Hire date of worker {worker_id} cannot be changed")]
    HireDateImmutable {
        /// The worker id.
        worker_id: u64,
    },

    /// The record store could not serve the request.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },

    /// The HTTP server failed to start or terminated abnormally.
    #[error("Server error: {message}")]
    Server {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

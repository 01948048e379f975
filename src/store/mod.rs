//! Record store for employers, workers, and exam records.
//!
//! The [`RecordStore`] trait is the seam between compliance evaluation and
//! persistence. It enforces the relational invariants of the data model:
//! unique (worker, exam type, exam date) triples, employers that cannot be
//! deleted while referenced, and exam records deleted together with their
//! worker. [`InMemoryStore`] is the bundled implementation.

mod memory;

pub use memory::InMemoryStore;

use crate::error::ServiceResult;
use crate::models::{
    Employer, ExamRecord, NewEmployer, NewExamRecord, NewWorker, Worker, WorkerSnapshot,
};

/// Filter for worker queries. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    /// Match on the active flag.
    pub is_active: Option<bool>,
    /// Match on the employer.
    pub employer_id: Option<u64>,
}

impl WorkerFilter {
    /// Matches active workers only.
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    /// Returns true if the worker satisfies every set field.
    pub fn matches(&self, worker: &Worker) -> bool {
        self.is_active.is_none_or(|active| worker.is_active == active)
            && self.employer_id.is_none_or(|id| worker.employer_id == id)
    }
}

/// Storage abstraction over the employer, worker, and exam record tables.
pub trait RecordStore: Send + Sync {
    /// Creates an employer. The tax id must be unused.
    fn create_employer(&self, employer: NewEmployer) -> ServiceResult<Employer>;
    /// Fetches an employer by id.
    fn employer(&self, id: u64) -> ServiceResult<Employer>;
    /// Replaces an employer's fields.
    fn update_employer(&self, id: u64, employer: NewEmployer) -> ServiceResult<Employer>;
    /// Deletes an employer no worker references any more.
    fn delete_employer(&self, id: u64) -> ServiceResult<()>;
    /// Lists every employer in id order.
    fn employers(&self) -> ServiceResult<Vec<Employer>>;

    /// Creates a worker for an existing employer. The ARC number must be unused.
    fn create_worker(&self, worker: NewWorker) -> ServiceResult<Worker>;
    /// Fetches a worker by id.
    fn worker(&self, id: u64) -> ServiceResult<Worker>;
    /// Replaces a worker's fields. The hire date cannot change.
    fn update_worker(&self, id: u64, worker: NewWorker) -> ServiceResult<Worker>;
    /// Deletes a worker together with all of its exam records.
    fn delete_worker(&self, id: u64) -> ServiceResult<()>;
    /// Lists workers matching the filter in id order.
    fn workers(&self, filter: WorkerFilter) -> ServiceResult<Vec<Worker>>;

    /// Records an examination for an existing worker.
    fn create_exam(&self, exam: NewExamRecord) -> ServiceResult<ExamRecord>;
    /// Fetches an exam record by id.
    fn exam(&self, id: u64) -> ServiceResult<ExamRecord>;
    /// Administrative edit of an exam record.
    fn update_exam(&self, id: u64, exam: NewExamRecord) -> ServiceResult<ExamRecord>;
    /// Deletes an exam record.
    fn delete_exam(&self, id: u64) -> ServiceResult<()>;
    /// Lists a worker's exam records ordered by exam date.
    fn exams_for(&self, worker_id: u64) -> ServiceResult<Vec<ExamRecord>>;

    /// Fetches one worker, active or not, with its employer name and exam
    /// history as a single consistent read.
    fn worker_snapshot(&self, worker_id: u64) -> ServiceResult<WorkerSnapshot>;

    /// Fetches every active worker with its employer name and exam history
    /// in a single batch.
    fn active_worker_snapshots(&self) -> ServiceResult<Vec<WorkerSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn worker(is_active: bool, employer_id: u64) -> Worker {
        Worker {
            id: 1,
            arc_number: "AC00000001".to_string(),
            passport_number: "P0000001".to_string(),
            full_name: "Worker 1".to_string(),
            nationality: "Indonesia".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            employer_id,
            is_active,
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = WorkerFilter::default();
        assert!(filter.matches(&worker(true, 1)));
        assert!(filter.matches(&worker(false, 2)));
    }

    #[test]
    fn test_active_filter() {
        let filter = WorkerFilter::active();
        assert!(filter.matches(&worker(true, 1)));
        assert!(!filter.matches(&worker(false, 1)));
    }

    #[test]
    fn test_employer_filter_combines_with_active() {
        let filter = WorkerFilter {
            is_active: Some(true),
            employer_id: Some(2),
        };
        assert!(filter.matches(&worker(true, 2)));
        assert!(!filter.matches(&worker(true, 1)));
        assert!(!filter.matches(&worker(false, 2)));
    }

    #[test]
    fn test_store_is_object_safe() {
        fn assert_object_safe(_: Option<&dyn RecordStore>) {}
        assert_object_safe(None);
    }
}

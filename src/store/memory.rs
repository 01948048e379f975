//! In-memory implementation of [`RecordStore`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    Employer, ExamRecord, NewEmployer, NewExamRecord, NewWorker, Worker, WorkerSnapshot,
};

use super::{RecordStore, WorkerFilter};

#[derive(Debug, Default)]
struct Tables {
    employers: BTreeMap<u64, Employer>,
    workers: BTreeMap<u64, Worker>,
    exams: BTreeMap<u64, ExamRecord>,
    last_employer_id: u64,
    last_worker_id: u64,
    last_exam_id: u64,
}

impl Tables {
    fn check_tax_id(&self, tax_id: &str, except: Option<u64>) -> ServiceResult<()> {
        let taken = self
            .employers
            .values()
            .any(|e| e.tax_id == tax_id && Some(e.id) != except);
        if taken {
            return Err(ServiceError::DuplicateTaxId {
                tax_id: tax_id.to_string(),
            });
        }
        Ok(())
    }

    fn check_arc_number(&self, arc_number: &str, except: Option<u64>) -> ServiceResult<()> {
        let taken = self
            .workers
            .values()
            .any(|w| w.arc_number == arc_number && Some(w.id) != except);
        if taken {
            return Err(ServiceError::DuplicateArcNumber {
                arc_number: arc_number.to_string(),
            });
        }
        Ok(())
    }

    fn check_employer_exists(&self, id: u64) -> ServiceResult<()> {
        if !self.employers.contains_key(&id) {
            return Err(ServiceError::EmployerNotFound { id });
        }
        Ok(())
    }

    fn check_worker_exists(&self, id: u64) -> ServiceResult<()> {
        if !self.workers.contains_key(&id) {
            return Err(ServiceError::WorkerNotFound { id });
        }
        Ok(())
    }

    fn check_exam_unique(&self, exam: &NewExamRecord, except: Option<u64>) -> ServiceResult<()> {
        let taken = self.exams.values().any(|e| {
            e.worker_id == exam.worker_id
                && e.exam_type == exam.exam_type
                && e.exam_date == exam.exam_date
                && Some(e.id) != except
        });
        if taken {
            return Err(ServiceError::DuplicateExam {
                worker_id: exam.worker_id,
                exam_type: exam.exam_type,
                exam_date: exam.exam_date,
            });
        }
        Ok(())
    }
}

/// A [`RecordStore`] keeping every table in process memory.
///
/// All tables sit behind a single lock so that multi-table invariants
/// (restrict, cascade, uniqueness) are checked and applied atomically.
///
/// # Example
///
/// ```
/// use exam_compliance::models::{NewEmployer, NewWorker};
/// use exam_compliance::store::{InMemoryStore, RecordStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// let employer = store.create_employer(NewEmployer {
///     company_name: "Formosa Precision Ltd.".to_string(),
///     tax_id: "12345678".to_string(),
///     contact_person: None,
///     phone: None,
/// })?;
/// let worker = store.create_worker(NewWorker {
///     arc_number: "AC00000001".to_string(),
///     passport_number: "P1234567".to_string(),
///     full_name: "Nguyen Van An".to_string(),
///     nationality: "Vietnam".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     employer_id: employer.id,
///     is_active: true,
/// })?;
///
/// // The employer is referenced, so it cannot be deleted
/// assert!(store.delete_employer(employer.id).is_err());
/// store.delete_worker(worker.id)?;
/// store.delete_employer(employer.id)?;
/// # Ok::<(), exam_compliance::error::ServiceError>(())
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| ServiceError::StoreUnavailable {
            message: e.to_string(),
        })
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| ServiceError::StoreUnavailable {
            message: e.to_string(),
        })
    }
}

fn sort_by_exam_date(exams: &mut [ExamRecord]) {
    exams.sort_by_key(|e| (e.exam_date, e.id));
}

impl RecordStore for InMemoryStore {
    fn create_employer(&self, employer: NewEmployer) -> ServiceResult<Employer> {
        let mut tables = self.write()?;
        tables.check_tax_id(&employer.tax_id, None)?;

        tables.last_employer_id += 1;
        let record = employer.into_record(tables.last_employer_id);
        tables.employers.insert(record.id, record.clone());

        debug!(employer_id = record.id, tax_id = %record.tax_id, "Created employer");
        Ok(record)
    }

    fn employer(&self, id: u64) -> ServiceResult<Employer> {
        self.read()?
            .employers
            .get(&id)
            .cloned()
            .ok_or(ServiceError::EmployerNotFound { id })
    }

    fn update_employer(&self, id: u64, employer: NewEmployer) -> ServiceResult<Employer> {
        let mut tables = self.write()?;
        tables.check_employer_exists(id)?;
        tables.check_tax_id(&employer.tax_id, Some(id))?;

        let record = employer.into_record(id);
        tables.employers.insert(id, record.clone());

        debug!(employer_id = id, "Updated employer");
        Ok(record)
    }

    fn delete_employer(&self, id: u64) -> ServiceResult<()> {
        let mut tables = self.write()?;
        tables.check_employer_exists(id)?;

        let worker_count = tables
            .workers
            .values()
            .filter(|w| w.employer_id == id)
            .count();
        if worker_count > 0 {
            return Err(ServiceError::EmployerInUse { id, worker_count });
        }

        tables.employers.remove(&id);
        debug!(employer_id = id, "Deleted employer");
        Ok(())
    }

    fn employers(&self) -> ServiceResult<Vec<Employer>> {
        Ok(self.read()?.employers.values().cloned().collect())
    }

    fn create_worker(&self, worker: NewWorker) -> ServiceResult<Worker> {
        let mut tables = self.write()?;
        tables.check_employer_exists(worker.employer_id)?;
        tables.check_arc_number(&worker.arc_number, None)?;

        tables.last_worker_id += 1;
        let record = worker.into_record(tables.last_worker_id);
        tables.workers.insert(record.id, record.clone());

        debug!(
            worker_id = record.id,
            employer_id = record.employer_id,
            hire_date = %record.hire_date,
            "Created worker"
        );
        Ok(record)
    }

    fn worker(&self, id: u64) -> ServiceResult<Worker> {
        self.read()?
            .workers
            .get(&id)
            .cloned()
            .ok_or(ServiceError::WorkerNotFound { id })
    }

    fn update_worker(&self, id: u64, worker: NewWorker) -> ServiceResult<Worker> {
        let mut tables = self.write()?;
        let current_hire_date = tables
            .workers
            .get(&id)
            .map(|w| w.hire_date)
            .ok_or(ServiceError::WorkerNotFound { id })?;

        if worker.hire_date != current_hire_date {
            return Err(ServiceError::HireDateImmutable { worker_id: id });
        }
        tables.check_employer_exists(worker.employer_id)?;
        tables.check_arc_number(&worker.arc_number, Some(id))?;

        let record = worker.into_record(id);
        tables.workers.insert(id, record.clone());

        debug!(worker_id = id, is_active = record.is_active, "Updated worker");
        Ok(record)
    }

    fn delete_worker(&self, id: u64) -> ServiceResult<()> {
        let mut tables = self.write()?;
        tables.check_worker_exists(id)?;

        tables.workers.remove(&id);
        let before = tables.exams.len();
        tables.exams.retain(|_, exam| exam.worker_id != id);
        let cascaded = before - tables.exams.len();

        debug!(worker_id = id, cascaded_exams = cascaded, "Deleted worker");
        Ok(())
    }

    fn workers(&self, filter: WorkerFilter) -> ServiceResult<Vec<Worker>> {
        Ok(self
            .read()?
            .workers
            .values()
            .filter(|w| filter.matches(w))
            .cloned()
            .collect())
    }

    fn create_exam(&self, exam: NewExamRecord) -> ServiceResult<ExamRecord> {
        let mut tables = self.write()?;
        tables.check_worker_exists(exam.worker_id)?;
        tables.check_exam_unique(&exam, None)?;

        tables.last_exam_id += 1;
        let record = exam.into_record(tables.last_exam_id);
        tables.exams.insert(record.id, record.clone());

        debug!(
            exam_id = record.id,
            worker_id = record.worker_id,
            exam_type = %record.exam_type,
            exam_date = %record.exam_date,
            "Recorded exam"
        );
        Ok(record)
    }

    fn exam(&self, id: u64) -> ServiceResult<ExamRecord> {
        self.read()?
            .exams
            .get(&id)
            .cloned()
            .ok_or(ServiceError::ExamNotFound { id })
    }

    fn update_exam(&self, id: u64, exam: NewExamRecord) -> ServiceResult<ExamRecord> {
        let mut tables = self.write()?;
        if !tables.exams.contains_key(&id) {
            return Err(ServiceError::ExamNotFound { id });
        }
        tables.check_worker_exists(exam.worker_id)?;
        tables.check_exam_unique(&exam, Some(id))?;

        let record = exam.into_record(id);
        tables.exams.insert(id, record.clone());

        debug!(exam_id = id, report_status = ?record.report_status, "Updated exam");
        Ok(record)
    }

    fn delete_exam(&self, id: u64) -> ServiceResult<()> {
        let mut tables = self.write()?;
        tables
            .exams
            .remove(&id)
            .ok_or(ServiceError::ExamNotFound { id })?;

        debug!(exam_id = id, "Deleted exam");
        Ok(())
    }

    fn exams_for(&self, worker_id: u64) -> ServiceResult<Vec<ExamRecord>> {
        let tables = self.read()?;
        tables.check_worker_exists(worker_id)?;

        let mut exams: Vec<ExamRecord> = tables
            .exams
            .values()
            .filter(|e| e.worker_id == worker_id)
            .cloned()
            .collect();
        sort_by_exam_date(&mut exams);
        Ok(exams)
    }

    fn worker_snapshot(&self, worker_id: u64) -> ServiceResult<WorkerSnapshot> {
        let tables = self.read()?;
        let worker = tables
            .workers
            .get(&worker_id)
            .ok_or(ServiceError::WorkerNotFound { id: worker_id })?;
        let employer = tables.employers.get(&worker.employer_id).ok_or(
            ServiceError::EmployerNotFound {
                id: worker.employer_id,
            },
        )?;

        let mut exams: Vec<ExamRecord> = tables
            .exams
            .values()
            .filter(|e| e.worker_id == worker_id)
            .cloned()
            .collect();
        sort_by_exam_date(&mut exams);

        Ok(WorkerSnapshot {
            worker: worker.clone(),
            employer_name: employer.company_name.clone(),
            exams,
        })
    }

    fn active_worker_snapshots(&self) -> ServiceResult<Vec<WorkerSnapshot>> {
        let tables = self.read()?;

        let mut exams_by_worker: HashMap<u64, Vec<ExamRecord>> = HashMap::new();
        for exam in tables.exams.values() {
            exams_by_worker
                .entry(exam.worker_id)
                .or_default()
                .push(exam.clone());
        }

        tables
            .workers
            .values()
            .filter(|w| w.is_active)
            .map(|worker| {
                let employer = tables.employers.get(&worker.employer_id).ok_or(
                    ServiceError::EmployerNotFound {
                        id: worker.employer_id,
                    },
                )?;
                let mut exams = exams_by_worker.remove(&worker.id).unwrap_or_default();
                sort_by_exam_date(&mut exams);

                Ok(WorkerSnapshot {
                    worker: worker.clone(),
                    employer_name: employer.company_name.clone(),
                    exams,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExamType, ReportStatus};
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn new_employer(tax_id: &str) -> NewEmployer {
        NewEmployer {
            company_name: format!("Company {}", tax_id),
            tax_id: tax_id.to_string(),
            contact_person: None,
            phone: None,
        }
    }

    fn new_worker(arc_number: &str, employer_id: u64) -> NewWorker {
        NewWorker {
            arc_number: arc_number.to_string(),
            passport_number: "P0000001".to_string(),
            full_name: format!("Worker {}", arc_number),
            nationality: "Philippines".to_string(),
            hire_date: make_date("2024-01-31"),
            employer_id,
            is_active: true,
        }
    }

    fn new_exam(worker_id: u64, exam_type: ExamType, date_str: &str) -> NewExamRecord {
        NewExamRecord {
            worker_id,
            exam_type,
            exam_date: make_date(date_str),
            report_status: ReportStatus::Passed,
            expiry_date: None,
            facility_name: Some("Kaohsiung Medical Center".to_string()),
            report_document_url: None,
        }
    }

    fn seeded() -> (InMemoryStore, Employer, Worker) {
        let store = InMemoryStore::new();
        let employer = store.create_employer(new_employer("11111111")).unwrap();
        let worker = store
            .create_worker(new_worker("AC00000001", employer.id))
            .unwrap();
        (store, employer, worker)
    }

    // ==========================================================================
    // Employers
    // ==========================================================================
    #[test]
    fn test_create_employer_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let first = store.create_employer(new_employer("11111111")).unwrap();
        let second = store.create_employer(new_employer("22222222")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.employers().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_tax_id_is_rejected() {
        let store = InMemoryStore::new();
        store.create_employer(new_employer("11111111")).unwrap();

        let result = store.create_employer(new_employer("11111111"));
        assert!(matches!(result, Err(ServiceError::DuplicateTaxId { .. })));
    }

    #[test]
    fn test_update_employer_keeps_own_tax_id() {
        let (store, employer, _) = seeded();
        let mut changes = new_employer("11111111");
        changes.phone = Some("02-2345-6789".to_string());

        let updated = store.update_employer(employer.id, changes).unwrap();
        assert_eq!(updated.phone.as_deref(), Some("02-2345-6789"));
        assert_eq!(store.employer(employer.id).unwrap(), updated);
    }

    #[test]
    fn test_delete_referenced_employer_is_restricted() {
        let (store, employer, _) = seeded();

        match store.delete_employer(employer.id) {
            Err(ServiceError::EmployerInUse { id, worker_count }) => {
                assert_eq!(id, employer.id);
                assert_eq!(worker_count, 1);
            }
            other => panic!("Expected EmployerInUse, got {:?}", other),
        }
        assert!(store.employer(employer.id).is_ok());
    }

    #[test]
    fn test_delete_unreferenced_employer() {
        let store = InMemoryStore::new();
        let employer = store.create_employer(new_employer("11111111")).unwrap();

        store.delete_employer(employer.id).unwrap();
        assert!(matches!(
            store.employer(employer.id),
            Err(ServiceError::EmployerNotFound { .. })
        ));
    }

    // ==========================================================================
    // Workers
    // ==========================================================================
    #[test]
    fn test_create_worker_requires_existing_employer() {
        let store = InMemoryStore::new();
        let result = store.create_worker(new_worker("AC00000001", 99));
        assert!(matches!(
            result,
            Err(ServiceError::EmployerNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_duplicate_arc_number_is_rejected() {
        let (store, employer, _) = seeded();
        let result = store.create_worker(new_worker("AC00000001", employer.id));
        assert!(matches!(
            result,
            Err(ServiceError::DuplicateArcNumber { .. })
        ));
    }

    #[test]
    fn test_update_worker_cannot_change_hire_date() {
        let (store, employer, worker) = seeded();
        let mut changes = new_worker("AC00000001", employer.id);
        changes.hire_date = make_date("2024-02-01");

        let result = store.update_worker(worker.id, changes);
        assert!(matches!(
            result,
            Err(ServiceError::HireDateImmutable { .. })
        ));
        assert_eq!(
            store.worker(worker.id).unwrap().hire_date,
            make_date("2024-01-31")
        );
    }

    #[test]
    fn test_update_worker_deactivates() {
        let (store, employer, worker) = seeded();
        let mut changes = new_worker("AC00000001", employer.id);
        changes.is_active = false;

        let updated = store.update_worker(worker.id, changes).unwrap();
        assert!(!updated.is_active);
        assert!(store.workers(WorkerFilter::active()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_worker_cascades_exams() {
        let (store, _, worker) = seeded();
        let exam = store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();

        store.delete_worker(worker.id).unwrap();

        assert!(matches!(
            store.exam(exam.id),
            Err(ServiceError::ExamNotFound { .. })
        ));
        assert!(matches!(
            store.worker(worker.id),
            Err(ServiceError::WorkerNotFound { .. })
        ));
    }

    #[test]
    fn test_workers_filtered_by_employer() {
        let (store, first, _) = seeded();
        let second = store.create_employer(new_employer("22222222")).unwrap();
        store
            .create_worker(new_worker("AC00000002", second.id))
            .unwrap();

        let filter = WorkerFilter {
            employer_id: Some(first.id),
            ..WorkerFilter::default()
        };
        let workers = store.workers(filter).unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].arc_number, "AC00000001");
        assert_eq!(store.workers(WorkerFilter::default()).unwrap().len(), 2);
    }

    // ==========================================================================
    // Exams
    // ==========================================================================
    #[test]
    fn test_create_exam_requires_existing_worker() {
        let store = InMemoryStore::new();
        let result = store.create_exam(new_exam(5, ExamType::Entry, "2024-01-31"));
        assert!(matches!(result, Err(ServiceError::WorkerNotFound { id: 5 })));
    }

    #[test]
    fn test_duplicate_exam_triple_is_rejected() {
        let (store, _, worker) = seeded();
        store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();

        let result = store.create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"));
        assert!(matches!(result, Err(ServiceError::DuplicateExam { .. })));
    }

    #[test]
    fn test_same_date_different_type_is_allowed() {
        let (store, _, worker) = seeded();
        store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();
        store
            .create_exam(new_exam(worker.id, ExamType::Other, "2024-01-31"))
            .unwrap();

        assert_eq!(store.exams_for(worker.id).unwrap().len(), 2);
    }

    #[test]
    fn test_update_exam_enforces_uniqueness() {
        let (store, _, worker) = seeded();
        store
            .create_exam(new_exam(worker.id, ExamType::Month6, "2024-07-31"))
            .unwrap();
        let second = store
            .create_exam(new_exam(worker.id, ExamType::Month6, "2024-08-05"))
            .unwrap();

        let result = store.update_exam(
            second.id,
            new_exam(worker.id, ExamType::Month6, "2024-07-31"),
        );
        assert!(matches!(result, Err(ServiceError::DuplicateExam { .. })));
    }

    #[test]
    fn test_update_exam_changes_status() {
        let (store, _, worker) = seeded();
        let exam = store
            .create_exam(new_exam(worker.id, ExamType::Month6, "2024-07-31"))
            .unwrap();

        let mut changes = new_exam(worker.id, ExamType::Month6, "2024-07-31");
        changes.report_status = ReportStatus::PendingRetest;

        let updated = store.update_exam(exam.id, changes).unwrap();
        assert_eq!(updated.report_status, ReportStatus::PendingRetest);
        assert_eq!(updated.id, exam.id);
    }

    #[test]
    fn test_delete_exam() {
        let (store, _, worker) = seeded();
        let exam = store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();

        store.delete_exam(exam.id).unwrap();
        assert!(store.exams_for(worker.id).unwrap().is_empty());
        assert!(store.delete_exam(exam.id).is_err());
    }

    #[test]
    fn test_exams_for_orders_by_date() {
        let (store, _, worker) = seeded();
        store
            .create_exam(new_exam(worker.id, ExamType::Month6, "2024-07-31"))
            .unwrap();
        store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();

        let dates: Vec<NaiveDate> = store
            .exams_for(worker.id)
            .unwrap()
            .iter()
            .map(|e| e.exam_date)
            .collect();
        assert_eq!(dates, vec![make_date("2024-01-31"), make_date("2024-07-31")]);
    }

    // ==========================================================================
    // Snapshots
    // ==========================================================================
    #[test]
    fn test_snapshots_include_only_active_workers_with_their_exams() {
        let (store, employer, first) = seeded();
        let mut inactive = new_worker("AC00000002", employer.id);
        inactive.is_active = false;
        let inactive = store.create_worker(inactive).unwrap();
        let third = store
            .create_worker(new_worker("AC00000003", employer.id))
            .unwrap();

        store
            .create_exam(new_exam(first.id, ExamType::Entry, "2024-01-31"))
            .unwrap();
        store
            .create_exam(new_exam(inactive.id, ExamType::Entry, "2024-01-31"))
            .unwrap();
        store
            .create_exam(new_exam(third.id, ExamType::Entry, "2024-02-01"))
            .unwrap();
        store
            .create_exam(new_exam(third.id, ExamType::Other, "2024-01-15"))
            .unwrap();

        let snapshots = store.active_worker_snapshots().unwrap();
        let ids: Vec<u64> = snapshots.iter().map(|s| s.worker.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);

        assert_eq!(snapshots[0].exams_for().len(), 1);
        assert_eq!(snapshots[1].exams_for().len(), 2);
        assert_eq!(snapshots[1].exams_for()[0].exam_type, ExamType::Other);
        assert!(snapshots.iter().all(|s| s.employer_name == "Company 11111111"));
    }

    #[test]
    fn test_worker_snapshot_reflects_current_employer_and_exams() {
        let (store, old_employer, worker) = seeded();
        let second = store.create_employer(new_employer("22222222")).unwrap();
        store
            .create_exam(new_exam(worker.id, ExamType::Month6, "2024-07-31"))
            .unwrap();
        store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();

        let mut moved = new_worker("AC00000001", second.id);
        moved.is_active = false;
        store.update_worker(worker.id, moved).unwrap();
        store.delete_employer(old_employer.id).unwrap();

        let snapshot = store.worker_snapshot(worker.id).unwrap();
        assert!(!snapshot.worker.is_active);
        assert_eq!(snapshot.employer_name, "Company 22222222");
        let types: Vec<ExamType> = snapshot.exams_for().iter().map(|e| e.exam_type).collect();
        assert_eq!(types, vec![ExamType::Entry, ExamType::Month6]);
    }

    #[test]
    fn test_worker_snapshot_for_deleted_worker_is_not_found() {
        let (store, _, worker) = seeded();
        store
            .create_exam(new_exam(worker.id, ExamType::Entry, "2024-01-31"))
            .unwrap();
        store.delete_worker(worker.id).unwrap();

        let result = store.worker_snapshot(worker.id);
        assert!(matches!(result, Err(ServiceError::WorkerNotFound { id }) if id == worker.id));
    }
}

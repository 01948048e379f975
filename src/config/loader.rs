//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files and seeding a record store from the roster.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewEmployer, NewExamRecord, NewWorker};
use crate::store::RecordStore;

use super::types::{AccessToken, AccessTokens, Roster, ServiceConfig, ServiceSettings};

const ROSTER_FILE: &str = "roster.yaml";

/// Counts of records created while seeding a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Employers created.
    pub employers: usize,
    /// Workers created.
    pub workers: usize,
    /// Exam records created.
    pub exams: usize,
}

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── service.yaml        # Bind address, log level, optional fixed date
/// ├── access_tokens.yaml  # API tokens and their users
/// └── roster.yaml         # Optional seed employers, workers, and exams
/// ```
///
/// # Example
///
/// ```no_run
/// use exam_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Binding to {}", loader.settings().bind_address);
/// # Ok::<(), exam_compliance::error::ServiceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `service.yaml` and `access_tokens.yaml` are required; `roster.yaml`
    /// is optional.
    pub fn load<P: AsRef<Path>>(path: P) -> ServiceResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<ServiceSettings>(&path.join("service.yaml"))?;
        let tokens = Self::load_yaml::<AccessTokens>(&path.join("access_tokens.yaml"))?;

        let roster_path = path.join(ROSTER_FILE);
        let roster = if roster_path.exists() {
            Self::load_yaml::<Roster>(&roster_path)?
        } else {
            Roster::default()
        };

        Ok(Self {
            config: ServiceConfig::new(settings, tokens, roster),
        })
    }

    /// Wraps an already assembled configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ServiceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ServiceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ServiceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &ServiceSettings {
        self.config.settings()
    }

    /// Returns the fixed evaluation date, if one is configured.
    pub fn fixed_today(&self) -> Option<NaiveDate> {
        self.config.settings().today
    }

    /// Looks up an access token by key.
    pub fn token(&self, key: &str) -> Option<&AccessToken> {
        self.config.tokens().find(key)
    }

    /// Creates every roster record in the store.
    ///
    /// Records go through the store's regular create operations, so all of
    /// its invariants apply. Workers reference employers by tax id and exams
    /// reference workers by ARC number.
    pub fn seed(&self, store: &dyn RecordStore) -> ServiceResult<SeedSummary> {
        let roster = self.config.roster();
        let mut summary = SeedSummary::default();

        let mut employer_ids: HashMap<&str, u64> = HashMap::new();
        for entry in &roster.employers {
            let employer = store.create_employer(NewEmployer {
                company_name: entry.company_name.clone(),
                tax_id: entry.tax_id.clone(),
                contact_person: entry.contact_person.clone(),
                phone: entry.phone.clone(),
            })?;
            employer_ids.insert(entry.tax_id.as_str(), employer.id);
            summary.employers += 1;
        }

        let mut worker_ids: HashMap<&str, u64> = HashMap::new();
        for entry in &roster.workers {
            let employer_id = *employer_ids
                .get(entry.employer_tax_id.as_str())
                .ok_or_else(|| {
                    roster_error(format!(
                        "worker '{}' references unknown employer tax id '{}'",
                        entry.arc_number, entry.employer_tax_id
                    ))
                })?;

            let worker = store.create_worker(NewWorker {
                arc_number: entry.arc_number.clone(),
                passport_number: entry.passport_number.clone(),
                full_name: entry.full_name.clone(),
                nationality: entry.nationality.clone(),
                hire_date: entry.hire_date,
                employer_id,
                is_active: entry.is_active,
            })?;
            worker_ids.insert(entry.arc_number.as_str(), worker.id);
            summary.workers += 1;
        }

        for entry in &roster.exams {
            let worker_id = *worker_ids.get(entry.arc_number.as_str()).ok_or_else(|| {
                roster_error(format!(
                    "exam references unknown ARC number '{}'",
                    entry.arc_number
                ))
            })?;

            store.create_exam(NewExamRecord {
                worker_id,
                exam_type: entry.exam_type,
                exam_date: entry.exam_date,
                report_status: entry.report_status,
                expiry_date: entry.expiry_date,
                facility_name: entry.facility_name.clone(),
                report_document_url: entry.report_document_url.clone(),
            })?;
            summary.exams += 1;
        }

        info!(
            employers = summary.employers,
            workers = summary.workers,
            exams = summary.exams,
            "Seeded record store from roster"
        );
        Ok(summary)
    }
}

fn roster_error(message: String) -> ServiceError {
    ServiceError::ConfigParseError {
        path: ROSTER_FILE.to_string(),
        message,
    }
}

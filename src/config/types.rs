//! Configuration types for the exam compliance service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{ExamType, ReportStatus};

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_active() -> bool {
    true
}

/// Service settings from `service.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed evaluation date. When unset the local calendar date is used.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            log_level: default_log_level(),
            today: None,
        }
    }
}

/// An API token provisioned for a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// The opaque token value presented in the `Authorization` header.
    pub key: String,
    /// The user the token belongs to.
    pub username: String,
    /// Whether the user holds administrator rights.
    #[serde(default)]
    pub is_admin: bool,
}

/// Token registry from `access_tokens.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessTokens {
    /// Every provisioned token.
    #[serde(default)]
    pub tokens: Vec<AccessToken>,
}

impl AccessTokens {
    /// Looks up a token by its key.
    pub fn find(&self, key: &str) -> Option<&AccessToken> {
        self.tokens.iter().find(|token| token.key == key)
    }
}

/// An employer entry in `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEmployer {
    /// The registered company name.
    pub company_name: String,
    /// The company's tax registration number; workers refer to it.
    pub tax_id: String,
    /// Name of the contact person.
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// A worker entry in `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterWorker {
    /// Resident certificate number; exams refer to it.
    pub arc_number: String,
    /// Passport number.
    pub passport_number: String,
    /// Full legal name.
    pub full_name: String,
    /// Nationality.
    pub nationality: String,
    /// The first day of employment.
    pub hire_date: NaiveDate,
    /// Tax id of the employer.
    pub employer_tax_id: String,
    /// Whether the worker is currently employed.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// An exam entry in `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterExam {
    /// Resident certificate number of the examined worker.
    pub arc_number: String,
    /// The kind of examination.
    pub exam_type: ExamType,
    /// The date the examination took place.
    pub exam_date: NaiveDate,
    /// The reported outcome.
    pub report_status: ReportStatus,
    /// The date the result stops being valid.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// The hospital or clinic.
    #[serde(default)]
    pub facility_name: Option<String>,
    /// Reference to the report document.
    #[serde(default)]
    pub report_document_url: Option<String>,
}

/// Seed data from `roster.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    /// Employers to create.
    #[serde(default)]
    pub employers: Vec<RosterEmployer>,
    /// Workers to create.
    #[serde(default)]
    pub workers: Vec<RosterWorker>,
    /// Exam records to create.
    #[serde(default)]
    pub exams: Vec<RosterExam>,
}

/// The complete service configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    settings: ServiceSettings,
    tokens: AccessTokens,
    roster: Roster,
}

impl ServiceConfig {
    /// Creates a new ServiceConfig from its component parts.
    pub fn new(settings: ServiceSettings, tokens: AccessTokens, roster: Roster) -> Self {
        Self {
            settings,
            tokens,
            roster,
        }
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Returns the token registry.
    pub fn tokens(&self) -> &AccessTokens {
        &self.tokens
    }

    /// Returns the seed roster (empty when no roster file exists).
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

//! Employer model.

use serde::{Deserialize, Serialize};

/// A company employing migrant workers.
///
/// The tax id is unique across employers. An employer cannot be deleted
/// while workers still reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// The registered company name.
    pub company_name: String,
    /// The company's tax registration number.
    pub tax_id: String,
    /// Name of the contact person.
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Input for creating or editing an employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployer {
    /// The registered company name.
    pub company_name: String,
    /// The company's tax registration number.
    pub tax_id: String,
    /// Name of the contact person.
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewEmployer {
    /// Materializes the input as a stored record with the given id.
    pub fn into_record(self, id: u64) -> Employer {
        Employer {
            id,
            company_name: self.company_name,
            tax_id: self.tax_id,
            contact_person: self.contact_person,
            phone: self.phone,
        }
    }
}

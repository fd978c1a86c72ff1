//! DTOs returned by the clinical history endpoints.

use serde::Serialize;

use crate::domain::clinical_record::ClinicalRecord;
use crate::domain::patient::Patient;
use crate::pagination::Paged;

/// A patient's header data and one page of their clinical history.
#[derive(Debug, Serialize)]
pub struct PatientRecordsPageData {
    pub patient: Patient,
    pub records: Paged<ClinicalRecord>,
}

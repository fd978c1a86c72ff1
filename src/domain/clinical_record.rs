use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::patient::Patient;
use crate::domain::types::{ClinicalRecordId, PatientId, RecordMessage};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecord {
    pub id: ClinicalRecordId,
    pub patient_id: PatientId,
    /// Sanitized rich-text body.
    pub message: RecordMessage,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewClinicalRecord {
    pub patient_id: PatientId,
    pub message: RecordMessage,
    pub created_at: NaiveDateTime,
}

impl NewClinicalRecord {
    #[must_use]
    pub fn new(patient_id: PatientId, message: RecordMessage) -> Self {
        Self {
            patient_id,
            message,
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// A clinical record listed together with the patient it belongs to.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecordEntry {
    pub record: ClinicalRecord,
    pub patient: Patient,
}

//! Form for registering a clinical visit.

use serde::Deserialize;

use crate::domain::clinical_record::NewClinicalRecord;
use crate::domain::types::{PatientId, RecordMessage};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Rich-text body produced by the record editor.
pub struct CreateRecordForm {
    #[serde(default)]
    pub message: String,
}

impl CreateRecordForm {
    pub fn into_domain(self, patient_id: PatientId) -> Result<NewClinicalRecord, FormError> {
        let message = RecordMessage::new(self.message).map_err(|_| FormError::EmptyMessage)?;
        Ok(NewClinicalRecord::new(patient_id, message))
    }
}

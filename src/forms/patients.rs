//! Forms for creating and renaming patients.

use serde::Deserialize;
use validator::Validate;

use crate::domain::patient::{NewPatient, UpdatePatient};
use crate::domain::types::{
    DocumentType, DocumentValue, DoctorId, PatientEmail, PatientName, PatientSurname,
};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload submitted by the create-patient modal.
pub struct CreatePatientForm {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(max = 256))]
    pub surname: Option<String>,
    pub document_type: Option<String>,
    pub document_value: Option<String>,
    pub email: Option<String>,
}

/// Validated patient data ready to be bound to a doctor.
#[derive(Debug)]
pub struct CreatePatientPayload {
    pub name: PatientName,
    pub surname: Option<PatientSurname>,
    pub document_type: Option<DocumentType>,
    pub document_value: Option<DocumentValue>,
    pub email: Option<PatientEmail>,
}

/// Treats blank optional inputs as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<CreatePatientForm> for CreatePatientPayload {
    type Error = FormError;

    fn try_from(form: CreatePatientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = PatientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let surname = non_blank(form.surname)
            .map(PatientSurname::new)
            .transpose()
            .map_err(|_| FormError::InvalidSurname)?;
        let document_type = non_blank(form.document_type)
            .map(|value| value.parse::<DocumentType>())
            .transpose()
            .map_err(|_| FormError::InvalidDocumentType)?;
        let document_value = non_blank(form.document_value)
            .map(DocumentValue::new)
            .transpose()
            .map_err(|_| FormError::InvalidDocumentValue)?;
        let email = non_blank(form.email)
            .map(PatientEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;

        Ok(Self {
            name,
            surname,
            document_type,
            document_value,
            email,
        })
    }
}

impl CreatePatientPayload {
    pub fn into_domain(self, doctor_id: DoctorId) -> NewPatient {
        NewPatient::new(
            doctor_id,
            self.name,
            self.surname,
            self.document_type,
            self.document_value,
            self.email,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Payload submitted by the edit-patient modal.
pub struct RenamePatientForm {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

impl TryFrom<RenamePatientForm> for UpdatePatient {
    type Error = FormError;

    fn try_from(form: RenamePatientForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = PatientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        Ok(UpdatePatient::new(name))
    }
}

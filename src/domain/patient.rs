use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DocumentType, DocumentValue, DoctorId, PatientEmail, PatientId, PatientName, PatientSurname,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub doctor_id: DoctorId,
    pub name: PatientName,
    pub surname: Option<PatientSurname>,
    pub document_type: Option<DocumentType>,
    pub document_value: Option<DocumentValue>,
    pub email: Option<PatientEmail>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPatient {
    pub doctor_id: DoctorId,
    pub name: PatientName,
    pub surname: Option<PatientSurname>,
    pub document_type: Option<DocumentType>,
    pub document_value: Option<DocumentValue>,
    pub email: Option<PatientEmail>,
    pub created_at: NaiveDateTime,
}

impl NewPatient {
    #[must_use]
    pub fn new(
        doctor_id: DoctorId,
        name: PatientName,
        surname: Option<PatientSurname>,
        document_type: Option<DocumentType>,
        document_value: Option<DocumentValue>,
        email: Option<PatientEmail>,
    ) -> Self {
        Self {
            doctor_id,
            name,
            surname,
            document_type,
            document_value,
            email,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdatePatient {
    pub name: PatientName,
    pub updated_at: NaiveDateTime,
}

impl UpdatePatient {
    #[must_use]
    pub fn new(name: PatientName) -> Self {
        Self {
            name,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

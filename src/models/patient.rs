//! Diesel models for patients.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::patient::{
    NewPatient as DomainNewPatient, Patient as DomainPatient, UpdatePatient as DomainUpdatePatient,
};
use crate::domain::types::{
    DocumentType, DocumentValue, DoctorId, PatientEmail, PatientId, PatientName, PatientSurname,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::patients)]
/// Diesel model for [`crate::domain::patient::Patient`].
pub struct Patient {
    pub id: i32,
    pub doctor_id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub document_type: Option<String>,
    pub document_value: Option<String>,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::patients)]
/// Insertable form of [`Patient`].
pub struct NewPatient<'a> {
    pub doctor_id: i32,
    pub name: &'a str,
    pub surname: Option<&'a str>,
    pub document_type: Option<&'a str>,
    pub document_value: Option<&'a str>,
    pub email: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::patients)]
/// Data used when renaming a [`Patient`].
pub struct UpdatePatient<'a> {
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Patient> for DomainPatient {
    type Error = TypeConstraintError;

    fn try_from(patient: Patient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PatientId::new(patient.id)?,
            doctor_id: DoctorId::new(patient.doctor_id)?,
            name: PatientName::new(patient.name)?,
            surname: patient.surname.map(PatientSurname::new).transpose()?,
            document_type: patient
                .document_type
                .as_deref()
                .map(str::parse::<DocumentType>)
                .transpose()?,
            document_value: patient.document_value.map(DocumentValue::new).transpose()?,
            email: patient.email.map(PatientEmail::new).transpose()?,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPatient> for NewPatient<'a> {
    fn from(patient: &'a DomainNewPatient) -> Self {
        Self {
            doctor_id: patient.doctor_id.get(),
            name: patient.name.as_str(),
            surname: patient.surname.as_ref().map(PatientSurname::as_str),
            document_type: patient.document_type.map(DocumentType::as_str),
            document_value: patient.document_value.as_ref().map(DocumentValue::as_str),
            email: patient.email.as_ref().map(PatientEmail::as_str),
            created_at: patient.created_at,
            updated_at: patient.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdatePatient> for UpdatePatient<'a> {
    fn from(update: &'a DomainUpdatePatient) -> Self {
        Self {
            name: update.name.as_str(),
            updated_at: update.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn patient_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Patient {
            id: 3,
            doctor_id: 9,
            name: "Ana".to_string(),
            surname: Some("Ruiz".to_string()),
            document_type: Some("dni".to_string()),
            document_value: Some("12345678Z".to_string()),
            email: Some("ana@example.com".to_string()),
            created_at: now,
            updated_at: now,
        };

        let domain = DomainPatient::try_from(db).expect("valid patient");

        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.doctor_id.get(), 9);
        assert_eq!(domain.name.as_str(), "Ana");
        assert_eq!(domain.document_type, Some(DocumentType::Dni));
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn invalid_stored_document_type_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Patient {
            id: 3,
            doctor_id: 9,
            name: "Ana".to_string(),
            surname: None,
            document_type: Some("ssn".to_string()),
            document_value: None,
            email: None,
            created_at: now,
            updated_at: now,
        };

        assert!(DomainPatient::try_from(db).is_err());
    }

    #[test]
    fn from_domain_new_patient() {
        let domain = DomainNewPatient::new(
            DoctorId::new(1).unwrap(),
            PatientName::new("Luis").unwrap(),
            None,
            Some(DocumentType::Passport),
            Some(DocumentValue::new("X1").unwrap()),
            None,
        );

        let new: NewPatient = (&domain).into();

        assert_eq!(new.doctor_id, 1);
        assert_eq!(new.name, "Luis");
        assert_eq!(new.surname, None);
        assert_eq!(new.document_type, Some("passport"));
        assert_eq!(new.document_value, Some("X1"));
        assert_eq!(new.created_at, new.updated_at);
    }
}

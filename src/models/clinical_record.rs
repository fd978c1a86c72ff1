//! Diesel models for clinical records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::clinical_record::{
    ClinicalRecord as DomainClinicalRecord, NewClinicalRecord as DomainNewClinicalRecord,
};
use crate::domain::types::{ClinicalRecordId, PatientId, RecordMessage, TypeConstraintError};
use crate::models::patient::Patient;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::clinical_records)]
#[diesel(belongs_to(Patient, foreign_key = patient_id))]
/// Diesel model for [`crate::domain::clinical_record::ClinicalRecord`].
pub struct ClinicalRecord {
    pub id: i32,
    pub patient_id: i32,
    pub message: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clinical_records)]
/// Insertable form of [`ClinicalRecord`].
pub struct NewClinicalRecord<'a> {
    pub patient_id: i32,
    pub message: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ClinicalRecord> for DomainClinicalRecord {
    type Error = TypeConstraintError;

    fn try_from(record: ClinicalRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClinicalRecordId::new(record.id)?,
            patient_id: PatientId::new(record.patient_id)?,
            message: RecordMessage::new(record.message)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClinicalRecord> for NewClinicalRecord<'a> {
    fn from(record: &'a DomainNewClinicalRecord) -> Self {
        Self {
            patient_id: record.patient_id.get(),
            message: record.message.as_str(),
            created_at: record.created_at,
            updated_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn record_into_domain() {
        let now = Utc::now().naive_utc();
        let db = ClinicalRecord {
            id: 5,
            patient_id: 2,
            message: "<p>Control anual</p>".to_string(),
            created_at: now,
            updated_at: now,
        };

        let domain = DomainClinicalRecord::try_from(db).expect("valid record");

        assert_eq!(domain.id.get(), 5);
        assert_eq!(domain.patient_id.get(), 2);
        assert_eq!(domain.message.as_str(), "<p>Control anual</p>");
    }

    #[test]
    fn from_domain_new_record() {
        let domain = DomainNewClinicalRecord::new(
            PatientId::new(2).unwrap(),
            RecordMessage::new("<b>Alta</b>").unwrap(),
        );

        let new: NewClinicalRecord = (&domain).into();

        assert_eq!(new.patient_id, 2);
        assert_eq!(new.message, "<b>Alta</b>");
        assert_eq!(new.created_at, domain.created_at);
    }
}

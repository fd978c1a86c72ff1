//! Services backing the clinical history views.

use crate::RECORDS_PER_PAGE;
use crate::domain::clinical_record::{ClinicalRecord, ClinicalRecordEntry};
use crate::domain::types::{ClinicalRecordId, PatientId};
use crate::dto::records::PatientRecordsPageData;
use crate::forms::records::CreateRecordForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{PageRequest, Paged};
use crate::repository::{
    ClinicalRecordListQuery, ClinicalRecordReader, ClinicalRecordWriter, PatientReader,
    PatientRecordsQuery,
};
use crate::services::{ServiceError, ServiceResult, doctor_scope};

/// Loads a patient together with one page of their clinical history.
///
/// Patients owned by another doctor are reported as missing.
pub fn load_patient_records<R>(
    repo: &R,
    user: &AuthenticatedUser,
    patient_id: i32,
    page: i64,
) -> ServiceResult<PatientRecordsPageData>
where
    R: PatientReader + ClinicalRecordReader + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let patient_id = PatientId::new(patient_id).map_err(|_| ServiceError::NotFound)?;

    let patient = match repo.get_patient_by_id(patient_id, doctor_id) {
        Ok(Some(patient)) => patient,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to get patient {patient_id}: {err}");
            return Err(err.into());
        }
    };

    let query = PatientRecordsQuery::new(
        doctor_id,
        patient_id,
        PageRequest::new(page, RECORDS_PER_PAGE),
    );
    let records = repo.list_patient_records(query).map_err(|err| {
        log::error!("Failed to list records of patient {patient_id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(PatientRecordsPageData { patient, records })
}

/// Loads one page of records across every patient of the doctor.
pub fn list_records<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: i64,
) -> ServiceResult<Paged<ClinicalRecordEntry>>
where
    R: ClinicalRecordReader + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let query = ClinicalRecordListQuery::new(doctor_id, PageRequest::new(page, RECORDS_PER_PAGE));

    repo.list_doctor_records(query).map_err(|err| {
        log::error!("Failed to list records: {err}");
        ServiceError::from(err)
    })
}

pub fn get_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    record_id: i32,
) -> ServiceResult<ClinicalRecordEntry>
where
    R: ClinicalRecordReader + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let record_id = ClinicalRecordId::new(record_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_record_by_id(record_id, doctor_id) {
        Ok(Some(entry)) => Ok(entry),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to get record {record_id}: {err}");
            Err(err.into())
        }
    }
}

/// Appends a record to the history of a patient owned by the doctor.
pub fn create_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    patient_id: i32,
    form: CreateRecordForm,
) -> ServiceResult<ClinicalRecord>
where
    R: PatientReader + ClinicalRecordWriter + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let patient_id = PatientId::new(patient_id).map_err(|_| ServiceError::NotFound)?;

    if repo.get_patient_by_id(patient_id, doctor_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let new_record = form.into_domain(patient_id)?;
    let record = repo.create_record(&new_record).map_err(|err| {
        log::error!("Failed to create record for patient {patient_id}: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Doctor {doctor_id} added record {} to patient {patient_id}", record.id);

    Ok(record)
}

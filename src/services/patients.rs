//! Services backing the patient roster.

use crate::PATIENTS_PER_PAGE;
use crate::domain::patient::{Patient, UpdatePatient};
use crate::domain::types::PatientId;
use crate::forms::patients::{CreatePatientForm, CreatePatientPayload, RenamePatientForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{PageRequest, Paged};
use crate::repository::{PatientListQuery, PatientReader, PatientWriter};
use crate::services::{ServiceError, ServiceResult, doctor_scope};

/// Loads one page of the doctor's patients, most recent first.
pub fn list_patients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: i64,
) -> ServiceResult<Paged<Patient>>
where
    R: PatientReader + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let query = PatientListQuery::new(doctor_id, PageRequest::new(page, PATIENTS_PER_PAGE));

    repo.list_patients(query).map_err(|err| {
        log::error!("Failed to list patients: {err}");
        ServiceError::from(err)
    })
}

/// Finds the doctor's patients whose name contains `term`.
pub fn search_patients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    term: &str,
) -> ServiceResult<Vec<Patient>>
where
    R: PatientReader + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    repo.search_patients(doctor_id, term).map_err(|err| {
        log::error!("Failed to search patients: {err}");
        ServiceError::from(err)
    })
}

/// Validates the form and registers a patient for the current doctor.
pub fn create_patient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreatePatientForm,
) -> ServiceResult<Patient>
where
    R: PatientWriter + ?Sized,
{
    let doctor_id = doctor_scope(user)?;

    let payload = CreatePatientPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate patient form: {err}");
        ServiceError::from(err)
    })?;

    let patient = repo.create_patient(&payload.into_domain(doctor_id))?;
    log::info!("Doctor {doctor_id} registered patient {}", patient.id);

    Ok(patient)
}

/// Renames a patient owned by the current doctor.
pub fn rename_patient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    patient_id: i32,
    form: RenamePatientForm,
) -> ServiceResult<Patient>
where
    R: PatientWriter + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let patient_id = PatientId::new(patient_id).map_err(|_| ServiceError::NotFound)?;
    let updates = UpdatePatient::try_from(form)?;

    repo.update_patient(patient_id, doctor_id, &updates)
        .map_err(ServiceError::from)
}

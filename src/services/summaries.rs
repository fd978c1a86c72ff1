//! AI summaries of a patient's clinical history.

use crate::domain::types::PatientId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::PatientReader;
use crate::services::{ServiceError, ServiceResult, doctor_scope};
use crate::summaries::SummaryClient;

/// Requests a summary for a patient owned by the current doctor.
///
/// Ownership is checked before the summary service is contacted.
pub async fn summarize_patient<R, S>(
    repo: &R,
    summaries: &S,
    user: &AuthenticatedUser,
    patient_id: i32,
) -> ServiceResult<String>
where
    R: PatientReader + ?Sized,
    S: SummaryClient + ?Sized,
{
    let doctor_id = doctor_scope(user)?;
    let patient_id = PatientId::new(patient_id).map_err(|_| ServiceError::NotFound)?;

    if repo.get_patient_by_id(patient_id, doctor_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    summaries.summarize(patient_id).await.map_err(|err| {
        log::error!("Failed to summarize patient {patient_id}: {err}");
        ServiceError::from(err)
    })
}

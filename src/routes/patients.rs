use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::types::DocumentType;
use crate::forms::patients::{CreatePatientForm, RenamePatientForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, error_response};
use crate::services::patients as patients_service;
use crate::services::summaries as summaries_service;
use crate::summaries::HttpSummaryClient;

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[get("/patients")]
pub async fn list_patients(
    params: PageParams,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match patients_service::list_patients(repo.get_ref(), &user, params.page()) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(err) => error_response(err, "Failed to list patients"),
    }
}

#[get("/patients/search")]
pub async fn search_patients(
    params: web::Query<SearchParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match patients_service::search_patients(repo.get_ref(), &user, &params.q) {
        Ok(patients) => HttpResponse::Ok().json(patients),
        Err(err) => error_response(err, "Failed to search patients"),
    }
}

#[post("/patients")]
pub async fn create_patient(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreatePatientForm>,
) -> impl Responder {
    match patients_service::create_patient(repo.get_ref(), &user, form) {
        Ok(patient) => HttpResponse::Created().json(patient),
        Err(err) => error_response(err, "Failed to create patient"),
    }
}

#[post("/patients/{patient_id}")]
pub async fn rename_patient(
    patient_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RenamePatientForm>,
) -> impl Responder {
    match patients_service::rename_patient(repo.get_ref(), &user, patient_id.into_inner(), form) {
        Ok(patient) => HttpResponse::Ok().json(patient),
        Err(err) => error_response(err, "Failed to rename patient"),
    }
}

#[post("/patients/{patient_id}/summary")]
pub async fn summarize_patient(
    patient_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    summaries: web::Data<HttpSummaryClient>,
) -> impl Responder {
    let summary = summaries_service::summarize_patient(
        repo.get_ref(),
        summaries.get_ref(),
        &user,
        patient_id.into_inner(),
    )
    .await;

    match summary {
        Ok(summary) => HttpResponse::Ok().json(json!({ "summary": summary })),
        Err(err) => error_response(err, "Failed to summarize patient"),
    }
}

/// Document kinds offered by the patient form.
#[get("/document-types")]
pub async fn document_types(_user: AuthenticatedUser) -> impl Responder {
    let kinds: Vec<_> = DocumentType::ALL
        .iter()
        .map(|kind| json!({ "value": kind.as_str(), "title": kind.title() }))
        .collect();
    HttpResponse::Ok().json(kinds)
}

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::records::CreateRecordForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, error_response};
use crate::services::records as records_service;

#[get("/patients/{patient_id}/records")]
pub async fn patient_records(
    patient_id: web::Path<i32>,
    params: PageParams,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match records_service::load_patient_records(
        repo.get_ref(),
        &user,
        patient_id.into_inner(),
        params.page(),
    ) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "Failed to load patient records"),
    }
}

#[post("/patients/{patient_id}/records")]
pub async fn create_record(
    patient_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateRecordForm>,
) -> impl Responder {
    match records_service::create_record(repo.get_ref(), &user, patient_id.into_inner(), form) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(err) => error_response(err, "Failed to create record"),
    }
}

#[get("/records")]
pub async fn list_records(
    params: PageParams,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match records_service::list_records(repo.get_ref(), &user, params.page()) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(err) => error_response(err, "Failed to list records"),
    }
}

#[get("/records/{record_id}")]
pub async fn show_record(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match records_service::get_record(repo.get_ref(), &user, record_id.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(err, "Failed to load record"),
    }
}

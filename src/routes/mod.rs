//! Actix handlers exposing the services as a JSON API.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, Responder, dev::Payload, post, web};
use serde_json::json;

use crate::pagination::parse_page;
use crate::services::ServiceError;

pub mod patients;
pub mod records;

/// Raw `?page=` parameter. Kept as text so that garbage falls back to the
/// first page instead of failing extraction.
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// Reads `page` from a query string. A repeated `page` counts as
    /// unparseable and undecodable input is treated as absent.
    pub fn from_query(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_default();

        let mut values = pairs
            .into_iter()
            .filter(|(key, _)| key == "page")
            .map(|(_, value)| value);

        let page = match (values.next(), values.next()) {
            (Some(value), None) => Some(value),
            _ => None,
        };

        Self { page }
    }

    pub fn page(&self) -> i64 {
        parse_page(self.page.as_deref())
    }
}

impl FromRequest for PageParams {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_query(req.query_string())))
    }
}

/// Maps a service failure onto the HTTP status the API documents.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": message }))
        }
        ServiceError::Internal(message) => {
            log::error!("{action}: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    HttpResponse::NoContent().finish()
}

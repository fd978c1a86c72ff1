//! Multi-tenant clinical records service.
//!
//! Doctors keep a roster of patients and an append-only history of clinical
//! records per patient. Every listing is paged through
//! [`pagination::compute_window`] and scoped to the signed-in doctor.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod summaries;

/// Rows per page of the patient roster.
pub const PATIENTS_PER_PAGE: i64 = 10;
/// Rows per page of every clinical record listing.
pub const RECORDS_PER_PAGE: i64 = 10;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::logout;
    use crate::routes::patients::{
        create_patient, document_types, list_patients, rename_patient, search_patients,
        summarize_patient,
    };
    use crate::routes::records::{create_record, list_records, patient_records, show_record};
    use crate::summaries::HttpSummaryClient;

    /// Upper bound for one summary request; the service runs a language model.
    const SUMMARY_TIMEOUT: Duration = Duration::from_secs(120);

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        let summaries = HttpSummaryClient::new(&server_config.summary_service_url, SUMMARY_TIMEOUT)
            .map_err(|e| std::io::Error::other(format!("Failed to build summary client: {e}")))?;

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(logout)
                .service(
                    web::scope("/api")
                        .service(document_types)
                        .service(search_patients)
                        .service(list_patients)
                        .service(create_patient)
                        .service(rename_patient)
                        .service(summarize_patient)
                        .service(patient_records)
                        .service(create_record)
                        .service(list_records)
                        .service(show_record),
                )
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(summaries.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

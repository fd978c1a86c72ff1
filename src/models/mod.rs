//! Database models and request-scoped models shared across the service.

#[cfg(feature = "server")]
pub mod auth;
pub mod clinical_record;
#[cfg(feature = "server")]
pub mod config;
pub mod patient;

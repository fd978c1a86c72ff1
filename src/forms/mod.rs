//! Request payloads accepted by the patient and record endpoints.

use thiserror::Error;
use validator::ValidationErrors;

pub mod patients;
pub mod records;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid surname")]
    InvalidSurname,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid document type")]
    InvalidDocumentType,

    #[error("invalid document number")]
    InvalidDocumentValue,

    #[error("record message is empty")]
    EmptyMessage,
}

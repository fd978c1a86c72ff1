//! Use cases invoked by the HTTP handlers.
//!
//! Services receive the authenticated doctor explicitly and derive the
//! tenant scope from it; repositories never see an unscoped request.

use thiserror::Error;

use crate::domain::types::{DoctorId, TypeConstraintError};
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::summaries::SummaryError;

pub mod patients;
pub mod records;
pub mod summaries;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<SummaryError> for ServiceError {
    fn from(err: SummaryError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Resolves the tenant scope of the current request.
pub(crate) fn doctor_scope(user: &AuthenticatedUser) -> ServiceResult<DoctorId> {
    user.doctor_id().map_err(|err| {
        log::warn!("Identity subject {:?} is not a doctor id: {err}", user.sub);
        ServiceError::Unauthorized
    })
}

//! Error conversion glue between the layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here and are only compiled with the `services`
//! feature.

use crate::domain::errors::EditorialError;
use crate::domain::types::TypeConstraintError;
use crate::forms::content::ContentFormError;
use crate::forms::filters::CatalogFilterFormError;
use crate::forms::places::PlaceFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<EditorialError> for ServiceError {
    fn from(val: EditorialError) -> Self {
        ServiceError::Editorial(val)
    }
}

impl From<ContentFormError> for ServiceError {
    fn from(val: ContentFormError) -> Self {
        match val {
            // Keep per-field detail so callers can highlight every bad input.
            ContentFormError::Invalid(failed) => ServiceError::Editorial(failed.into()),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<CatalogFilterFormError> for ServiceError {
    fn from(val: CatalogFilterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<PlaceFormError> for ServiceError {
    fn from(val: PlaceFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

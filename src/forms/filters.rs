use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::locale::Locale;
use crate::domain::moderation::Status;
use crate::domain::query::CatalogFilters;
use crate::domain::record::{ContentKind, EventType};
use crate::domain::types::{
    CityId, CountryId, DestinationId, OfficeType, ProvinceId, TypeConstraintError,
};

/// Query-string filters of an admin list view. Empty strings mean "unset".
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CatalogFilterForm {
    pub country_id: String,
    pub province_id: String,
    pub city_id: String,
    pub destination_id: String,
    pub status: String,
    pub kind: String,
    pub event_type: String,
    pub office_type: String,
    #[validate(length(max = 200))]
    pub search: String,
    pub locale: String,
}

#[derive(Debug, Error)]
pub enum CatalogFilterFormError {
    #[error("Catalog filter validation failed: {0}")]
    Validation(String),
    #[error("Catalog filter contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CatalogFilterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CatalogFilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn set<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    let raw = raw.trim();
    if raw.is_empty() {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}

impl CatalogFilterForm {
    /// Converts into filters, using `default_locale` when none was requested.
    pub fn into_filters(
        self,
        default_locale: Locale,
    ) -> Result<CatalogFilters, CatalogFilterFormError> {
        self.validate()?;

        let locale = set(&self.locale, |v| Locale::try_from(v))?.unwrap_or(default_locale);
        Ok(CatalogFilters {
            country_id: set(&self.country_id, |v| CountryId::new(v))?,
            province_id: set(&self.province_id, |v| ProvinceId::new(v))?,
            city_id: set(&self.city_id, |v| CityId::new(v))?,
            destination_id: set(&self.destination_id, |v| DestinationId::new(v))?,
            status: set(&self.status, |v| Status::try_from(v))?,
            kind: set(&self.kind, |v| ContentKind::try_from(v))?,
            event_type: set(&self.event_type, |v| EventType::try_from(v))?,
            office_type: set(&self.office_type, |v| OfficeType::new(v))?,
            search_text: set(&self.search, |v| Ok(v.to_string()))?,
            locale,
        })
    }
}

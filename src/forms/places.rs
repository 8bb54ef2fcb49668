use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::locale::LocalizedText;
use crate::domain::place::{Place, PlaceKind};
use crate::domain::types::{CountryId, ProvinceId, TypeConstraintError};

/// Province or city submitted from the geography admin screen.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PlaceForm {
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(max = 200))]
    pub name_ar: String,
    #[validate(length(max = 200))]
    pub name_en: String,
    #[validate(length(max = 200))]
    pub name_fr: String,
    pub country_id: String,
    pub province_id: String,
    pub is_active: bool,
}

#[derive(Debug, Error)]
pub enum PlaceFormError {
    #[error("Place form validation failed: {0}")]
    Validation(String),
    #[error("Place form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for PlaceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for PlaceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<PlaceForm> for Place {
    type Error = PlaceFormError;

    fn try_from(form: PlaceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let kind = PlaceKind::try_from(form.kind.as_str())?;
        // Missing country is reported by `Place::validate` together with the names.
        let country_id = CountryId::new(form.country_id).ok();
        let province_id = match form.province_id.trim() {
            "" => None,
            raw => Some(ProvinceId::new(raw)?),
        };

        Ok(Place {
            kind,
            name: LocalizedText::new(form.name_ar, form.name_en, form.name_fr),
            country_id,
            province_id,
            is_active: form.is_active,
            updated_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_city_with_province() {
        let form = PlaceForm {
            kind: "city".into(),
            name_ar: "جدة".into(),
            name_en: "Jeddah".into(),
            country_id: "sa".into(),
            province_id: "makkah".into(),
            is_active: true,
            ..Default::default()
        };
        let place = Place::try_from(form).unwrap();
        assert_eq!(place.kind, PlaceKind::City);
        assert_eq!(place.name.en, "Jeddah");
        assert_eq!(place.province_id.unwrap(), "makkah");
    }

    #[test]
    fn blank_country_is_left_for_validation() {
        let form = PlaceForm {
            kind: "province".into(),
            name_ar: "مكة".into(),
            ..Default::default()
        };
        let place = Place::try_from(form).unwrap();
        assert!(place.country_id.is_none());
        assert!(place.province_id.is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let form = PlaceForm {
            kind: "region".into(),
            ..Default::default()
        };
        assert!(matches!(
            Place::try_from(form),
            Err(PlaceFormError::TypeConstraint(_))
        ));
    }
}

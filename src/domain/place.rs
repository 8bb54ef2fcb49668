//! Provinces and cities maintained as leaf entries of the geo hierarchy.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{EditorialError, FieldIssue, IssueKind, ValidationFailed};
use crate::domain::geo::{GeoLookup, GeoScope};
use crate::domain::locale::{Locale, LocalizedText};
use crate::domain::types::{CountryId, ProvinceId, TypeConstraintError};
use crate::domain::validation::require_locales;

/// Leaf geography entity kinds. They skip moderation and count as published
/// once saved.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    Province,
    City,
}

impl TryFrom<&str> for PlaceKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "province" => Ok(Self::Province),
            "city" => Ok(Self::City),
            other => Err(TypeConstraintError::InvalidValue(format!("place kind: {other}"))),
        }
    }
}

/// A province or city as submitted by the admin console.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub kind: PlaceKind,
    pub name: LocalizedText,
    pub country_id: Option<CountryId>,
    /// Parent province of a city. Always `None` for provinces.
    pub province_id: Option<ProvinceId>,
    pub is_active: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl Place {
    pub fn new(kind: PlaceKind, name: LocalizedText, country_id: Option<CountryId>) -> Self {
        Self {
            kind,
            name,
            country_id,
            province_id: None,
            is_active: true,
            updated_at: None,
        }
    }

    pub fn in_province(mut self, province_id: ProvinceId) -> Self {
        self.province_id = Some(province_id);
        self
    }

    /// Checks `name.ar`, `name.en` and `country_id`, then the parent chain.
    pub fn validate<L>(&self, lookup: &L) -> Result<(), EditorialError>
    where
        L: GeoLookup + ?Sized,
    {
        let mut issues = Vec::new();
        require_locales(&mut issues, "name", &self.name, &[Locale::Ar, Locale::En]);
        if self.country_id.is_none() {
            issues.push(FieldIssue::missing("country_id"));
        }
        if self.kind == PlaceKind::Province && self.province_id.is_some() {
            issues.push(FieldIssue::new("province_id", IssueKind::NotAllowed));
        }
        ValidationFailed::check(issues)?;

        if let (Some(country_id), Some(province_id)) = (&self.country_id, &self.province_id) {
            GeoScope::new(country_id.clone())
                .with_province(province_id.clone())
                .validate_against_hierarchy(lookup)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::GeoLevel;
    use crate::domain::types::CityId;

    struct OneProvince;

    impl GeoLookup for OneProvince {
        fn country_of(&self, province_id: &ProvinceId) -> Option<CountryId> {
            (province_id == &"makkah").then(|| CountryId::new("sa").unwrap())
        }

        fn province_of(&self, _city_id: &CityId) -> Option<ProvinceId> {
            None
        }
    }

    fn sa() -> Option<CountryId> {
        Some(CountryId::new("sa").unwrap())
    }

    #[test]
    fn place_kind_parses_known_names_only() {
        assert_eq!(PlaceKind::try_from("city"), Ok(PlaceKind::City));
        assert_eq!(
            PlaceKind::try_from("region"),
            Err(TypeConstraintError::InvalidValue("place kind: region".into()))
        );
    }

    #[test]
    fn province_needs_names_and_country() {
        let place = Place::new(PlaceKind::Province, LocalizedText::arabic("مكة"), None);
        let err = place.validate(&OneProvince).unwrap_err();
        match err {
            EditorialError::ValidationFailed(failed) => {
                assert_eq!(failed.fields(), vec!["name.en", "country_id"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn city_in_matching_province_is_valid() {
        let place = Place::new(
            PlaceKind::City,
            LocalizedText::new("جدة", "Jeddah", ""),
            sa(),
        )
        .in_province(ProvinceId::new("makkah").unwrap());
        assert!(place.validate(&OneProvince).is_ok());
    }

    #[test]
    fn city_without_province_is_valid() {
        let place = Place::new(
            PlaceKind::City,
            LocalizedText::new("العلا", "AlUla", ""),
            sa(),
        );
        assert!(place.validate(&OneProvince).is_ok());
    }

    #[test]
    fn city_in_foreign_province_is_inconsistent() {
        let place = Place::new(
            PlaceKind::City,
            LocalizedText::new("جدة", "Jeddah", ""),
            Some(CountryId::new("eg").unwrap()),
        )
        .in_province(ProvinceId::new("makkah").unwrap());
        let err = place.validate(&OneProvince).unwrap_err();
        assert!(matches!(
            err,
            EditorialError::GeoInconsistency(ref geo) if geo.level == GeoLevel::Province
        ));
    }
}

//! Placement of records in the country -> province -> city hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::errors::GeoInconsistency;
use crate::domain::types::{CityId, CountryId, ProvinceId};

/// Level of the geography hierarchy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    Country,
    Province,
    City,
}

impl GeoLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Province => "province",
            Self::City => "city",
        }
    }
}

impl Display for GeoLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read access to the geography tree, supplied by the persistence layer.
///
/// `None` means the node is unknown to the hierarchy.
pub trait GeoLookup {
    /// Country a province belongs to.
    fn country_of(&self, province_id: &ProvinceId) -> Option<CountryId>;
    /// Province a city belongs to. Cities attached directly to a country return `None`.
    fn province_of(&self, city_id: &CityId) -> Option<ProvinceId>;
    /// Country a city belongs to.
    ///
    /// The default walks through [`GeoLookup::province_of`]; implementations
    /// holding province-less cities must override it.
    fn country_of_city(&self, city_id: &CityId) -> Option<CountryId> {
        self.province_of(city_id)
            .and_then(|province_id| self.country_of(&province_id))
    }
}

/// A record's position in the hierarchy.
///
/// Intermediate levels may be omitted: a city can be set without a province.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GeoScope {
    pub country_id: CountryId,
    pub province_id: Option<ProvinceId>,
    pub city_id: Option<CityId>,
}

impl GeoScope {
    pub fn new(country_id: CountryId) -> Self {
        Self {
            country_id,
            province_id: None,
            city_id: None,
        }
    }

    pub fn with_province(mut self, province_id: ProvinceId) -> Self {
        self.province_id = Some(province_id);
        self
    }

    pub fn with_city(mut self, city_id: CityId) -> Self {
        self.city_id = Some(city_id);
        self
    }

    /// New scope in `country_id` with province and city cleared.
    pub fn on_country_change(&self, country_id: CountryId) -> Self {
        Self::new(country_id)
    }

    /// New scope with the province replaced and the city cleared.
    pub fn on_province_change(&self, province_id: Option<ProvinceId>) -> Self {
        Self {
            country_id: self.country_id.clone(),
            province_id,
            city_id: None,
        }
    }

    /// Checks every set level against its stated ancestors.
    ///
    /// Province is checked before city so the reported level is the
    /// shallowest inconsistent one.
    pub fn validate_against_hierarchy<L>(&self, lookup: &L) -> Result<(), GeoInconsistency>
    where
        L: GeoLookup + ?Sized,
    {
        if let Some(province_id) = &self.province_id {
            let actual = lookup.country_of(province_id);
            if actual.as_ref() != Some(&self.country_id) {
                return Err(GeoInconsistency {
                    level: GeoLevel::Province,
                    node: province_id.to_string(),
                    expected_parent: self.country_id.to_string(),
                    actual_parent: actual.map(String::from),
                });
            }
        }

        if let Some(city_id) = &self.city_id {
            let actual_country = lookup.country_of_city(city_id);
            if actual_country.as_ref() != Some(&self.country_id) {
                return Err(GeoInconsistency {
                    level: GeoLevel::City,
                    node: city_id.to_string(),
                    expected_parent: self.country_id.to_string(),
                    actual_parent: actual_country.map(String::from),
                });
            }

            if let Some(province_id) = &self.province_id {
                let actual_province = lookup.province_of(city_id);
                if actual_province.as_ref() != Some(province_id) {
                    return Err(GeoInconsistency {
                        level: GeoLevel::City,
                        node: city_id.to_string(),
                        expected_parent: province_id.to_string(),
                        actual_parent: actual_province.map(String::from),
                    });
                }
            }
        }

        Ok(())
    }
}

//! List-view filters shared by every admin catalog page.
//!
//! A [`CatalogQuery`] never holds a province, city or destination filter
//! without the country filter above it. Replacing or clearing an ancestor
//! resets its dependants, mirroring the admin selectors.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::errors::IncompleteScope;
use crate::domain::locale::Locale;
use crate::domain::moderation::Status;
use crate::domain::record::{ContentKind, ContentRecord, EventType, KindDetails};
use crate::domain::types::{CityId, CountryId, DestinationId, OfficeType, ProvinceId};

/// One filterable dimension of a list view.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryDimension {
    Country,
    Province,
    City,
    Destination,
    Status,
    Kind,
    EventType,
    OfficeType,
    SearchText,
}

impl QueryDimension {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Province => "province",
            Self::City => "city",
            Self::Destination => "destination",
            Self::Status => "status",
            Self::Kind => "kind",
            Self::EventType => "event_type",
            Self::OfficeType => "office_type",
            Self::SearchText => "search_text",
        }
    }
}

impl Display for QueryDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw filter selection as handed over by a list view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogFilters {
    pub country_id: Option<CountryId>,
    pub province_id: Option<ProvinceId>,
    pub city_id: Option<CityId>,
    pub destination_id: Option<DestinationId>,
    pub status: Option<Status>,
    pub kind: Option<ContentKind>,
    pub event_type: Option<EventType>,
    pub office_type: Option<OfficeType>,
    pub search_text: Option<String>,
    /// Locale of the requesting UI, used for display-name search.
    pub locale: Locale,
}

/// A single dimension update for [`CatalogQuery::narrow`]. `None` clears it.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryFilter {
    Country(Option<CountryId>),
    Province(Option<ProvinceId>),
    City(Option<CityId>),
    Destination(Option<DestinationId>),
    Status(Option<Status>),
    Kind(Option<ContentKind>),
    EventType(Option<EventType>),
    OfficeType(Option<OfficeType>),
    SearchText(Option<String>),
}

/// Validated list predicate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogQuery {
    filters: CatalogFilters,
}

impl CatalogQuery {
    /// Query with no dimension set; matches every record.
    pub fn all(locale: Locale) -> Self {
        Self {
            filters: CatalogFilters {
                locale,
                ..Default::default()
            },
        }
    }

    /// Validates a full filter selection.
    pub fn build(mut filters: CatalogFilters) -> Result<Self, IncompleteScope> {
        filters.search_text = normalize_search(filters.search_text);
        check_scope(&filters)?;
        Ok(Self { filters })
    }

    /// Replaces one dimension, cascading resets to dependants of a changed
    /// ancestor. Fails when a child level is set without its country.
    pub fn narrow(self, filter: QueryFilter) -> Result<Self, IncompleteScope> {
        let mut filters = self.filters;
        match filter {
            QueryFilter::Country(country_id) => {
                if country_id != filters.country_id {
                    filters.province_id = None;
                    filters.city_id = None;
                    filters.destination_id = None;
                }
                filters.country_id = country_id;
            }
            QueryFilter::Province(province_id) => {
                if province_id != filters.province_id {
                    filters.city_id = None;
                    filters.destination_id = None;
                }
                filters.province_id = province_id;
            }
            QueryFilter::City(city_id) => {
                if city_id != filters.city_id {
                    filters.destination_id = None;
                }
                filters.city_id = city_id;
            }
            QueryFilter::Destination(destination_id) => filters.destination_id = destination_id,
            QueryFilter::Status(status) => filters.status = status,
            QueryFilter::Kind(kind) => filters.kind = kind,
            QueryFilter::EventType(event_type) => filters.event_type = event_type,
            QueryFilter::OfficeType(office_type) => filters.office_type = office_type,
            QueryFilter::SearchText(text) => filters.search_text = normalize_search(text),
        }
        check_scope(&filters)?;
        Ok(Self { filters })
    }

    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    pub fn locale(&self) -> Locale {
        self.filters.locale
    }

    /// Whether `record` satisfies every set dimension.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        let f = &self.filters;
        let geo = record.geo();

        if let Some(country_id) = &f.country_id
            && geo.map(|g| &g.country_id) != Some(country_id)
        {
            return false;
        }
        if let Some(province_id) = &f.province_id
            && geo.and_then(|g| g.province_id.as_ref()) != Some(province_id)
        {
            return false;
        }
        if let Some(city_id) = &f.city_id
            && geo.and_then(|g| g.city_id.as_ref()) != Some(city_id)
        {
            return false;
        }
        if let Some(destination_id) = &f.destination_id
            && !belongs_to_destination(record, destination_id)
        {
            return false;
        }
        if f.status.is_some_and(|status| status != record.status) {
            return false;
        }
        if f.kind.is_some_and(|kind| kind != record.kind()) {
            return false;
        }
        if let Some(event_type) = f.event_type {
            match &record.content.details {
                KindDetails::Event(event) if event.event_type == Some(event_type) => {}
                _ => return false,
            }
        }
        if let Some(office_type) = &f.office_type {
            match &record.content.details {
                KindDetails::Office(office) if office.office_type.as_ref() == Some(office_type) => {}
                _ => return false,
            }
        }
        if let Some(text) = &f.search_text {
            let needle = text.to_lowercase();
            let name = &record.content.name;
            let displayed = name.resolve(f.locale).to_lowercase().contains(&needle);
            if !displayed && !name.contains_ignore_case(&needle) {
                return false;
            }
        }
        true
    }
}

/// Validates `filters` into a [`CatalogQuery`].
pub fn build_query(filters: CatalogFilters) -> Result<CatalogQuery, IncompleteScope> {
    CatalogQuery::build(filters)
}

fn normalize_search(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn check_scope(filters: &CatalogFilters) -> Result<(), IncompleteScope> {
    if filters.country_id.is_some() {
        return Ok(());
    }
    let dangling = [
        (filters.province_id.is_some(), QueryDimension::Province),
        (filters.city_id.is_some(), QueryDimension::City),
        (filters.destination_id.is_some(), QueryDimension::Destination),
    ];
    match dangling.into_iter().find(|(set, _)| *set) {
        Some((_, dimension)) => Err(IncompleteScope {
            dimension,
            missing: QueryDimension::Country,
        }),
        None => Ok(()),
    }
}

// Events point at their hosting destination; a destination matches itself.
fn belongs_to_destination(record: &ContentRecord, destination_id: &DestinationId) -> bool {
    match &record.content.details {
        KindDetails::Event(event) => event.destination_id.as_ref() == Some(destination_id),
        KindDetails::Destination(_) => record.id.as_str() == destination_id.as_str(),
        KindDetails::Office(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::geo::GeoScope;
    use crate::domain::locale::LocalizedText;
    use crate::domain::record::{EventDetails, RecordContent};
    use crate::domain::types::RecordId;

    fn sa() -> CountryId {
        CountryId::new("sa").unwrap()
    }

    fn record(id: &str, kind: ContentKind, geo: GeoScope, name: LocalizedText) -> ContentRecord {
        let mut content = RecordContent::new(kind);
        content.geo = Some(geo);
        content.name = name;
        ContentRecord::draft(
            RecordId::new(id).unwrap(),
            content,
            DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        )
    }

    fn jeddah() -> ContentRecord {
        record(
            "d-1",
            ContentKind::Destination,
            GeoScope::new(sa())
                .with_province(ProvinceId::new("makkah").unwrap())
                .with_city(CityId::new("jeddah").unwrap()),
            LocalizedText::new("جدة", "Jeddah", "Djeddah"),
        )
    }

    #[test]
    fn city_without_country_is_incomplete() {
        let err = build_query(CatalogFilters {
            city_id: Some(CityId::new("c1").unwrap()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            IncompleteScope {
                dimension: QueryDimension::City,
                missing: QueryDimension::Country,
            }
        );
    }

    #[test]
    fn city_with_country_is_accepted() {
        let query = build_query(CatalogFilters {
            country_id: Some(CountryId::new("x").unwrap()),
            city_id: Some(CityId::new("c1").unwrap()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.filters().city_id.as_ref().unwrap(), &"c1");
    }

    #[test]
    fn destination_and_province_also_need_country() {
        assert!(
            build_query(CatalogFilters {
                province_id: Some(ProvinceId::new("makkah").unwrap()),
                ..Default::default()
            })
            .is_err()
        );
        let err = CatalogQuery::all(Locale::Ar)
            .narrow(QueryFilter::Destination(Some(
                DestinationId::new("d-1").unwrap(),
            )))
            .unwrap_err();
        assert_eq!(err.dimension, QueryDimension::Destination);
    }

    #[test]
    fn changing_country_resets_dependants() {
        let query = CatalogQuery::all(Locale::Ar)
            .narrow(QueryFilter::Country(Some(sa())))
            .unwrap()
            .narrow(QueryFilter::Province(Some(ProvinceId::new("makkah").unwrap())))
            .unwrap()
            .narrow(QueryFilter::City(Some(CityId::new("jeddah").unwrap())))
            .unwrap()
            .narrow(QueryFilter::Country(Some(CountryId::new("eg").unwrap())))
            .unwrap();
        let filters = query.filters();
        assert_eq!(filters.country_id.as_ref().unwrap(), &"eg");
        assert!(filters.province_id.is_none());
        assert!(filters.city_id.is_none());
    }

    #[test]
    fn clearing_country_clears_the_whole_scope() {
        let query = CatalogQuery::all(Locale::Ar)
            .narrow(QueryFilter::Country(Some(sa())))
            .unwrap()
            .narrow(QueryFilter::City(Some(CityId::new("jeddah").unwrap())))
            .unwrap()
            .narrow(QueryFilter::Country(None))
            .unwrap();
        assert_eq!(query.filters().city_id, None);
    }

    #[test]
    fn reselecting_same_country_keeps_dependants() {
        let query = CatalogQuery::all(Locale::Ar)
            .narrow(QueryFilter::Country(Some(sa())))
            .unwrap()
            .narrow(QueryFilter::City(Some(CityId::new("jeddah").unwrap())))
            .unwrap()
            .narrow(QueryFilter::Country(Some(sa())))
            .unwrap();
        assert!(query.filters().city_id.is_some());
    }

    #[test]
    fn province_change_resets_city() {
        let query = CatalogQuery::all(Locale::Ar)
            .narrow(QueryFilter::Country(Some(sa())))
            .unwrap()
            .narrow(QueryFilter::City(Some(CityId::new("jeddah").unwrap())))
            .unwrap()
            .narrow(QueryFilter::Province(Some(ProvinceId::new("asir").unwrap())))
            .unwrap();
        assert_eq!(query.filters().city_id, None);
    }

    #[test]
    fn geo_dimensions_combine_with_and() {
        let query = build_query(CatalogFilters {
            country_id: Some(sa()),
            city_id: Some(CityId::new("jeddah").unwrap()),
            status: Some(Status::Draft),
            ..Default::default()
        })
        .unwrap();
        assert!(query.matches(&jeddah()));

        let query = query
            .narrow(QueryFilter::Status(Some(Status::Published)))
            .unwrap();
        assert!(!query.matches(&jeddah()));
    }

    #[test]
    fn search_covers_all_three_locales() {
        for needle in ["jed", "DJEDDAH", "جدة"] {
            let query = build_query(CatalogFilters {
                search_text: Some(needle.to_string()),
                locale: Locale::En,
                ..Default::default()
            })
            .unwrap();
            assert!(query.matches(&jeddah()), "no match for {needle}");
        }

        let query = build_query(CatalogFilters {
            search_text: Some("riyadh".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(!query.matches(&jeddah()));
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = build_query(CatalogFilters {
            search_text: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.filters().search_text, None);
        assert!(query.matches(&jeddah()));
    }

    #[test]
    fn event_filters_match_only_events() {
        let mut festival = record(
            "e-1",
            ContentKind::Event,
            GeoScope::new(sa()),
            LocalizedText::arabic("موسم جدة"),
        );
        festival.content.details = KindDetails::Event(EventDetails {
            event_type: Some(EventType::Season),
            destination_id: Some(DestinationId::new("d-1").unwrap()),
            ..Default::default()
        });

        let query = build_query(CatalogFilters {
            country_id: Some(sa()),
            destination_id: Some(DestinationId::new("d-1").unwrap()),
            event_type: Some(EventType::Season),
            ..Default::default()
        })
        .unwrap();
        assert!(query.matches(&festival));
        assert!(!query.matches(&jeddah()));
    }
}

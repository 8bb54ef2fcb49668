use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::locale::Locale;
use crate::domain::moderation::Status;
use crate::domain::record::{ContentKind, ContentRecord, KindDetails};

/// Row of an admin list view with every text resolved for one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentListItem {
    pub id: String,
    pub kind: ContentKind,
    pub name: String,
    pub country_id: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
    pub status: Status,
    pub is_active: bool,
    pub rejection_reason: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl ContentListItem {
    pub fn localized(record: &ContentRecord, locale: Locale) -> Self {
        let geo = record.geo();
        Self {
            id: record.id.to_string(),
            kind: record.kind(),
            name: record.display_name(locale).to_string(),
            country_id: geo.map(|g| g.country_id.to_string()),
            province_id: geo.and_then(|g| g.province_id.as_ref().map(ToString::to_string)),
            city_id: geo.and_then(|g| g.city_id.as_ref().map(ToString::to_string)),
            status: record.status,
            is_active: record.is_active,
            rejection_reason: record.audit.rejection_reason.clone(),
            updated_at: record.updated_at,
        }
    }
}

/// Public-facing detail view of a record in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDetail {
    pub id: String,
    pub kind: ContentKind,
    pub name: String,
    pub description: String,
    /// Event location or office address, when the kind has one.
    pub location: Option<String>,
    pub working_hours: Option<String>,
    pub main_image: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ContentDetail {
    pub fn localized(record: &ContentRecord, locale: Locale) -> Self {
        let content = &record.content;
        let mut detail = Self {
            id: record.id.to_string(),
            kind: record.kind(),
            name: content.name.resolve(locale).to_string(),
            description: content.description.resolve(locale).to_string(),
            location: None,
            working_hours: None,
            main_image: None,
            latitude: None,
            longitude: None,
        };

        match &content.details {
            KindDetails::Destination(destination) => {
                detail.main_image = destination.main_image.as_ref().map(|i| i.as_str().to_string());
                detail.latitude = destination.latitude.map(f64::from);
                detail.longitude = destination.longitude.map(f64::from);
            }
            KindDetails::Event(event) => {
                detail.location = non_empty(event.location.resolve(locale));
                detail.main_image = event.main_image.as_ref().map(|i| i.as_str().to_string());
            }
            KindDetails::Office(office) => {
                detail.location = non_empty(office.address.resolve(locale));
                detail.working_hours = non_empty(office.working_hours.resolve(locale));
                detail.latitude = office.latitude.map(f64::from);
                detail.longitude = office.longitude.map(f64::from);
            }
        }
        detail
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentPage {
    /// Matching records across all pages.
    pub total: usize,
    pub page: usize,
    pub items: Vec<ContentListItem>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

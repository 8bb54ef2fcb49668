use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::errors::{FieldIssue, ValidationFailed};
use crate::domain::geo::GeoScope;
use crate::domain::locale::LocalizedText;
use crate::domain::record::{
    ContentKind, DestinationDetails, EventDetails, EventType, KindDetails, OfficeDetails,
    RecordContent,
};
use crate::domain::types::{
    CityId, CountryId, DestinationId, EmailAddress, ImageRef, Latitude, Longitude, OfficeType,
    PhoneNumber, Price, ProvinceId, Rating, TypeConstraintError,
};

/// Raw create/edit submission shared by the destination, event and office pages.
///
/// Every value arrives as a string; blank means "not provided". Required
/// fields are not enforced here so the moderation guard can report them all.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContentForm {
    #[validate(length(min = 1))]
    pub kind: String,
    pub country_id: String,
    pub province_id: String,
    pub city_id: String,
    #[validate(length(max = 200))]
    pub name_ar: String,
    #[validate(length(max = 200))]
    pub name_en: String,
    #[validate(length(max = 200))]
    pub name_fr: String,
    #[validate(length(max = 5000))]
    pub description_ar: String,
    #[validate(length(max = 5000))]
    pub description_en: String,
    #[validate(length(max = 5000))]
    pub description_fr: String,
    pub main_image: String,
    #[validate(length(max = 20))]
    pub gallery: Vec<String>,
    pub latitude: String,
    pub longitude: String,
    pub rating: String,
    pub price: String,
    pub event_type: String,
    pub start_date: String,
    pub end_date: String,
    pub destination_id: String,
    pub location_ar: String,
    pub location_en: String,
    pub location_fr: String,
    pub office_type: String,
    pub phone: String,
    pub email: String,
    pub working_hours_ar: String,
    pub working_hours_en: String,
    pub working_hours_fr: String,
    pub address_ar: String,
    pub address_en: String,
    pub address_fr: String,
}

#[derive(Debug, Error)]
pub enum ContentFormError {
    #[error("Content form validation failed: {0}")]
    Validation(String),
    #[error("Content form contains invalid data: {0}")]
    TypeConstraint(String),
    /// One or more values could not be parsed; every offending field is listed.
    #[error("Content form contains invalid values: {0}")]
    Invalid(ValidationFailed),
}

impl From<ValidationErrors> for ContentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ContentForm> for RecordContent {
    type Error = ContentFormError;

    fn try_from(form: ContentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let kind = ContentKind::try_from(form.kind.as_str())?;

        let mut issues = Vec::new();
        let geo = parse_geo(&form, &mut issues);

        let details = match kind {
            ContentKind::Destination => KindDetails::Destination(DestinationDetails {
                main_image: optional(&form.main_image, "main_image", &mut issues, |v| {
                    ImageRef::new(v)
                }),
                gallery: parse_gallery(&form.gallery, &mut issues),
                latitude: optional(&form.latitude, "latitude", &mut issues, |v| {
                    Latitude::new(parse_number(v, "latitude")?)
                }),
                longitude: optional(&form.longitude, "longitude", &mut issues, |v| {
                    Longitude::new(parse_number(v, "longitude")?)
                }),
                rating: optional(&form.rating, "rating", &mut issues, |v| {
                    Rating::new(parse_number(v, "rating")?)
                }),
                entry_fee: optional(&form.price, "price", &mut issues, |v| {
                    Price::new(parse_number(v, "price")?)
                }),
            }),
            ContentKind::Event => KindDetails::Event(EventDetails {
                event_type: optional(&form.event_type, "event_type", &mut issues, |v| {
                    EventType::try_from(v)
                }),
                start_date: optional(&form.start_date, "start_date", &mut issues, parse_date),
                end_date: optional(&form.end_date, "end_date", &mut issues, parse_date),
                destination_id: optional(
                    &form.destination_id,
                    "destination_id",
                    &mut issues,
                    |v| DestinationId::new(v),
                ),
                location: LocalizedText::new(
                    &form.location_ar,
                    &form.location_en,
                    &form.location_fr,
                ),
                main_image: optional(&form.main_image, "main_image", &mut issues, |v| {
                    ImageRef::new(v)
                }),
                ticket_price: optional(&form.price, "price", &mut issues, |v| {
                    Price::new(parse_number(v, "price")?)
                }),
            }),
            ContentKind::Office => KindDetails::Office(OfficeDetails {
                office_type: optional(&form.office_type, "office_type", &mut issues, |v| {
                    OfficeType::new(v)
                }),
                phone: optional(&form.phone, "phone", &mut issues, |v| PhoneNumber::new(v)),
                email: optional(&form.email, "email", &mut issues, |v| EmailAddress::new(v)),
                working_hours: LocalizedText::new(
                    &form.working_hours_ar,
                    &form.working_hours_en,
                    &form.working_hours_fr,
                ),
                address: LocalizedText::new(&form.address_ar, &form.address_en, &form.address_fr),
                latitude: optional(&form.latitude, "latitude", &mut issues, |v| {
                    Latitude::new(parse_number(v, "latitude")?)
                }),
                longitude: optional(&form.longitude, "longitude", &mut issues, |v| {
                    Longitude::new(parse_number(v, "longitude")?)
                }),
            }),
        };

        ValidationFailed::check(issues).map_err(ContentFormError::Invalid)?;

        Ok(Self {
            geo,
            name: LocalizedText::new(&form.name_ar, &form.name_en, &form.name_fr),
            description: LocalizedText::new(
                &form.description_ar,
                &form.description_en,
                &form.description_fr,
            ),
            details,
        })
    }
}

fn parse_geo(form: &ContentForm, issues: &mut Vec<FieldIssue>) -> Option<GeoScope> {
    let country_id = optional(&form.country_id, "geo.country_id", issues, |v| CountryId::new(v));
    let province_id = optional(&form.province_id, "geo.province_id", issues, |v| {
        ProvinceId::new(v)
    });
    let city_id = optional(&form.city_id, "geo.city_id", issues, |v| CityId::new(v));

    match country_id {
        Some(country_id) => Some(GeoScope {
            country_id,
            province_id,
            city_id,
        }),
        None => {
            // A child selection without its country cannot be placed.
            if province_id.is_some() || city_id.is_some() {
                issues.push(FieldIssue::missing("geo.country_id"));
            }
            None
        }
    }
}

fn parse_gallery(raw: &[String], issues: &mut Vec<FieldIssue>) -> Vec<ImageRef> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, value)| {
            optional(value, &format!("gallery.{i}"), issues, |v| ImageRef::new(v))
        })
        .collect()
}

/// Parses a non-blank raw value, recording a field issue on failure.
pub(crate) fn optional<T, F>(
    raw: &str,
    field: &str,
    issues: &mut Vec<FieldIssue>,
    parse: F,
) -> Option<T>
where
    F: FnOnce(&str) -> Result<T, TypeConstraintError>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            issues.push(FieldIssue::from_constraint(field, &e));
            None
        }
    }
}

fn parse_number(raw: &str, field: &str) -> Result<f64, TypeConstraintError> {
    raw.parse::<f64>()
        .map_err(|_| TypeConstraintError::InvalidValue(format!("{field}: {raw}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TypeConstraintError::InvalidValue(format!("date: {raw}")))
}

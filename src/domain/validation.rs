//! Required-field tables and cross-field invariants per content kind.
//!
//! Two levels exist: field-level checks run on every create and edit, the
//! full table additionally requires every publish-critical field and guards
//! `submit`. Both report every problem at once.

use crate::domain::errors::{FieldIssue, IssueKind, ValidationFailed};
use crate::domain::locale::{Locale, LocalizedText};
use crate::domain::record::{ContentRecord, KindDetails, RecordContent};

/// Validation entry points for [`RecordContent`].
pub struct ValidationRules;

impl ValidationRules {
    /// Cross-field invariants only. Missing values are not reported.
    pub fn check_fields(content: &RecordContent) -> Result<(), ValidationFailed> {
        ValidationFailed::check(Self::field_issues(content))
    }

    /// Full required-field table plus the field-level invariants.
    pub fn check_submittable(content: &RecordContent) -> Result<(), ValidationFailed> {
        let mut issues = Self::required_issues(content);
        issues.extend(Self::field_issues(content));
        ValidationFailed::check(issues)
    }

    fn required_issues(content: &RecordContent) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        let primary = content.kind().primary_text_field();

        if content.geo.is_none() {
            issues.push(FieldIssue::missing("geo.country_id"));
        }
        require_locales(&mut issues, primary, &content.name, &[Locale::Ar, Locale::En]);
        require_locales(
            &mut issues,
            "description",
            &content.description,
            &[Locale::Ar, Locale::En],
        );

        match &content.details {
            KindDetails::Destination(destination) => {
                require(&mut issues, "main_image", destination.main_image.is_some());
                require(&mut issues, "latitude", destination.latitude.is_some());
                require(&mut issues, "longitude", destination.longitude.is_some());
            }
            KindDetails::Event(event) => {
                require(&mut issues, "event_type", event.event_type.is_some());
                require(&mut issues, "start_date", event.start_date.is_some());
                require(&mut issues, "end_date", event.end_date.is_some());
            }
            KindDetails::Office(office) => {
                require(&mut issues, "phone", office.phone.is_some());
                require(&mut issues, "email", office.email.is_some());
                require_locales(
                    &mut issues,
                    "working_hours",
                    &office.working_hours,
                    &[Locale::Ar, Locale::En],
                );
            }
        }

        issues
    }

    fn field_issues(content: &RecordContent) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        match &content.details {
            KindDetails::Destination(_) => {}
            KindDetails::Event(event) => {
                if let (Some(start), Some(end)) = (event.start_date, event.end_date)
                    && start > end
                {
                    issues.push(FieldIssue::new("end_date", IssueKind::DateOrder));
                }
            }
            KindDetails::Office(office) => {
                // Optional coordinates come as a pair.
                match (office.latitude.is_some(), office.longitude.is_some()) {
                    (true, false) => issues.push(FieldIssue::missing("longitude")),
                    (false, true) => issues.push(FieldIssue::missing("latitude")),
                    _ => {}
                }
            }
        }

        issues
    }
}

/// Full validation of a record's current content.
pub fn validate(record: &ContentRecord) -> Result<(), ValidationFailed> {
    ValidationRules::check_submittable(&record.content)
}

fn require(issues: &mut Vec<FieldIssue>, field: &str, present: bool) {
    if !present {
        issues.push(FieldIssue::missing(field));
    }
}

pub(crate) fn require_locales(
    issues: &mut Vec<FieldIssue>,
    field: &str,
    text: &LocalizedText,
    locales: &[Locale],
) {
    for locale in locales {
        if !text.has(*locale) {
            issues.push(FieldIssue::missing(format!("{field}.{locale}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::geo::GeoScope;
    use crate::domain::record::{ContentKind, DestinationDetails, EventDetails, OfficeDetails};
    use crate::domain::types::{
        CountryId, EmailAddress, ImageRef, Latitude, Longitude, PhoneNumber,
    };

    fn base(kind: ContentKind) -> RecordContent {
        let mut content = RecordContent::new(kind);
        content.geo = Some(GeoScope::new(CountryId::new("sa").unwrap()));
        content.name = LocalizedText::new("جدة", "Jeddah", "");
        content.description = LocalizedText::new("عروس البحر", "Bride of the Red Sea", "");
        content
    }

    fn complete_destination() -> RecordContent {
        let mut content = base(ContentKind::Destination);
        content.details = KindDetails::Destination(DestinationDetails {
            main_image: Some(ImageRef::new("/uploads/jeddah.jpg").unwrap()),
            latitude: Some(Latitude::new(21.5).unwrap()),
            longitude: Some(Longitude::new(39.2).unwrap()),
            ..Default::default()
        });
        content
    }

    #[test]
    fn complete_destination_is_submittable() {
        assert!(ValidationRules::check_submittable(&complete_destination()).is_ok());
    }

    #[test]
    fn destination_reports_every_missing_field() {
        let mut content = complete_destination();
        if let KindDetails::Destination(d) = &mut content.details {
            d.main_image = None;
            d.latitude = None;
        }

        let err = ValidationRules::check_submittable(&content).unwrap_err();
        assert_eq!(err.fields(), vec!["main_image", "latitude"]);
    }

    #[test]
    fn empty_draft_lists_common_fields() {
        let err =
            ValidationRules::check_submittable(&RecordContent::new(ContentKind::Destination))
                .unwrap_err();
        for field in [
            "geo.country_id",
            "name.ar",
            "name.en",
            "description.ar",
            "description.en",
            "main_image",
            "latitude",
            "longitude",
        ] {
            assert!(err.has_field(field), "missing {field}");
        }
        assert!(!err.has_field("name.fr"));
    }

    #[test]
    fn events_use_title_field_paths() {
        let mut content = RecordContent::new(ContentKind::Event);
        content.geo = Some(GeoScope::new(CountryId::new("sa").unwrap()));
        let err = ValidationRules::check_submittable(&content).unwrap_err();
        assert!(err.has_field("title.ar"));
        assert!(err.has_field("title.en"));
        assert!(err.has_field("event_type"));
        assert!(!err.has_field("name.ar"));
    }

    #[test]
    fn event_start_after_end_is_a_field_level_error() {
        let mut content = base(ContentKind::Event);
        content.details = KindDetails::Event(EventDetails {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        });

        let err = ValidationRules::check_fields(&content).unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue::new("end_date", IssueKind::DateOrder)]
        );
    }

    #[test]
    fn single_day_event_is_valid() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10);
        let mut content = base(ContentKind::Event);
        content.details = KindDetails::Event(EventDetails {
            start_date: day,
            end_date: day,
            ..Default::default()
        });
        assert!(ValidationRules::check_fields(&content).is_ok());
    }

    #[test]
    fn office_requires_contact_and_hours() {
        let mut content = base(ContentKind::Office);
        content.details = KindDetails::Office(OfficeDetails {
            phone: Some(PhoneNumber::new("+966 12 000 0000").unwrap()),
            working_hours: LocalizedText::arabic("٨ص - ٤م"),
            ..Default::default()
        });

        let err = ValidationRules::check_submittable(&content).unwrap_err();
        assert_eq!(err.fields(), vec!["email", "working_hours.en"]);

        if let KindDetails::Office(office) = &mut content.details {
            office.email = Some(EmailAddress::new("jeddah@visit.sa").unwrap());
            office.working_hours = LocalizedText::new("٨ص - ٤م", "8am - 4pm", "");
        }
        assert!(ValidationRules::check_submittable(&content).is_ok());
    }

    #[test]
    fn office_coordinates_come_in_pairs() {
        let mut content = base(ContentKind::Office);
        content.details = KindDetails::Office(OfficeDetails {
            latitude: Some(Latitude::new(21.5).unwrap()),
            ..Default::default()
        });
        let err = ValidationRules::check_fields(&content).unwrap_err();
        assert_eq!(err.fields(), vec!["longitude"]);
    }
}

//! Destinations, events and travel offices with their audit trail.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::geo::GeoScope;
use crate::domain::locale::{Locale, LocalizedText};
use crate::domain::moderation::Status;
use crate::domain::types::{
    ActorId, DestinationId, EmailAddress, ImageRef, Latitude, Longitude, OfficeType,
    PhoneNumber, Price, Rating, RecordId, TypeConstraintError,
};

/// Kind of moderated content record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Destination,
    Event,
    Office,
}

impl ContentKind {
    /// String representation used in forms and persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Event => "event",
            Self::Office => "office",
        }
    }

    /// Name of the primary text field: events carry a `title`, the rest a `name`.
    pub const fn primary_text_field(self) -> &'static str {
        match self {
            Self::Event => "title",
            Self::Destination | Self::Office => "name",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ContentKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "destination" => Ok(Self::Destination),
            "event" => Ok(Self::Event),
            "office" => Ok(Self::Office),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "content kind: {other}"
            ))),
        }
    }
}

/// Fixed set of event categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Festival,
    Season,
    Cultural,
    Sports,
    Religious,
    Other,
}

impl EventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Festival => "festival",
            Self::Season => "season",
            Self::Cultural => "cultural",
            Self::Sports => "sports",
            Self::Religious => "religious",
            Self::Other => "other",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for EventType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "festival" => Ok(Self::Festival),
            "season" => Ok(Self::Season),
            "cultural" => Ok(Self::Cultural),
            "sports" => Ok(Self::Sports),
            "religious" => Ok(Self::Religious),
            "other" => Ok(Self::Other),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "event type: {other}"
            ))),
        }
    }
}

/// Destination-specific attributes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DestinationDetails {
    pub main_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
    pub rating: Option<Rating>,
    pub entry_fee: Option<Price>,
}

/// Event-specific attributes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EventDetails {
    pub event_type: Option<EventType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Destination hosting the event, if any.
    pub destination_id: Option<DestinationId>,
    pub location: LocalizedText,
    pub main_image: Option<ImageRef>,
    pub ticket_price: Option<Price>,
}

/// Travel-office-specific attributes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OfficeDetails {
    pub office_type: Option<OfficeType>,
    pub phone: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
    pub working_hours: LocalizedText,
    pub address: LocalizedText,
    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
}

/// Kind tag plus the attributes only that kind carries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindDetails {
    Destination(DestinationDetails),
    Event(EventDetails),
    Office(OfficeDetails),
}

impl KindDetails {
    /// Empty attribute set for `kind`.
    pub fn empty(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Destination => Self::Destination(DestinationDetails::default()),
            ContentKind::Event => Self::Event(EventDetails::default()),
            ContentKind::Office => Self::Office(OfficeDetails::default()),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Destination(_) => ContentKind::Destination,
            Self::Event(_) => ContentKind::Event,
            Self::Office(_) => ContentKind::Office,
        }
    }
}

/// Editable body of a record. Edits replace it wholesale.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordContent {
    /// `None` only while a draft has no country selected yet.
    pub geo: Option<GeoScope>,
    /// `title` for events, `name` otherwise.
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub details: KindDetails,
}

impl RecordContent {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            geo: None,
            name: LocalizedText::default(),
            description: LocalizedText::default(),
            details: KindDetails::empty(kind),
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.details.kind()
    }

    /// Copy with every text bundle passed through [`LocalizedText::with_fallback_fill`].
    pub fn with_fallback_fill(&self) -> Self {
        let details = match &self.details {
            KindDetails::Destination(d) => KindDetails::Destination(d.clone()),
            KindDetails::Event(e) => KindDetails::Event(EventDetails {
                location: e.location.with_fallback_fill(),
                ..e.clone()
            }),
            KindDetails::Office(o) => KindDetails::Office(OfficeDetails {
                working_hours: o.working_hours.with_fallback_fill(),
                address: o.address.with_fallback_fill(),
                ..o.clone()
            }),
        };
        Self {
            geo: self.geo.clone(),
            name: self.name.with_fallback_fill(),
            description: self.description.with_fallback_fill(),
            details,
        }
    }
}

/// Who moved the record through moderation and when.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditTrail {
    pub submitted_by: Option<ActorId>,
    pub submitted_at: Option<NaiveDateTime>,
    pub reviewed_by: Option<ActorId>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub published_by: Option<ActorId>,
    pub published_at: Option<NaiveDateTime>,
    /// Reviewer note from the latest `reject`; cleared by `approve`.
    pub rejection_reason: Option<String>,
}

/// A destination, event or office moving through moderation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContentRecord {
    pub id: RecordId,
    pub content: RecordContent,
    pub status: Status,
    pub is_active: bool,
    pub audit: AuditTrail,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ContentRecord {
    /// New active record in `draft`.
    pub fn draft(id: RecordId, content: RecordContent, now: NaiveDateTime) -> Self {
        Self {
            id,
            content,
            status: Status::Draft,
            is_active: true,
            audit: AuditTrail::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    pub fn geo(&self) -> Option<&GeoScope> {
        self.content.geo.as_ref()
    }

    /// Primary text (`name` or `title`) resolved for `locale`.
    pub fn display_name(&self, locale: Locale) -> &str {
        self.content.name.resolve(locale)
    }

    /// Copy with `is_active` toggled. Allowed in every status.
    pub fn with_active(&self, is_active: bool, now: NaiveDateTime) -> Self {
        Self {
            is_active,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    #[test]
    fn new_records_start_as_active_drafts() {
        let record = ContentRecord::draft(
            RecordId::new("d-1").unwrap(),
            RecordContent::new(ContentKind::Destination),
            epoch(),
        );
        assert_eq!(record.status, Status::Draft);
        assert!(record.is_active);
        assert_eq!(record.audit, AuditTrail::default());
        assert_eq!(record.kind(), ContentKind::Destination);
    }

    #[test]
    fn parses_kind_and_event_type_literals() {
        assert_eq!(ContentKind::try_from("event").unwrap(), ContentKind::Event);
        assert!(ContentKind::try_from("city").is_err());
        assert_eq!(EventType::try_from("sports").unwrap(), EventType::Sports);
        assert!(EventType::try_from("concert").is_err());
    }

    #[test]
    fn fallback_fill_reaches_kind_specific_text() {
        let mut content = RecordContent::new(ContentKind::Office);
        content.name = LocalizedText::arabic("مكتب جدة");
        if let KindDetails::Office(office) = &mut content.details {
            office.working_hours = LocalizedText::arabic("٨ص - ٤م");
        }

        let filled = content.with_fallback_fill();
        assert_eq!(filled.name.fr, "مكتب جدة");
        match filled.details {
            KindDetails::Office(office) => assert_eq!(office.working_hours.en, "٨ص - ٤م"),
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn details_serialize_with_kind_tag() {
        let value = serde_json::to_value(KindDetails::empty(ContentKind::Event)).unwrap();
        assert_eq!(value["kind"], "event");
    }

    #[test]
    fn toggling_active_refreshes_updated_at() {
        let record = ContentRecord::draft(
            RecordId::new("o-1").unwrap(),
            RecordContent::new(ContentKind::Office),
            epoch(),
        );
        let later = DateTime::from_timestamp(60, 0).unwrap().naive_utc();
        let hidden = record.with_active(false, later);
        assert!(!hidden.is_active);
        assert_eq!(hidden.updated_at, later);
        assert_eq!(hidden.status, Status::Draft);
    }
}

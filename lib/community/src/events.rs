//! The campus event calendar.
//!
//! Events are kept newest-first in insertion order. Calendar days are UTC
//! dates of each event's start time.

use campus_gallery_core::{EventId, Result};
use campus_gallery_platform_access::Session;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::info;

use crate::error::{ContentError, authorize};

/// Poster shown when an event has none of its own.
pub const PLACEHOLDER_POSTER_URL: &str = "https://placehold.co/400x600.png";

/// Category of a campus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Tech,
    Cultural,
    Sports,
    Academic,
}

impl EventKind {
    /// Returns the display name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Cultural => "Cultural",
            Self::Sports => "Sports",
            Self::Academic => "Academic",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event on the campus calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusEvent {
    id: EventId,
    title: String,
    starts_at: DateTime<Utc>,
    kind: EventKind,
    description: String,
    poster_url: String,
    poster_hint: String,
}

impl CampusEvent {
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn poster_url(&self) -> &str {
        &self.poster_url
    }

    /// Short description of the poster image, used as alt text.
    #[must_use]
    pub fn poster_hint(&self) -> &str {
        &self.poster_hint
    }

    /// Calendar day the event falls on.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }
}

/// Editable fields for creating or updating an event.
///
/// Title, start time, and kind are required; the rest have defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub kind: Option<EventKind>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub poster_hint: Option<String>,
}

impl EventDraft {
    /// Starts a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, starts_at: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            title: title.into(),
            starts_at: Some(starts_at),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Sets the start from a calendar day and an `HH:MM` time of day.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if the time is not `HH:MM`.
    pub fn with_schedule(
        mut self,
        day: NaiveDate,
        time: &str,
    ) -> Result<Self, ContentError> {
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
            ContentError::InvalidTime {
                value: time.to_string(),
            }
        })?;
        self.starts_at = Some(day.and_time(time).and_utc());
        Ok(self)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_poster(mut self, url: impl Into<String>, hint: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self.poster_hint = Some(hint.into());
        self
    }

    fn into_event(self, id: EventId) -> Result<CampusEvent, ContentError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ContentError::MissingField { field: "title" }.into());
        }
        let starts_at = self
            .starts_at
            .ok_or(ContentError::MissingField { field: "starts_at" })?;
        let kind = self.kind.ok_or(ContentError::MissingField { field: "kind" })?;

        Ok(CampusEvent {
            id,
            title,
            starts_at,
            kind,
            description: self.description.unwrap_or_default(),
            poster_url: non_empty(self.poster_url)
                .unwrap_or_else(|| PLACEHOLDER_POSTER_URL.to_string()),
            poster_hint: non_empty(self.poster_hint)
                .unwrap_or_else(|| format!("{} poster", kind.as_str().to_lowercase())),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// In-memory event calendar.
#[derive(Debug, Clone, Default)]
pub struct EventCalendar {
    events: Vec<CampusEvent>,
}

impl EventCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events, newest first.
    #[must_use]
    pub fn events(&self) -> &[CampusEvent] {
        &self.events
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&CampusEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Adds an event to the top of the calendar.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the session may not manage content, or
    /// `MissingField` if the draft is incomplete.
    pub fn add(
        &mut self,
        session: &Session,
        draft: EventDraft,
    ) -> Result<&CampusEvent, ContentError> {
        authorize(session, "add events")?;
        let event = draft.into_event(EventId::new())?;
        info!(event_id = %event.id, title = %event.title, "event added");
        self.events.insert(0, event);
        Ok(&self.events[0])
    }

    /// Replaces an event's fields, keeping its id and position.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized`, `NotFound`, or `MissingField`.
    pub fn update(
        &mut self,
        session: &Session,
        id: EventId,
        draft: EventDraft,
    ) -> Result<&CampusEvent, ContentError> {
        authorize(session, "edit events")?;
        let index = self.position(id)?;
        self.events[index] = draft.into_event(id)?;
        info!(event_id = %id, "event updated");
        Ok(&self.events[index])
    }

    /// Removes an event and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` or `NotFound`.
    pub fn remove(
        &mut self,
        session: &Session,
        id: EventId,
    ) -> Result<CampusEvent, ContentError> {
        authorize(session, "delete events")?;
        let index = self.position(id)?;
        let event = self.events.remove(index);
        info!(event_id = %id, title = %event.title, "event deleted");
        Ok(event)
    }

    /// Events starting on the given day, newest first.
    #[must_use]
    pub fn on_day(&self, day: NaiveDate) -> Vec<&CampusEvent> {
        self.events.iter().filter(|e| e.day() == day).collect()
    }

    /// Distinct days that have at least one event.
    #[must_use]
    pub fn event_days(&self) -> BTreeSet<NaiveDate> {
        self.events.iter().map(CampusEvent::day).collect()
    }

    fn position(&self, id: EventId) -> Result<usize, ContentError> {
        self.events.iter().position(|e| e.id == id).ok_or_else(|| {
            ContentError::NotFound {
                kind: "event",
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_gallery_platform_access::{AccessPolicy, Identity};
    use chrono::TimeZone;

    fn admin() -> Session {
        let identity = Identity::new("uid_admin")
            .with_email("admin@gehu.ac.in")
            .with_provider("password");
        Session::resolve(&AccessPolicy::default(), Some(identity), None)
    }

    fn student() -> Session {
        let identity = Identity::new("uid_student")
            .with_email("student@gehu.ac.in")
            .with_provider("password");
        Session::resolve(&AccessPolicy::default(), Some(identity), None)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid date")
    }

    fn symposium() -> EventDraft {
        EventDraft::new("Annual Tech Symposium", at(2024, 10, 15, 10), EventKind::Tech)
            .with_description("Talks, workshops, and a hackathon.")
    }

    #[test]
    fn add_fills_defaults() {
        let mut calendar = EventCalendar::new();
        let event = calendar.add(&admin(), symposium()).expect("add");

        assert_eq!(event.title(), "Annual Tech Symposium");
        assert_eq!(event.kind(), EventKind::Tech);
        assert_eq!(event.poster_url(), PLACEHOLDER_POSTER_URL);
        assert_eq!(event.poster_hint(), "tech poster");
        assert_eq!(event.description(), "Talks, workshops, and a hackathon.");
    }

    #[test]
    fn add_puts_newest_first() {
        let mut calendar = EventCalendar::new();
        calendar.add(&admin(), symposium()).expect("add");
        let festival = EventDraft::new(
            "Spring Cultural Festival",
            at(2024, 11, 5, 14),
            EventKind::Cultural,
        );
        calendar.add(&admin(), festival).expect("add");

        assert_eq!(calendar.events()[0].title(), "Spring Cultural Festival");
        assert_eq!(calendar.events().len(), 2);
    }

    #[test]
    fn non_admin_cannot_add() {
        let mut calendar = EventCalendar::new();
        assert!(calendar.add(&student(), symposium()).is_err());
        assert!(calendar.add(&Session::anonymous(), symposium()).is_err());
        assert!(calendar.events().is_empty());
    }

    #[test]
    fn demo_superadmin_can_add() {
        let mut calendar = EventCalendar::new();
        let demo = Session::demo(&AccessPolicy::default());
        assert!(calendar.add(&demo, symposium()).is_ok());
    }

    #[test]
    fn incomplete_draft_is_rejected() {
        let mut calendar = EventCalendar::new();

        let untitled = EventDraft::new("   ", at(2024, 10, 15, 10), EventKind::Tech);
        assert!(calendar.add(&admin(), untitled).is_err());

        let undated = EventDraft {
            title: "Guest Lecture".to_string(),
            kind: Some(EventKind::Academic),
            ..EventDraft::default()
        };
        assert!(calendar.add(&admin(), undated).is_err());

        let untyped = EventDraft {
            title: "Guest Lecture".to_string(),
            starts_at: Some(at(2024, 10, 2, 16)),
            ..EventDraft::default()
        };
        assert!(calendar.add(&admin(), untyped).is_err());
        assert!(calendar.events().is_empty());
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut calendar = EventCalendar::new();
        let id = calendar.add(&admin(), symposium()).expect("add").id();
        calendar
            .add(&admin(), EventDraft::new("Sports Day", at(2024, 9, 20, 9), EventKind::Sports))
            .expect("add");

        let edited = EventDraft::new("Tech Symposium 2024", at(2024, 10, 16, 10), EventKind::Tech)
            .with_poster("https://cdn.example.com/p.png", "robot poster");
        let event = calendar.update(&admin(), id, edited).expect("update");

        assert_eq!(event.id(), id);
        assert_eq!(event.poster_hint(), "robot poster");
        assert_eq!(calendar.events()[1].title(), "Tech Symposium 2024");
    }

    #[test]
    fn update_missing_event_fails() {
        let mut calendar = EventCalendar::new();
        assert!(calendar.update(&admin(), EventId::new(), symposium()).is_err());
    }

    #[test]
    fn remove_returns_event() {
        let mut calendar = EventCalendar::new();
        let id = calendar.add(&admin(), symposium()).expect("add").id();

        assert!(calendar.remove(&student(), id).is_err());
        let removed = calendar.remove(&admin(), id).expect("remove");

        assert_eq!(removed.id(), id);
        assert!(calendar.get(id).is_none());
        assert!(calendar.remove(&admin(), id).is_err());
    }

    #[test]
    fn on_day_filters_by_calendar_day() {
        let mut calendar = EventCalendar::new();
        calendar.add(&admin(), symposium()).expect("add");
        calendar
            .add(&admin(), EventDraft::new("Hack Night", at(2024, 10, 15, 20), EventKind::Tech))
            .expect("add");
        calendar
            .add(&admin(), EventDraft::new("AI Ethics", at(2024, 10, 2, 16), EventKind::Academic))
            .expect("add");

        let day = NaiveDate::from_ymd_opt(2024, 10, 15).expect("valid date");
        let titles: Vec<&str> = calendar.on_day(day).iter().map(|e| e.title()).collect();

        assert_eq!(titles, vec!["Hack Night", "Annual Tech Symposium"]);
        assert_eq!(calendar.event_days().len(), 2);
    }

    #[test]
    fn schedule_combines_day_and_time() {
        let day = NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid date");
        let draft = EventDraft::default()
            .with_schedule(day, "14:30")
            .expect("valid time");

        assert_eq!(draft.starts_at, Some(at(2024, 11, 5, 14) + chrono::Duration::minutes(30)));
    }

    #[test]
    fn schedule_rejects_bad_time() {
        let day = NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid date");
        assert!(EventDraft::default().with_schedule(day, "2pm").is_err());
    }

    #[test]
    fn event_kind_serialization_format() {
        let json = serde_json::to_string(&EventKind::Cultural).expect("serialize");
        assert_eq!(json, "\"Cultural\"");
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Draft, Resource, Retrievable, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

/// A club event (touring, gathering, charity ride).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 date or date-time.
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Event {
    /// Start of the event, or `None` when `date` is not a recognizable
    /// ISO value. Date-only values are taken as UTC midnight.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(at.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|at| at.and_utc())
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|at| at >= now)
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|at| at < now)
    }
}

impl Resource for Event {
    type Id = i64;
    type Draft = EventDraft;
    type Filter = ();

    const PATH: &'static str = "/events";
    const SINGULAR: &'static str = "event";
    const PLURAL: &'static str = "events";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.image);
    }
}

impl Retrievable for Event {}

#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub image: Option<Attachment>,
}

impl Draft for EventDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let form = MultipartForm::new()
            .text("title", &self.title)
            .text("description", &self.description)
            .text("date", &self.date)
            .text("location", &self.location)
            .optional_file("image", self.image.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

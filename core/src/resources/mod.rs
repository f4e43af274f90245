//! Typed records and write payloads for every resource the club site serves.
//!
//! # Design
//! Each resource is a thin configuration over the generic client and state
//! machinery: a collection path, labels for fallback messages, a `Draft`
//! payload that knows its body shape (JSON or multipart), and the list of
//! media fields to normalize. Nothing else differs between resources.
//!
//! Records mirror the server's schema but ignore unknown fields, so the
//! server may add columns without breaking older clients.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;

pub mod about;
pub mod categories;
pub mod events;
pub mod gallery;
pub mod home;
pub mod milestones;
pub mod news;
pub mod products;

pub use about::{AboutContent, AboutDraft, ManagementMember, ValueItem};
pub use categories::{Category, CategoryDraft};
pub use events::{Event, EventDraft};
pub use gallery::{GalleryDraft, GalleryItem, GalleryKind};
pub use home::{HomeContent, HomeDraft};
pub use milestones::{Milestone, MilestoneDraft};
pub use news::{News, NewsDraft};
pub use products::{Product, ProductCategory, ProductDraft};

/// A create/update payload that can render itself as a request body.
pub trait Draft {
    fn to_body(&self) -> Result<RequestBody, ApiError>;
}

/// Query parameters attached to a list request.
pub trait ListFilter {
    fn query(&self) -> Vec<(&'static str, String)>;
}

impl ListFilter for () {
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// A list-shaped resource addressed by id under `PATH`.
pub trait Resource: Clone + Debug + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display + Debug;
    type Draft: Draft;
    type Filter: ListFilter;

    /// Collection path relative to the API base, e.g. `/events`.
    const PATH: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;

    /// Rewrites every media-bearing field to its absolute form.
    fn normalize_media(&mut self, _media: &MediaResolver) {}
}

/// Resources the server also serves one at a time at `PATH/{id}`.
/// Categories are list-only, so asking for one does not compile.
pub trait Retrievable: Resource {}

/// A resource with exactly one logical record, fetched and updated in place.
pub trait SingletonResource: Clone + Debug + DeserializeOwned {
    type Draft: Draft;

    const PATH: &'static str;
    const LABEL: &'static str;

    fn normalize_media(&mut self, _media: &MediaResolver) {}
}

/// Server-managed bookkeeping columns present on every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Accepts `150000`, `150000.5` or `"150000.00"`; SQL decimal columns are
/// commonly serialized as strings.
pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Same as `lenient_f64` for integer columns.
pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrText {
        Int(i64),
        Text(String),
    }

    match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(n) => Ok(n),
        IntOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Years arrive as `"2019"` or `2019` depending on the column type.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

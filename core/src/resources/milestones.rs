use serde::{Deserialize, Serialize};

use super::{Draft, Resource, Retrievable, Timestamps, lenient_string};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

/// A year in the club's history and what was achieved in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Resource for Milestone {
    type Id = i64;
    type Draft = MilestoneDraft;
    type Filter = ();

    const PATH: &'static str = "/milestones";
    const SINGULAR: &'static str = "milestone";
    const PLURAL: &'static str = "milestones";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.image);
    }
}

impl Retrievable for Milestone {}

#[derive(Debug, Clone, Default)]
pub struct MilestoneDraft {
    pub year: String,
    pub title: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub image: Option<Attachment>,
}

impl Draft for MilestoneDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let achievements: Vec<&str> = self
            .achievements
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        let form = MultipartForm::new()
            .text("year", &self.year)
            .text("title", &self.title)
            .text("description", &self.description)
            .json_text("achievements", &achievements)?
            .optional_file("image", self.image.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

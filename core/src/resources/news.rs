use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Draft, Resource, Retrievable, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    pub date: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Resource for News {
    type Id = i64;
    type Draft = NewsDraft;
    type Filter = ();

    const PATH: &'static str = "/news";
    const SINGULAR: &'static str = "news";
    const PLURAL: &'static str = "news";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.image);
    }
}

impl Retrievable for News {}

#[derive(Debug, Clone, Default)]
pub struct NewsDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    /// Publication date; the current instant is sent when left empty.
    pub date: Option<String>,
    pub external_link: Option<String>,
    pub image: Option<Attachment>,
}

impl Draft for NewsDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let date = match self.date.as_deref().filter(|d| !d.is_empty()) {
            Some(date) => date.to_string(),
            None => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let form = MultipartForm::new()
            .text("title", &self.title)
            .text("excerpt", &self.excerpt)
            .text("content", &self.content)
            .text("date", date)
            .optional_text("external_link", self.external_link.as_deref())
            .optional_file("image", self.image.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

use serde::{Deserialize, Serialize};

use super::{Draft, Resource, Retrievable, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::{self, MediaResolver};
use crate::multipart::{Attachment, MultipartForm};

/// Site-relative image shown for videos whose link has no YouTube id.
pub const VIDEO_PLACEHOLDER: &str = "/placeholder-youtube.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    Image,
    Video,
}

impl GalleryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GalleryKind::Image => "image",
            GalleryKind::Video => "video",
        }
    }
}

/// A gallery entry: an uploaded photo or a YouTube video link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: GalleryKind,
    /// Upload path for images, YouTube link for videos.
    #[serde(default)]
    pub url: String,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl GalleryItem {
    /// Image to show in a grid. Videos without an explicit thumbnail fall
    /// back to the one YouTube publishes for the embedded video id, or to
    /// `VIDEO_PLACEHOLDER` when the link carries no recognizable id.
    pub fn display_thumbnail(&self) -> Option<String> {
        if let Some(thumbnail) = self.thumbnail_url.as_deref().filter(|t| !t.is_empty()) {
            return Some(thumbnail.to_string());
        }
        match self.kind {
            GalleryKind::Video => {
                Some(media::youtube_thumbnail(&self.url).unwrap_or_else(|| VIDEO_PLACEHOLDER.to_string()))
            }
            GalleryKind::Image => Some(self.url.clone()).filter(|u| !u.is_empty()),
        }
    }

    pub fn embed_url(&self) -> Option<String> {
        match self.kind {
            GalleryKind::Video => media::youtube_embed_url(&self.url),
            GalleryKind::Image => None,
        }
    }
}

impl Resource for GalleryItem {
    type Id = i64;
    type Draft = GalleryDraft;
    type Filter = ();

    const PATH: &'static str = "/gallery";
    const SINGULAR: &'static str = "gallery item";
    const PLURAL: &'static str = "gallery items";

    fn id(&self) -> i64 {
        self.id
    }

    /// Only image urls are stored uploads; video urls are external links.
    fn normalize_media(&mut self, media: &MediaResolver) {
        if self.kind == GalleryKind::Image {
            self.url = media.resolve(Some(&self.url));
        }
        media.normalize(&mut self.thumbnail_url);
    }
}

impl Retrievable for GalleryItem {}

/// Images carry an upload; videos carry a link and an optional thumbnail.
#[derive(Debug, Clone)]
pub struct GalleryDraft {
    pub title: String,
    pub kind: GalleryKind,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub image: Option<Attachment>,
}

impl GalleryDraft {
    pub fn image(title: impl Into<String>, image: Attachment) -> Self {
        Self {
            title: title.into(),
            kind: GalleryKind::Image,
            description: None,
            url: None,
            thumbnail_url: None,
            duration: None,
            image: Some(image),
        }
    }

    pub fn video(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: GalleryKind::Video,
            description: None,
            url: Some(url.into()),
            thumbnail_url: None,
            duration: None,
            image: None,
        }
    }
}

impl Draft for GalleryDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let form = MultipartForm::new()
            .text("title", &self.title)
            .text("type", self.kind.as_str())
            .optional_text("description", self.description.as_deref().filter(|d| !d.is_empty()))
            .optional_text("duration", self.duration.as_deref().filter(|d| !d.is_empty()));
        let form = match self.kind {
            GalleryKind::Video => form
                .optional_text("url", self.url.as_deref())
                .optional_text("thumbnailUrl", self.thumbnail_url.as_deref().filter(|t| !t.is_empty())),
            GalleryKind::Image => form.optional_file("image", self.image.as_ref()),
        };
        Ok(RequestBody::Multipart(form))
    }
}

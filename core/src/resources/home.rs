use serde::{Deserialize, Serialize};

use super::{Draft, SingletonResource, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

/// Hero section and imagery of the landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeContent {
    pub id: i64,
    pub hero_title: String,
    pub hero_tagline: String,
    pub bg_video: Option<String>,
    pub about_image: Option<String>,
    pub cta_image: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl SingletonResource for HomeContent {
    type Draft = HomeDraft;

    const PATH: &'static str = "/home";
    const LABEL: &'static str = "home content";

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.bg_video);
        media.normalize(&mut self.about_image);
        media.normalize(&mut self.cta_image);
    }
}

/// Uploads are optional; omitted ones keep the server's current file.
#[derive(Debug, Clone, Default)]
pub struct HomeDraft {
    pub hero_title: String,
    pub hero_tagline: String,
    pub bg_video: Option<Attachment>,
    pub about_image: Option<Attachment>,
    pub cta_image: Option<Attachment>,
}

impl Draft for HomeDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let form = MultipartForm::new()
            .text("hero_title", &self.hero_title)
            .text("hero_tagline", &self.hero_tagline)
            .optional_file("bg_video", self.bg_video.as_ref())
            .optional_file("about_image", self.about_image.as_ref())
            .optional_file("cta_image", self.cta_image.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_all_three_media_fields() {
        let mut home = HomeContent {
            id: 1,
            bg_video: Some("/uploads/bg.mp4".to_string()),
            about_image: Some("https://other.host/about.jpg".to_string()),
            cta_image: None,
            ..Default::default()
        };
        home.normalize_media(&MediaResolver::new("http://cdn.test"));
        assert_eq!(home.bg_video.as_deref(), Some("http://cdn.test/uploads/bg.mp4"));
        assert_eq!(home.about_image.as_deref(), Some("https://other.host/about.jpg"));
        assert_eq!(home.cta_image, None);
    }

    #[test]
    fn draft_only_uploads_chosen_files() {
        let draft = HomeDraft {
            hero_title: "Ride Together".to_string(),
            cta_image: Some(Attachment::new("cta.png", "image/png", vec![0])),
            ..Default::default()
        };
        let RequestBody::Multipart(form) = draft.to_body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(form.files("cta_image").len(), 1);
        assert!(form.files("bg_video").is_empty());
        assert_eq!(form.text_value("hero_tagline"), Some(""));
    }
}

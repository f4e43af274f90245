use serde::{Deserialize, Serialize};

use super::{Draft, SingletonResource, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

/// One of the club's core values as shown on the about page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueItem {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementMember {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Content of the about page. There is exactly one of these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    pub id: i64,
    pub hero_title: String,
    pub hero_tagline: String,
    pub history_title: String,
    pub history_text: String,
    pub history_image_url: Option<String>,
    pub vision_title: String,
    pub vision_text: String,
    pub mission_title: String,
    pub mission_text: String,
    pub values: Vec<ValueItem>,
    pub management: Vec<ManagementMember>,
    pub member_benefits: Vec<String>,
    pub member_registration_link: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub contact_address: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl SingletonResource for AboutContent {
    type Draft = AboutDraft;

    const PATH: &'static str = "/about";
    const LABEL: &'static str = "about content";

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.history_image_url);
        for member in &mut self.management {
            media.normalize(&mut member.photo_url);
        }
    }
}

/// Full replacement of the about page.
///
/// New management photos are uploaded as repeated `management_images`
/// parts; `management_image_indexes` says which member each one belongs to.
#[derive(Debug, Clone, Default)]
pub struct AboutDraft {
    pub hero_title: String,
    pub hero_tagline: String,
    pub history_title: String,
    pub history_text: String,
    pub vision_title: String,
    pub vision_text: String,
    pub mission_title: String,
    pub mission_text: String,
    pub values: Vec<ValueItem>,
    pub management: Vec<ManagementMember>,
    pub member_benefits: Vec<String>,
    pub member_registration_link: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub contact_address: String,
    pub history_image: Option<Attachment>,
    pub management_images: Vec<(usize, Attachment)>,
}

impl AboutDraft {
    /// Starts an edit from the content currently held in state. Photo URLs
    /// are turned back into stored paths so the absolute form is never
    /// persisted.
    pub fn from_content(content: &AboutContent, media: &MediaResolver) -> Self {
        let management = content
            .management
            .iter()
            .map(|member| ManagementMember {
                photo_url: member.photo_url.as_deref().map(|url| media.to_stored(url)),
                ..member.clone()
            })
            .collect();

        Self {
            hero_title: content.hero_title.clone(),
            hero_tagline: content.hero_tagline.clone(),
            history_title: content.history_title.clone(),
            history_text: content.history_text.clone(),
            vision_title: content.vision_title.clone(),
            vision_text: content.vision_text.clone(),
            mission_title: content.mission_title.clone(),
            mission_text: content.mission_text.clone(),
            values: content.values.clone(),
            management,
            member_benefits: content.member_benefits.clone(),
            member_registration_link: content.member_registration_link.clone(),
            contact_phone: content.contact_phone.clone(),
            contact_email: content.contact_email.clone(),
            contact_address: content.contact_address.clone(),
            history_image: None,
            management_images: Vec::new(),
        }
    }
}

impl Draft for AboutDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let mut form = MultipartForm::new()
            .json_text("member_benefits", &self.member_benefits)?
            .text("member_registration_link", self.member_registration_link.as_deref().unwrap_or_default())
            .text("hero_title", &self.hero_title)
            .text("hero_tagline", &self.hero_tagline)
            .text("history_title", &self.history_title)
            .text("history_text", &self.history_text)
            .text("vision_title", &self.vision_title)
            .text("vision_text", &self.vision_text)
            .text("mission_title", &self.mission_title)
            .text("mission_text", &self.mission_text)
            .json_text("values", &self.values)?
            .json_text("management", &self.management)?
            .text("contact_phone", &self.contact_phone)
            .text("contact_email", &self.contact_email)
            .text("contact_address", &self.contact_address)
            .optional_file("history_image", self.history_image.as_ref());

        for (_, photo) in &self.management_images {
            form = form.file("management_images", photo.clone());
        }
        for (index, _) in &self.management_images {
            form = form.text("management_image_indexes", index.to_string());
        }
        Ok(RequestBody::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::PartValue;

    fn content() -> AboutContent {
        AboutContent {
            id: 1,
            hero_title: "Tentang Kami".to_string(),
            history_image_url: Some("/uploads/history.jpg".to_string()),
            management: vec![
                ManagementMember {
                    position: "Ketua".to_string(),
                    name: "Budi".to_string(),
                    photo_url: Some("/uploads/budi.jpg".to_string()),
                },
                ManagementMember {
                    position: "Sekretaris".to_string(),
                    name: "Sari".to_string(),
                    photo_url: None,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn normalize_covers_history_and_management_photos() {
        let mut about = content();
        about.normalize_media(&MediaResolver::new("http://cdn.test"));
        assert_eq!(about.history_image_url.as_deref(), Some("http://cdn.test/uploads/history.jpg"));
        assert_eq!(about.management[0].photo_url.as_deref(), Some("http://cdn.test/uploads/budi.jpg"));
        assert_eq!(about.management[1].photo_url, None);
    }

    #[test]
    fn draft_from_normalized_content_sends_stored_paths() {
        let media = MediaResolver::new("http://cdn.test");
        let mut about = content();
        about.normalize_media(&media);

        let draft = AboutDraft::from_content(&about, &media);
        let RequestBody::Multipart(form) = draft.to_body().unwrap() else {
            panic!("expected multipart body");
        };
        let management: Vec<ManagementMember> = serde_json::from_str(form.text_value("management").unwrap()).unwrap();
        assert_eq!(management[0].photo_url.as_deref(), Some("/uploads/budi.jpg"));
    }

    #[test]
    fn management_uploads_are_paired_with_indexes() {
        let mut draft = AboutDraft::from_content(&content(), &MediaResolver::new("http://cdn.test"));
        draft.management_images = vec![
            (1, Attachment::new("sari.jpg", "image/jpeg", vec![1])),
            (0, Attachment::new("budi.jpg", "image/jpeg", vec![2])),
        ];
        let RequestBody::Multipart(form) = draft.to_body().unwrap() else {
            panic!("expected multipart body");
        };

        let files: Vec<&str> = form.files("management_images").iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(files, vec!["sari.jpg", "budi.jpg"]);
        let indexes: Vec<&str> = form
            .parts()
            .iter()
            .filter(|p| p.name == "management_image_indexes")
            .filter_map(|p| match &p.value {
                PartValue::Text(t) => Some(t.as_str()),
                PartValue::File(_) => None,
            })
            .collect();
        assert_eq!(indexes, vec!["1", "0"]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let about: AboutContent = serde_json::from_str(r#"{"id":1,"hero_title":"Hi"}"#).unwrap();
        assert!(about.values.is_empty());
        assert!(about.management.is_empty());
        assert!(about.member_benefits.is_empty());
    }
}

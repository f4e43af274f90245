//! Multipart form decoding and per-resource field schemas.

use axum::extract::Multipart;
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub filename: String,
    pub size: usize,
}

/// Text parts and uploaded files in arrival order.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: Vec<(String, String)>,
    pub uploads: Vec<Upload>,
}

impl FormFields {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.iter().find(|(key, _)| key == name).map(|(_, v)| v.as_str())
    }

    pub fn texts<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.texts.iter().filter(move |(key, _)| key == name).map(|(_, v)| v.as_str())
    }
}

pub async fn read_form(mut multipart: Multipart) -> Result<FormFields, AppError> {
    let mut form = FormFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let bytes = field.bytes().await.map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.uploads.push(Upload {
                    field: name,
                    filename,
                    size: bytes.len(),
                });
            }
            None => {
                let text = field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.texts.push((name, text));
            }
        }
    }
    Ok(form)
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    JsonList,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

/// Which form parts a resource accepts and where uploads are stored.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
    /// (form part name, record field)
    pub uploads: &'static [(&'static str, &'static str)],
}

pub const PRODUCT_CATEGORIES: &[&str] = &["jersey", "jaket", "aksesoris", "sparepart"];

pub static EVENTS: Schema = Schema {
    fields: &[
        required("title", FieldKind::Text),
        field("description", FieldKind::Text),
        required("date", FieldKind::Text),
        field("location", FieldKind::Text),
    ],
    uploads: &[("image", "image")],
};

pub static NEWS: Schema = Schema {
    fields: &[
        required("title", FieldKind::Text),
        field("excerpt", FieldKind::Text),
        field("content", FieldKind::Text),
        required("date", FieldKind::Text),
        field("external_link", FieldKind::Text),
    ],
    uploads: &[("image", "image")],
};

pub static PRODUCTS: Schema = Schema {
    fields: &[
        required("name", FieldKind::Text),
        required("price", FieldKind::Number),
        field("description", FieldKind::Text),
        required("category", FieldKind::OneOf(PRODUCT_CATEGORIES)),
        field("stock", FieldKind::Integer),
    ],
    uploads: &[("image", "image")],
};

pub static GALLERY: Schema = Schema {
    fields: &[
        required("title", FieldKind::Text),
        required("type", FieldKind::OneOf(&["image", "video"])),
        field("description", FieldKind::Text),
        field("url", FieldKind::Text),
        field("thumbnailUrl", FieldKind::Text),
        field("duration", FieldKind::Text),
    ],
    uploads: &[("image", "url")],
};

pub static MILESTONES: Schema = Schema {
    fields: &[
        required("year", FieldKind::Text),
        required("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("achievements", FieldKind::JsonList),
    ],
    uploads: &[("image", "image")],
};

pub static ABOUT: Schema = Schema {
    fields: &[
        field("hero_title", FieldKind::Text),
        field("hero_tagline", FieldKind::Text),
        field("history_title", FieldKind::Text),
        field("history_text", FieldKind::Text),
        field("vision_title", FieldKind::Text),
        field("vision_text", FieldKind::Text),
        field("mission_title", FieldKind::Text),
        field("mission_text", FieldKind::Text),
        field("values", FieldKind::JsonList),
        field("management", FieldKind::JsonList),
        field("member_benefits", FieldKind::JsonList),
        field("member_registration_link", FieldKind::Text),
        field("contact_phone", FieldKind::Text),
        field("contact_email", FieldKind::Text),
        field("contact_address", FieldKind::Text),
    ],
    uploads: &[("history_image", "history_image_url")],
};

pub static HOME: Schema = Schema {
    fields: &[field("hero_title", FieldKind::Text), field("hero_tagline", FieldKind::Text)],
    uploads: &[("bg_video", "bg_video"), ("about_image", "about_image"), ("cta_image", "cta_image")],
};

impl FieldKind {
    fn parse(self, name: &str, raw: &str) -> Result<Value, AppError> {
        let invalid = || AppError::BadRequest(format!("{name} is invalid"));
        match self {
            FieldKind::Text => Ok(Value::String(raw.to_string())),
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(invalid),
            FieldKind::Integer => raw.trim().parse::<i64>().map(Value::from).map_err(|_| invalid()),
            FieldKind::JsonList => match serde_json::from_str::<Value>(raw) {
                Ok(list @ Value::Array(_)) => Ok(list),
                _ => Err(invalid()),
            },
            FieldKind::OneOf(allowed) => allowed
                .iter()
                .find(|candidate| **candidate == raw)
                .map(|candidate| Value::String(candidate.to_string()))
                .ok_or_else(invalid),
        }
    }

    fn empty(self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::JsonList => Value::Array(Vec::new()),
            FieldKind::Integer => Value::from(0),
            FieldKind::Number | FieldKind::OneOf(_) => Value::Null,
        }
    }
}

impl Schema {
    /// Copies recognized form parts onto `record`. On create, required
    /// fields must be present and absent optional ones are initialized.
    /// `stored` pairs each upload's form part name with its stored path.
    pub fn apply(
        &self,
        record: &mut Map<String, Value>,
        form: &FormFields,
        stored: &[(String, String)],
        creating: bool,
    ) -> Result<(), AppError> {
        for field in self.fields {
            match form.text(field.name) {
                Some(raw) if field.required && raw.trim().is_empty() => {
                    return Err(AppError::BadRequest(format!("{} is required", field.name)));
                }
                Some(raw) => {
                    record.insert(field.name.to_string(), field.kind.parse(field.name, raw)?);
                }
                None if creating && field.required => {
                    return Err(AppError::BadRequest(format!("{} is required", field.name)));
                }
                None if creating => {
                    record.entry(field.name).or_insert_with(|| field.kind.empty());
                }
                None => {}
            }
        }

        for (part, target) in self.uploads {
            match stored.iter().find(|(name, _)| name == part) {
                Some((_, path)) => {
                    record.insert(target.to_string(), Value::String(path.clone()));
                }
                None if creating => {
                    record.entry(*target).or_insert(Value::Null);
                }
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(texts: &[(&str, &str)]) -> FormFields {
        FormFields {
            texts: texts.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            uploads: Vec::new(),
        }
    }

    #[test]
    fn create_requires_required_fields() {
        let mut record = Map::new();
        let err = EVENTS
            .apply(&mut record, &form(&[("title", "Touring")]), &[], true)
            .unwrap_err();
        assert_eq!(err.to_string(), "date is required");
    }

    #[test]
    fn update_keeps_untouched_fields() {
        let mut record = Map::new();
        record.insert("title".into(), Value::from("Old"));
        record.insert("location".into(), Value::from("Bogor"));
        EVENTS
            .apply(&mut record, &form(&[("title", "New")]), &[], false)
            .unwrap();
        assert_eq!(record["title"], "New");
        assert_eq!(record["location"], "Bogor");
    }

    #[test]
    fn create_fills_absent_optional_fields() {
        let mut record = Map::new();
        EVENTS
            .apply(&mut record, &form(&[("title", "Touring"), ("date", "2024-05-01")]), &[], true)
            .unwrap();
        assert_eq!(record["description"], "");
        assert_eq!(record["image"], Value::Null);
    }

    #[test]
    fn typed_fields_are_parsed() {
        let mut record = Map::new();
        PRODUCTS
            .apply(
                &mut record,
                &form(&[("name", "Jersey"), ("price", "250000"), ("category", "jersey"), ("stock", "0")]),
                &[("image".to_string(), "/uploads/1-j.jpg".to_string())],
                true,
            )
            .unwrap();
        assert_eq!(record["price"], 250000.0);
        assert_eq!(record["stock"], 0);
        assert_eq!(record["image"], "/uploads/1-j.jpg");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut record = Map::new();
        let err = PRODUCTS
            .apply(
                &mut record,
                &form(&[("name", "Helm"), ("price", "1"), ("category", "helm")]),
                &[],
                true,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "category is invalid");
    }

    #[test]
    fn json_lists_must_be_arrays() {
        let mut record = Map::new();
        let err = MILESTONES
            .apply(
                &mut record,
                &form(&[("year", "2020"), ("title", "t"), ("achievements", "{}")]),
                &[],
                true,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "achievements is invalid");
    }
}

//! Multipart form bodies for file-bearing writes.
//!
//! A `MultipartForm` is an ordered list of named parts. Structured values
//! (lists of achievements, management members, ...) travel as JSON text
//! parts, which is what the server expects to `JSON.parse` on its side.
//! Encoding to `multipart/form-data` bytes is deferred to the transport.

use serde::Serialize;

use crate::error::ApiError;

/// A file to upload inside a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Appends a text part only when `value` is present.
    pub fn optional_text(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    /// Appends `value` serialized as a JSON text part.
    pub fn json_text<T: Serialize + ?Sized>(self, name: &str, value: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.text(name, encoded))
    }

    pub fn file(mut self, name: &str, attachment: Attachment) -> Self {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::File(attachment),
        });
        self
    }

    pub fn optional_file(self, name: &str, attachment: Option<&Attachment>) -> Self {
        match attachment {
            Some(attachment) => self.file(name, attachment.clone()),
            None => self,
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// First text value recorded under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(text) if part.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn files(&self, name: &str) -> Vec<&Attachment> {
        self.parts
            .iter()
            .filter_map(|part| match &part.value {
                PartValue::File(file) if part.name == name => Some(file),
                _ => None,
            })
            .collect()
    }

    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Encodes the form as a `multipart/form-data` body delimited by `boundary`.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &part.value {
                PartValue::Text(text) => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape_quotes(&part.name))
                            .as_bytes(),
                    );
                    out.extend_from_slice(text.as_bytes());
                }
                PartValue::File(file) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_quotes(&part.name),
                            escape_quotes(&file.filename),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(&file.bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "%22")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_parts_are_skipped_when_absent() {
        let form = MultipartForm::new()
            .text("title", "Touring")
            .optional_text("description", None)
            .optional_file("image", None);
        assert_eq!(form.parts().len(), 1);
        assert_eq!(form.text_value("title"), Some("Touring"));
    }

    #[test]
    fn json_text_serializes_lists() {
        let form = MultipartForm::new()
            .json_text("achievements", &["Juara 1", "Best Club"])
            .unwrap();
        assert_eq!(form.text_value("achievements"), Some(r#"["Juara 1","Best Club"]"#));
    }

    #[test]
    fn encode_writes_text_and_file_parts() {
        let form = MultipartForm::new()
            .text("title", "Ride")
            .file("image", Attachment::new("a.jpg", "image/jpeg", b"JPEG".to_vec()));
        let body = String::from_utf8(form.encode("XYZ")).unwrap();

        assert!(body.starts_with("--XYZ\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nRide\r\n"));
        assert!(body.contains("name=\"image\"; filename=\"a.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nJPEG\r\n"));
        assert!(body.ends_with("--XYZ--\r\n"));
    }

    #[test]
    fn content_type_carries_boundary() {
        assert_eq!(MultipartForm::content_type("abc"), "multipart/form-data; boundary=abc");
    }
}

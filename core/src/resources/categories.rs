use serde::{Deserialize, Serialize};

use super::{Draft, Resource, Timestamps};
use crate::error::ApiError;
use crate::http::RequestBody;

/// Shop category. The slug is derived from the name on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Resource for Category {
    type Id = i64;
    type Draft = CategoryDraft;
    type Filter = ();

    const PATH: &'static str = "/categories";
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for CategoryDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        serde_json::to_string(self)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

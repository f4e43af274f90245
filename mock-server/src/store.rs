//! In-memory tables backing the mock API.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::form::{self, FieldKind, Schema, Upload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Events,
    News,
    Products,
    Categories,
    Gallery,
    Milestones,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Events,
        Table::News,
        Table::Products,
        Table::Categories,
        Table::Gallery,
        Table::Milestones,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Table::Events => "/events",
            Table::News => "/news",
            Table::Products => "/products",
            Table::Categories => "/categories",
            Table::Gallery => "/gallery",
            Table::Milestones => "/milestones",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Table::Events => "Event",
            Table::News => "News",
            Table::Products => "Product",
            Table::Categories => "Category",
            Table::Gallery => "Gallery item",
            Table::Milestones => "Milestone",
        }
    }

    /// Multipart schema; categories are JSON-only.
    pub fn schema(self) -> Option<&'static Schema> {
        match self {
            Table::Events => Some(&form::EVENTS),
            Table::News => Some(&form::NEWS),
            Table::Products => Some(&form::PRODUCTS),
            Table::Categories => None,
            Table::Gallery => Some(&form::GALLERY),
            Table::Milestones => Some(&form::MILESTONES),
        }
    }
}

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    rows: Vec<Map<String, Value>>,
}

#[derive(Debug)]
pub struct Store {
    tables: HashMap<Table, Rows>,
    pub about: Map<String, Value>,
    pub home: Map<String, Value>,
    uploads: u64,
}

impl Default for Store {
    fn default() -> Self {
        let tables = Table::ALL.into_iter().map(|t| (t, Rows::default())).collect();
        let mut about = Map::new();
        about.insert("id".into(), json!(1));
        for f in form::ABOUT.fields {
            let initial = match f.kind {
                FieldKind::JsonList => json!([]),
                _ => json!(""),
            };
            about.insert(f.name.into(), initial);
        }
        about.insert("history_image_url".into(), Value::Null);

        let home = json!({
            "id": 1,
            "hero_title": "",
            "hero_tagline": "",
            "bg_video": null,
            "about_image": null,
            "cta_image": null,
        });

        Self {
            tables,
            about,
            home: home.as_object().cloned().unwrap_or_default(),
            uploads: 0,
        }
    }
}

pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Store {
    /// Newest first.
    pub fn list(&self, table: Table) -> Vec<Value> {
        self.tables
            .get(&table)
            .map(|t| t.rows.iter().rev().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, table: Table, id: i64) -> Option<&Map<String, Value>> {
        self.tables
            .get(&table)?
            .rows
            .iter()
            .find(|row| row.get("id").and_then(Value::as_i64) == Some(id))
    }

    pub fn get_mut(&mut self, table: Table, id: i64) -> Option<&mut Map<String, Value>> {
        self.tables
            .get_mut(&table)?
            .rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_i64) == Some(id))
    }

    /// Assigns an id and timestamps, stores the row and returns a copy.
    pub fn insert(&mut self, table: Table, mut row: Map<String, Value>) -> Map<String, Value> {
        let rows = self.tables.entry(table).or_default();
        rows.next_id += 1;
        let stamp = now();
        row.insert("id".into(), json!(rows.next_id));
        row.insert("createdAt".into(), json!(stamp));
        row.insert("updatedAt".into(), json!(stamp));
        rows.rows.push(row.clone());
        row
    }

    pub fn remove(&mut self, table: Table, id: i64) -> bool {
        let Some(rows) = self.tables.get_mut(&table) else {
            return false;
        };
        let before = rows.rows.len();
        rows.rows.retain(|row| row.get("id").and_then(Value::as_i64) != Some(id));
        rows.rows.len() != before
    }

    /// Records an upload and returns the relative path it is served from.
    pub fn save_upload(&mut self, upload: &Upload) -> String {
        self.uploads += 1;
        let name: String = upload
            .filename
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        tracing::debug!(field = %upload.field, size = upload.size, "stored upload");
        format!("/uploads/{}-{name}", self.uploads)
    }
}

/// URL-safe slug derived from a category name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

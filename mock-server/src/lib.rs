//! In-memory stand-in for the club API.
//!
//! Serves every collection under `/api` with the same envelopes the real
//! backend uses: reads answer `{ success, data }`, writes answer
//! `{ success, message, data }`, failures answer `{ success: false, message }`.
//! Categories take JSON bodies; everything else takes multipart forms.

pub mod error;
pub mod form;
pub mod store;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

use crate::error::AppError;
use crate::form::{read_form, FormFields, Schema};
use crate::store::{now, slugify, Store, Table};

pub const API_PREFIX: &str = "/api";

pub type Db = Arc<RwLock<Store>>;

type ApiResult = Result<(StatusCode, Json<Value>), AppError>;

#[derive(Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

pub fn app() -> Router {
    app_with_store(Store::default())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let mut router = Router::new()
        .route(&format!("{API_PREFIX}/about"), get(get_about).put(update_about))
        .route(&format!("{API_PREFIX}/home"), get(get_home).put(update_home));
    for table in Table::ALL {
        router = router.merge(collection_routes(table));
    }
    router.with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn collection_routes(table: Table) -> Router<Db> {
    let collection = format!("{API_PREFIX}{}", table.path());
    let member = format!("{collection}/{{id}}");

    let list = move |State(db): State<Db>, Query(query): Query<HashMap<String, String>>| list_rows(db, table, query);
    let show = move |State(db): State<Db>, Path(id): Path<i64>| get_row(db, table, id);
    let remove = move |State(db): State<Db>, Path(id): Path<i64>| delete_row(db, table, id);

    if table == Table::Categories {
        let create = |State(db): State<Db>, Json(input): Json<CategoryInput>| create_category(db, input);
        let update =
            |State(db): State<Db>, Path(id): Path<i64>, Json(input): Json<CategoryInput>| update_category(db, id, input);
        // Categories are list-only; there is no GET for a single one.
        Router::new()
            .route(&collection, get(list).post(create))
            .route(&member, put(update).delete(remove))
    } else {
        let create = move |State(db): State<Db>, multipart: Multipart| create_row(db, table, multipart);
        let update =
            move |State(db): State<Db>, Path(id): Path<i64>, multipart: Multipart| update_row(db, table, id, multipart);
        Router::new()
            .route(&collection, get(list).post(create))
            .route(&member, get(show).put(update).delete(remove))
    }
}

fn envelope(status: StatusCode, message: Option<String>, data: Value) -> (StatusCode, Json<Value>) {
    let body = match message {
        Some(message) => json!({ "success": true, "message": message, "data": data }),
        None => json!({ "success": true, "data": data }),
    };
    (status, Json(body))
}

fn not_found(table: Table) -> AppError {
    AppError::NotFound(format!("{} not found", table.label()))
}

async fn list_rows(db: Db, table: Table, query: HashMap<String, String>) -> ApiResult {
    let store = db.read().await;
    let mut rows = store.list(table);
    if let Some(category) = query.get("category").filter(|c| !c.is_empty() && table == Table::Products) {
        rows.retain(|row| row.get("category").and_then(Value::as_str) == Some(category.as_str()));
    }
    Ok(envelope(StatusCode::OK, None, Value::Array(rows)))
}

async fn get_row(db: Db, table: Table, id: i64) -> ApiResult {
    let store = db.read().await;
    let row = store.get(table, id).cloned().ok_or_else(|| not_found(table))?;
    Ok(envelope(StatusCode::OK, None, Value::Object(row)))
}

async fn delete_row(db: Db, table: Table, id: i64) -> ApiResult {
    let mut store = db.write().await;
    if table == Table::Categories {
        if let Some(slug) = store.get(table, id).and_then(|c| c.get("slug")).and_then(Value::as_str) {
            let slug = slug.to_string();
            let in_use = store
                .list(Table::Products)
                .iter()
                .any(|p| p.get("category").and_then(Value::as_str) == Some(slug.as_str()));
            if in_use {
                return Err(AppError::Conflict("Category is in use".to_string()));
            }
        }
    }
    if !store.remove(table, id) {
        return Err(not_found(table));
    }
    Ok(envelope(StatusCode::OK, Some(format!("{} deleted", table.label())), Value::Null))
}

fn store_uploads(store: &mut Store, form: &FormFields) -> Vec<(String, String)> {
    form.uploads
        .iter()
        .map(|upload| (upload.field.clone(), store.save_upload(upload)))
        .collect()
}

fn schema_of(table: Table) -> Result<&'static Schema, AppError> {
    table
        .schema()
        .ok_or_else(|| AppError::BadRequest(format!("{} expects a JSON body", table.label())))
}

async fn create_row(db: Db, table: Table, multipart: Multipart) -> ApiResult {
    let schema = schema_of(table)?;
    let form = read_form(multipart).await?;
    let mut store = db.write().await;
    let stored = store_uploads(&mut store, &form);

    let mut row = Map::new();
    schema.apply(&mut row, &form, &stored, true)?;
    let row = store.insert(table, row);
    tracing::info!(table = table.path(), id = ?row.get("id"), "created");
    Ok(envelope(
        StatusCode::CREATED,
        Some(format!("{} created", table.label())),
        Value::Object(row),
    ))
}

async fn update_row(db: Db, table: Table, id: i64, multipart: Multipart) -> ApiResult {
    let schema = schema_of(table)?;
    let form = read_form(multipart).await?;
    let mut store = db.write().await;
    if store.get(table, id).is_none() {
        return Err(not_found(table));
    }
    let stored = store_uploads(&mut store, &form);

    let row = store.get_mut(table, id).ok_or_else(|| not_found(table))?;
    let mut updated = row.clone();
    schema.apply(&mut updated, &form, &stored, false)?;
    updated.insert("updatedAt".into(), json!(now()));
    *row = updated.clone();
    Ok(envelope(
        StatusCode::OK,
        Some(format!("{} updated", table.label())),
        Value::Object(updated),
    ))
}

fn category_row(name: &str) -> Result<Map<String, Value>, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    let mut row = Map::new();
    row.insert("name".into(), json!(name));
    row.insert("slug".into(), json!(slugify(name)));
    Ok(row)
}

async fn create_category(db: Db, input: CategoryInput) -> ApiResult {
    let row = category_row(&input.name)?;
    let mut store = db.write().await;
    let row = store.insert(Table::Categories, row);
    Ok(envelope(StatusCode::CREATED, Some("Category created".to_string()), Value::Object(row)))
}

async fn update_category(db: Db, id: i64, input: CategoryInput) -> ApiResult {
    let fields = category_row(&input.name)?;
    let mut store = db.write().await;
    let row = store
        .get_mut(Table::Categories, id)
        .ok_or_else(|| not_found(Table::Categories))?;
    row.extend(fields);
    row.insert("updatedAt".into(), json!(now()));
    Ok(envelope(
        StatusCode::OK,
        Some("Category updated".to_string()),
        Value::Object(row.clone()),
    ))
}

async fn get_about(State(db): State<Db>) -> ApiResult {
    let store = db.read().await;
    Ok(envelope(StatusCode::OK, None, Value::Object(store.about.clone())))
}

async fn update_about(State(db): State<Db>, multipart: Multipart) -> ApiResult {
    let form = read_form(multipart).await?;
    let mut store = db.write().await;
    let stored = store_uploads(&mut store, &form);

    let mut about = store.about.clone();
    form::ABOUT.apply(&mut about, &form, &stored, false)?;

    // Management photos pair up with indexes by position.
    let photos = stored.iter().filter(|(name, _)| name == "management_images").map(|(_, path)| path);
    let indexes = form.texts("management_image_indexes").filter_map(|i| i.parse::<usize>().ok());
    if let Some(Value::Array(members)) = about.get_mut("management") {
        for (path, index) in photos.zip(indexes) {
            if let Some(Value::Object(member)) = members.get_mut(index) {
                member.insert("photo_url".into(), json!(path));
            }
        }
    }

    about.insert("updatedAt".into(), json!(now()));
    store.about = about.clone();
    Ok(envelope(StatusCode::OK, Some("About content updated".to_string()), Value::Object(about)))
}

async fn get_home(State(db): State<Db>) -> ApiResult {
    let store = db.read().await;
    Ok(envelope(StatusCode::OK, None, Value::Object(store.home.clone())))
}

async fn update_home(State(db): State<Db>, multipart: Multipart) -> ApiResult {
    let form = read_form(multipart).await?;
    let mut store = db.write().await;
    let stored = store_uploads(&mut store, &form);

    let mut home = store.home.clone();
    form::HOME.apply(&mut home, &form, &stored, false)?;
    home.insert("updatedAt".into(), json!(now()));
    store.home = home.clone();
    Ok(envelope(StatusCode::OK, Some("Home content updated".to_string()), Value::Object(home)))
}

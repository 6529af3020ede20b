//! Marker CRUD handlers
//!
//! One handler per verb, each a single stateless store operation. The
//! wire format uses camelCase field names; `{id}` path segments are parsed
//! by hand so a malformed id yields a 400 JSON error rather than a bare
//! rejection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use mapmark_common::db::models::{ListOptions, Marker, MarkerRecord, SortKey, SortOrder};
use mapmark_common::db;

use crate::api::ApiError;
use crate::AppState;

/// Request body for create and update.
///
/// All fields optional at the serde level; required-field validation
/// happens in [`MarkerPayload::into_record`] so the response is a JSON
/// error naming the missing field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPayload {
    pub name: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub importance: Option<i64>,
    pub remark: Option<String>,
}

impl MarkerPayload {
    /// Validate required fields: `name` and `address` present and
    /// non-empty, `longitude` and `latitude` present.
    fn into_record(self) -> Result<MarkerRecord, ApiError> {
        let name = self
            .name
            .filter(|s| !s.trim().is_empty())
            .ok_or(ApiError::MissingField("name"))?;
        let address = self
            .address
            .filter(|s| !s.trim().is_empty())
            .ok_or(ApiError::MissingField("address"))?;
        let longitude = self.longitude.ok_or(ApiError::MissingField("longitude"))?;
        let latitude = self.latitude.ok_or(ApiError::MissingField("latitude"))?;

        Ok(MarkerRecord {
            name,
            address,
            longitude,
            latitude,
            importance: self.importance,
            remark: self.remark,
        })
    }
}

/// Query parameters for listing and export
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over name and remark
    pub search: Option<String>,
    /// `importance` | `name` | `createdAt`
    pub sort: Option<String>,
    /// `asc` (default) | `desc`
    pub order: Option<String>,
}

impl ListQuery {
    pub(crate) fn into_options(self) -> Result<ListOptions, ApiError> {
        let sort = match self.sort.as_deref().filter(|s| !s.is_empty()) {
            Some(key) => Some(
                SortKey::parse(key)
                    .ok_or_else(|| ApiError::BadRequest(format!("Invalid sort key: {}", key)))?,
            ),
            None => None,
        };

        Ok(ListOptions {
            search: self.search.filter(|s| !s.is_empty()),
            sort,
            order: self
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        })
    }
}

/// Parse a path id; non-numeric ids are a client error
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// GET /api/markers
pub async fn list_markers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Marker>>, ApiError> {
    let options = query.into_options()?;
    let markers = db::list_markers(&state.db, &options).await?;
    Ok(Json(markers))
}

/// POST /api/markers
pub async fn create_marker(
    State(state): State<AppState>,
    Json(payload): Json<MarkerPayload>,
) -> Result<(StatusCode, Json<Marker>), ApiError> {
    let record = payload.into_record()?;
    let marker = db::insert_marker(&state.db, &record).await?;
    Ok((StatusCode::CREATED, Json(marker)))
}

/// GET /api/markers/:id
pub async fn get_marker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Marker>, ApiError> {
    let id = parse_id(&id)?;
    let marker = db::get_marker(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(marker))
}

/// PUT /api/markers/:id
///
/// Full-field replace with fall-back semantics for `importance`/`remark`;
/// the response body is the canonical stored row.
pub async fn update_marker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MarkerPayload>,
) -> Result<Json<Marker>, ApiError> {
    let id = parse_id(&id)?;
    let record = payload.into_record()?;
    let marker = db::update_marker(&state.db, id, &record)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(marker))
}

/// DELETE /api/markers/:id
pub async fn delete_marker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    if !db::delete_marker(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "success": true })))
}

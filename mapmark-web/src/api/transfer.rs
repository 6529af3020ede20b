//! Spreadsheet transfer endpoints
//!
//! Export streams the current filtered-and-sorted marker view as a CSV
//! attachment with fixed column headers. Import accepts a CSV body whose
//! header row is matched against a small bilingual alias set (the
//! spreadsheets this tool originally exchanged carried Chinese headers);
//! valid rows are persisted through the normal insert path, malformed
//! rows are counted and skipped.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use mapmark_common::db;
use mapmark_common::db::models::MarkerRecord;

use crate::api::markers::ListQuery;
use crate::api::ApiError;
use crate::AppState;

/// Fixed export column order
const EXPORT_HEADERS: [&str; 7] = [
    "name",
    "address",
    "longitude",
    "latitude",
    "importance",
    "remark",
    "created_at",
];

/// GET /api/markers/export
///
/// Same query parameters as the list endpoint, so the download matches
/// whatever view the list panel currently shows.
pub async fn export_markers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let options = query.into_options()?;
    let markers = db::list_markers(&state.db, &options).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    for marker in &markers {
        let longitude = marker.longitude.to_string();
        let latitude = marker.latitude.to_string();
        let importance = marker.importance.to_string();
        writer
            .write_record([
                marker.name.as_str(),
                marker.address.as_str(),
                longitude.as_str(),
                latitude.as_str(),
                importance.as_str(),
                marker.remark.as_deref().unwrap_or(""),
                marker.created_at.as_str(),
            ])
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let filename = format!("markers_{}.csv", Utc::now().format("%Y-%m-%d"));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Import summary returned to the client
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Column positions resolved from the CSV header row
#[derive(Debug, Default)]
struct ColumnMap {
    name: Option<usize>,
    address: Option<usize>,
    longitude: Option<usize>,
    latitude: Option<usize>,
    importance: Option<usize>,
    remark: Option<usize>,
}

impl ColumnMap {
    /// Match header cells against the bilingual alias set
    fn resolve(headers: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (index, raw) in headers.iter().enumerate() {
            // Strip a UTF-8 BOM left behind by spreadsheet tools
            let cell = raw.trim_start_matches('\u{feff}').trim();
            match cell {
                "name" | "名称" => map.name = Some(index),
                "address" | "地址" => map.address = Some(index),
                "longitude" | "经度" => map.longitude = Some(index),
                "latitude" | "纬度" => map.latitude = Some(index),
                "importance" | "关注级别" => map.importance = Some(index),
                "remark" | "备注" => map.remark = Some(index),
                _ => {}
            }
        }
        map
    }

    fn recognized_any(&self) -> bool {
        self.name.is_some()
            || self.address.is_some()
            || self.longitude.is_some()
            || self.latitude.is_some()
            || self.importance.is_some()
            || self.remark.is_some()
    }

    /// Build a marker record from one data row, or None if required
    /// fields are missing or malformed.
    fn record_from_row(&self, row: &csv::StringRecord) -> Option<MarkerRecord> {
        let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).map(str::trim);

        let name = cell(self.name).filter(|s| !s.is_empty())?;
        let address = cell(self.address).filter(|s| !s.is_empty())?;
        let longitude = cell(self.longitude)?.parse::<f64>().ok()?;
        let latitude = cell(self.latitude)?.parse::<f64>().ok()?;

        let importance = cell(self.importance).and_then(|s| s.parse::<i64>().ok());
        let remark = cell(self.remark)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(MarkerRecord {
            name: name.to_string(),
            address: address.to_string(),
            longitude,
            latitude,
            importance,
            remark,
        })
    }
}

/// POST /api/markers/import
///
/// Body is the raw CSV text. Returns how many rows were persisted and how
/// many were skipped.
pub async fn import_markers(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportSummary>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ApiError::BadRequest(format!("Unreadable CSV header: {}", e)))?
        .clone();

    let columns = ColumnMap::resolve(&headers);
    if !columns.recognized_any() {
        return Err(ApiError::BadRequest(
            "No recognized columns in CSV header".to_string(),
        ));
    }

    let mut imported = 0;
    let mut skipped = 0;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        match columns.record_from_row(&row) {
            Some(record) => {
                db::insert_marker(&state.db, &record).await?;
                imported += 1;
            }
            None => skipped += 1,
        }
    }

    tracing::info!("CSV import: {} rows persisted, {} skipped", imported, skipped);

    Ok(Json(ImportSummary { imported, skipped }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_aliases_resolve_both_languages() {
        let english = csv::StringRecord::from(vec![
            "name",
            "address",
            "longitude",
            "latitude",
            "importance",
            "remark",
        ]);
        let map = ColumnMap::resolve(&english);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.remark, Some(5));

        let chinese = csv::StringRecord::from(vec!["名称", "地址", "经度", "纬度"]);
        let map = ColumnMap::resolve(&chinese);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.latitude, Some(3));
        assert!(map.importance.is_none());
    }

    #[test]
    fn bom_on_first_header_is_tolerated() {
        let headers = csv::StringRecord::from(vec!["\u{feff}name", "address"]);
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.name, Some(0));
    }

    #[test]
    fn row_missing_coordinates_is_rejected() {
        let headers =
            csv::StringRecord::from(vec!["name", "address", "longitude", "latitude"]);
        let map = ColumnMap::resolve(&headers);

        let row = csv::StringRecord::from(vec!["A", "123 St", "not-a-number", "2.0"]);
        assert!(map.record_from_row(&row).is_none());

        let row = csv::StringRecord::from(vec!["A", "123 St", "1.0", "2.0"]);
        let record = map.record_from_row(&row).expect("Row should parse");
        assert_eq!(record.longitude, 1.0);
        assert!(record.importance.is_none());
    }

    #[test]
    fn unrecognized_header_yields_nothing() {
        let headers = csv::StringRecord::from(vec!["foo", "bar"]);
        let map = ColumnMap::resolve(&headers);
        assert!(!map.recognized_any());
    }
}

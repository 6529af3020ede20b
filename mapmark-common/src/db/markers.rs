//! Marker queries
//!
//! Every operation is a single transaction-free statement against the
//! `markers` table. Inserts use `RETURNING` so the generated id comes back
//! from the same statement (no "read latest row" race under concurrent
//! inserts); updates use `RETURNING` so callers always see the canonical
//! stored state.

use crate::db::models::{ListOptions, Marker, MarkerRecord};
use crate::Result;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;

/// Current timestamp in the stored format (RFC 3339 UTC).
///
/// Microsecond precision so two touches of the same row in quick
/// succession still produce strictly increasing `updated_at` values.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// List markers, optionally filtered and sorted.
///
/// The search term matches case-insensitively against `name` and `remark`.
/// Sort ties are broken by store order (id ascending); no sort key means
/// plain store order.
pub async fn list_markers(pool: &SqlitePool, options: &ListOptions) -> Result<Vec<Marker>> {
    let mut sql = String::from("SELECT * FROM markers");

    let needle = options
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase());

    if needle.is_some() {
        sql.push_str(
            " WHERE instr(lower(name), ?1) > 0 \
             OR instr(lower(coalesce(remark, '')), ?1) > 0",
        );
    }

    match options.sort {
        Some(key) => {
            sql.push_str(&format!(
                " ORDER BY {} {}, id ASC",
                key.column(),
                options.order.keyword()
            ));
        }
        None => sql.push_str(" ORDER BY id ASC"),
    }

    let mut query = sqlx::query_as::<_, Marker>(&sql);
    if let Some(needle) = &needle {
        query = query.bind(needle.as_str());
    }

    Ok(query.fetch_all(pool).await?)
}

/// Fetch one marker by id
pub async fn get_marker(pool: &SqlitePool, id: i64) -> Result<Option<Marker>> {
    let marker = sqlx::query_as::<_, Marker>("SELECT * FROM markers WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(marker)
}

/// Insert a new marker, returning the stored row with its generated id.
///
/// `importance` defaults to 0 and `remark` to NULL when not supplied.
pub async fn insert_marker(pool: &SqlitePool, record: &MarkerRecord) -> Result<Marker> {
    let now = now_timestamp();

    let marker = sqlx::query_as::<_, Marker>(
        r#"
        INSERT INTO markers
            (name, address, longitude, latitude, importance, remark, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        RETURNING *
        "#,
    )
    .bind(&record.name)
    .bind(&record.address)
    .bind(record.longitude)
    .bind(record.latitude)
    .bind(record.importance.unwrap_or(0))
    .bind(&record.remark)
    .bind(&now)
    .fetch_one(pool)
    .await?;

    Ok(marker)
}

/// Replace a marker's fields, returning the stored row, or None if the id
/// is unknown.
///
/// `importance` and `remark` fall back to the previously stored values when
/// the record omits them; `updated_at` is always stamped fresh.
pub async fn update_marker(
    pool: &SqlitePool,
    id: i64,
    record: &MarkerRecord,
) -> Result<Option<Marker>> {
    let Some(existing) = get_marker(pool, id).await? else {
        return Ok(None);
    };

    let importance = record.importance.unwrap_or(existing.importance);
    let remark = record.remark.clone().or(existing.remark);

    let marker = sqlx::query_as::<_, Marker>(
        r#"
        UPDATE markers
        SET name = ?1, address = ?2, longitude = ?3, latitude = ?4,
            importance = ?5, remark = ?6, updated_at = ?7
        WHERE id = ?8
        RETURNING *
        "#,
    )
    .bind(&record.name)
    .bind(&record.address)
    .bind(record.longitude)
    .bind(record.latitude)
    .bind(importance)
    .bind(&remark)
    .bind(now_timestamp())
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(marker))
}

/// Delete a marker by id; returns false if the id is unknown
pub async fn delete_marker(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM markers WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

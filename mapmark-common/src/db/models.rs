//! Database models

use serde::{Deserialize, Serialize};

/// A stored marker row.
///
/// Serialized with camelCase field names to match the REST wire format;
/// column names in the `markers` table are snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Store-assigned id, immutable after insert
    pub id: i64,
    pub name: String,
    pub address: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Attention level; the UI offers 0-5 but any integer is stored
    pub importance: i64,
    pub remark: Option<String>,
    /// RFC 3339 UTC, set once at insert
    pub created_at: String,
    /// RFC 3339 UTC, advanced on every update
    pub updated_at: String,
}

/// Validated fields for an insert or a full-field update.
///
/// `importance` and `remark` are optional: on insert they default to 0 and
/// NULL, on update they fall back to the stored values.
#[derive(Debug, Clone)]
pub struct MarkerRecord {
    pub name: String,
    pub address: String,
    pub longitude: f64,
    pub latitude: f64,
    pub importance: Option<i64>,
    pub remark: Option<String>,
}

/// Sort key for marker listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Importance,
    Name,
    CreatedAt,
}

impl SortKey {
    /// Parse a wire-format sort key (`importance`, `name`, `createdAt`)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "importance" => Some(Self::Importance),
            "name" => Some(Self::Name),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Column expression used in ORDER BY
    pub(crate) fn column(self) -> &'static str {
        match self {
            // NOCASE keeps the ordering stable regardless of letter case
            Self::Importance => "importance",
            Self::Name => "name COLLATE NOCASE",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sort direction for marker listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parse a wire-format order (`asc`/`desc`, case-insensitive);
    /// anything else means ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Filter and ordering options for marker listings
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Case-insensitive substring matched against `name` and `remark`
    pub search: Option<String>,
    /// None means store order
    pub sort: Option<SortKey>,
    pub order: SortOrder,
}

//! Common error types for MapMark

use thiserror::Error;

/// Common result type for MapMark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the MapMark crates.
///
/// The HTTP-facing 400/404 taxonomy lives in the web crate's `ApiError`;
/// this enum only carries what the store layer itself can fail with.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

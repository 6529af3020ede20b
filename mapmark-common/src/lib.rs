//! # MapMark Common Library
//!
//! Shared code for the MapMark service:
//! - Database initialization, marker model and queries
//! - Configuration resolution (root folder, listen port)
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};

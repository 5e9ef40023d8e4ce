//! Database schema and queries

pub mod comments;
pub mod favorites;
pub mod init;
pub mod likes;
pub mod posts;
pub mod users;

pub use init::init_database;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

/// Parse a TEXT guid column
pub(crate) fn parse_guid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("Invalid guid {value:?}: {e}")))
}

/// Parse a TEXT RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid timestamp {value:?}: {e}")))
}

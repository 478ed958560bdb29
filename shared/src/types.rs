//! Common types used across the API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::parse_date;

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: i64 = 10;

/// Default offset for list endpoints
pub const DEFAULT_OFFSET: i64 = 0;

/// Raw list query string parameters (`?limit=&offset=&search=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub search: Option<String>,
}

/// Parsed list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub offset: i64,
    pub limit: i64,
    pub search: Option<String>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl ListRequest {
    /// Parse raw query parameters.
    ///
    /// Missing or empty values fall back to the defaults, and so do
    /// non-positive limits and negative offsets. Non-numeric values are
    /// rejected.
    pub fn parse(params: &ListParams) -> Result<Self, &'static str> {
        let limit = integer_or_default(params.limit.as_deref(), DEFAULT_LIMIT)
            .map_err(|_| "invalid query limit")?;
        let offset = integer_or_default(params.offset.as_deref(), DEFAULT_OFFSET)
            .map_err(|_| "invalid query offset")?;

        Ok(Self {
            limit: if limit > 0 { limit } else { DEFAULT_LIMIT },
            offset: offset.max(0),
            search: params
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }

    /// `%search%` pattern for ILIKE filters, `None` when not searching
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }
}

fn integer_or_default(value: Option<&str>, default: i64) -> Result<i64, std::num::ParseIntError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse(),
    }
}

/// Date window for the client registration report.
///
/// Both bounds are exclusive: a client registered on `from` or on `to` is
/// not part of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RegistrationWindow {
    pub fn parse(from: &str, to: &str) -> Result<Self, &'static str> {
        let from = parse_date(from).map_err(|_| "invalid query from, expected YYYY-MM-DD")?;
        let to = parse_date(to).map_err(|_| "invalid query to, expected YYYY-MM-DD")?;
        Ok(Self { from, to })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from < day && day < self.to
    }
}

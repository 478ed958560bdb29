//! Human-readable document numbering
//!
//! Sales and goods receipts carry an increment id made of a two character
//! kind prefix and a zero-padded counter, e.g. `S-0000042` or `C-0000007`.
//! The counter suffix is derived from the latest id already stored for the
//! same document kind.

use thiserror::Error;

/// Suffix issued when no document of a kind exists yet
pub const SEED_SUFFIX: &str = "0000001";

/// Minimum number of digits in a counter suffix
pub const SUFFIX_WIDTH: usize = 7;

/// Length of the kind prefix (`S-`, `C-`)
pub const PREFIX_LEN: usize = 2;

/// Document kinds that are numbered with an increment id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Sale,
    Coming,
}

impl DocumentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Sale => "S-",
            DocumentKind::Coming => "C-",
        }
    }

    /// Table holding the counter source for this kind
    pub fn table(&self) -> &'static str {
        match self {
            DocumentKind::Sale => "sale",
            DocumentKind::Coming => "coming",
        }
    }

    pub fn column(&self) -> &'static str {
        "increment_id"
    }

    /// Prepend the kind prefix to a counter suffix
    pub fn format(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix(), suffix)
    }
}

/// Errors raised while deriving the next increment id
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncrementError {
    #[error("increment id {0:?} is too short to carry a kind prefix")]
    MissingPrefix(String),

    #[error("increment id {0:?} has a non-numeric counter")]
    InvalidCounter(String),

    #[error("increment counter overflow after {0:?}")]
    Overflow(String),
}

/// Compute the next counter suffix from the latest stored increment id.
///
/// `None` (or an empty string) means no document exists yet and yields
/// [`SEED_SUFFIX`]. Otherwise the two character prefix is stripped, the
/// remainder is parsed as a decimal counter and the incremented value is
/// rendered zero-padded to at least [`SUFFIX_WIDTH`] digits. Counters that
/// outgrow the width keep all of their digits.
pub fn next_suffix(last: Option<&str>) -> Result<String, IncrementError> {
    let last = match last {
        None => return Ok(SEED_SUFFIX.to_string()),
        Some(value) if value.is_empty() => return Ok(SEED_SUFFIX.to_string()),
        Some(value) => value,
    };

    let counter = last
        .get(PREFIX_LEN..)
        .ok_or_else(|| IncrementError::MissingPrefix(last.to_string()))?;

    if counter.is_empty() || !counter.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IncrementError::InvalidCounter(last.to_string()));
    }

    let current: u64 = counter
        .parse()
        .map_err(|_| IncrementError::Overflow(last.to_string()))?;
    let next = current
        .checked_add(1)
        .ok_or_else(|| IncrementError::Overflow(last.to_string()))?;

    Ok(pad_suffix(next))
}

/// Render a counter zero-padded to [`SUFFIX_WIDTH`] digits
pub fn pad_suffix(counter: u64) -> String {
    format!("{:0width$}", counter, width = SUFFIX_WIDTH)
}

/// Compute the full increment id following `last` for the given kind
pub fn next_increment_id(kind: DocumentKind, last: Option<&str>) -> Result<String, IncrementError> {
    next_suffix(last).map(|suffix| kind.format(&suffix))
}

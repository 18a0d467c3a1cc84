//! Station types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station ID: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A TDX station ID, as used in request paths (e.g. `1000` for Taipei).
///
/// IDs are spliced into URL paths, so only ASCII letters and digits are
/// accepted.
///
/// # Examples
///
/// ```
/// use tra_timetable::domain::StationId;
///
/// let taipei = StationId::parse("1000").unwrap();
/// assert_eq!(taipei.as_str(), "1000");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("10/00").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Longest ID we accept. TRA IDs are four digits today.
    const MAX_LEN: usize = 16;

    /// Parse a station ID from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.len() > Self::MAX_LEN {
            return Err(InvalidStationId {
                reason: "too long",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationId {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station as shown in pickers: provider ID plus zh-TW display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Stations grouped by city name.
///
/// Cities are ordered by name; stations keep the provider's order within
/// a city.
pub type StationsByCity = BTreeMap<String, Vec<Station>>;

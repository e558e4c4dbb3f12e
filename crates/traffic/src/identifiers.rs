//! Station identifiers.
//!
//! A station's `short_name` is shared between the roster, every trip that
//! references it and the rollup maps, so it is held in an `Arc<str>`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Station `short_name`, compared by value
///
/// Trip exports leave the station columns blank for dockless rides; those
/// parse to an empty id that matches no roster station.
#[derive(Clone, Debug)]
pub struct StationIdentifier(Arc<str>);

impl StationIdentifier {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for StationIdentifier {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for StationIdentifier {}

impl Hash for StationIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for StationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationIdentifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StationIdentifier {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

/// Feeds pad ids inconsistently, so surrounding whitespace is dropped
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StationIdentifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s.trim()))
    }
}

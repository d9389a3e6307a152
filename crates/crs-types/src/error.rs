use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a failure, independent of which component raised it.
///
/// Every crate-level error type maps onto exactly one of these through its
/// `kind()` method. Boundary callers branch on the kind, never on the concrete
/// error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was empty.
    InvalidInput,
    /// The payload was empty or failed its checksum check.
    MalformedData,
    /// Zero matches. Reported as an empty result by the stores themselves.
    NotFound,
    /// A multiplicity invariant was violated.
    IllegalState,
    /// No connection to a backing store.
    Unavailable,
    /// The named query was never registered.
    UnknownQuery,
}

impl ErrorKind {
    /// Stable snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::MalformedData => "malformed_data",
            Self::NotFound => "not_found",
            Self::IllegalState => "illegal_state",
            Self::Unavailable => "unavailable",
            Self::UnknownQuery => "unknown_query",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

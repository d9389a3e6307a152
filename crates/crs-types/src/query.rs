//! Named-query routing and index membership types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A static route from a query key to a storage location in the index store.
///
/// Bindings are registered once at startup and stay fixed for the lifetime of
/// the process.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedQuery {
    /// The key callers name when indexing a record.
    pub key: String,
    /// Backend namespace (a database, a keyspace, a bucket).
    pub namespace: String,
    /// Location within the namespace (a collection, a table, a prefix).
    pub location: String,
}

impl NamedQuery {
    /// Create a new binding.
    pub fn new(
        key: impl Into<String>,
        namespace: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            namespace: namespace.into(),
            location: location.into(),
        }
    }

    /// Returns `true` if any of the three fields is empty.
    pub fn has_empty_field(&self) -> bool {
        self.key.is_empty() || self.namespace.is_empty() || self.location.is_empty()
    }

    /// The physical location this query routes to, as `namespace/location`.
    pub fn route(&self) -> String {
        format!("{}/{}", self.namespace, self.location)
    }
}

impl fmt::Display for NamedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.key, self.route())
    }
}

/// Membership of a record identifier in a named query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub query_key: String,
    pub id: String,
}

impl IndexEntry {
    pub fn new(query_key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            query_key: query_key.into(),
            id: id.into(),
        }
    }
}

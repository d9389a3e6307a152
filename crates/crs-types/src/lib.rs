//! Foundation types for the CAS repository service (CRS).
//!
//! Every other CRS crate depends on `crs-types`. It carries the persisted
//! record layout, the named-query routing types, and the failure taxonomy that
//! callers branch on.
//!
//! # Key Types
//!
//! - [`Record`]: a stored binary record with its CRC-32 checksum
//! - [`NamedQuery`]: a static route from a query key to an index location
//! - [`IndexEntry`]: membership of a record identifier in a named query
//! - [`CacheProbe`]: a transient, TTL-bounded cache entry
//! - [`ErrorKind`]: the failure kinds that cross component boundaries

pub mod error;
pub mod probe;
pub mod query;
pub mod record;

pub use error::ErrorKind;
pub use probe::CacheProbe;
pub use query::{IndexEntry, NamedQuery};
pub use record::{crc32, Record};

//! Record storage for the CAS repository service.
//!
//! The object store persists opaque binary records under system-assigned
//! identifiers. Payloads are checked against their declared CRC-32 when they
//! are written; reads return what was stored without re-validating it.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. One live record per identifier. Two or more is an illegal state and is
//!    reported as such by `get` and `delete`, never papered over.
//! 2. Integrity is checked at write time only.
//! 3. `store` does not look for an existing record with the new identifier;
//!    duplicates surface on the next read or delete.
//! 4. Deletes match on identifier equality only.
//! 5. Backend connection failures are reported as `Unavailable`.

pub mod error;
pub mod memory;
pub mod traits;
pub mod validate;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
pub use validate::{require_id, validate_payload};

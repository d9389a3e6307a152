//! Named-query index for the CAS repository service.
//!
//! Tracks which record identifiers belong to which named query. Each named
//! query is a static route to a storage location, registered once at startup.
//!
//! # Key Types
//!
//! - [`IndexStore`] -- The membership capability, with a provided
//!   `remove_from_all`
//! - [`InMemoryIndexStore`] -- `BTreeMap`/`HashMap`-backed index for tests and
//!   embedding
//! - [`IndexError`] -- Validation, routing and multiplicity failures

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{IndexError, IndexResult};
pub use memory::InMemoryIndexStore;
pub use traits::IndexStore;

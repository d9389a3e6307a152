//! Identifier generation for the CAS repository service.
//!
//! Identifiers are practically unique, not provably unique: each one is the
//! concatenation of a millisecond timestamp, a random 128-bit token and a
//! seeded pseudorandom integer, checked against a cache of recently issued
//! identifiers before it is handed out. The stores downstream still detect
//! true duplicates on their own.
//!
//! # Key Types
//!
//! - [`Cache`] -- TTL-bounded key/value capability used for collision probes
//! - [`InMemoryCache`] -- `HashMap`-backed cache for tests and embedding
//! - [`IdGenerator`] -- identifier generation capability
//! - [`CacheBackedIdGenerator`] -- the probe-and-register generator
//! - [`GeneratorConfig`] -- delimiter, TTL and retry bound

pub mod cache;
pub mod error;
pub mod generator;
pub mod source;

pub use cache::{Cache, InMemoryCache};
pub use error::{CacheError, CacheResult, GeneratorError, GeneratorResult};
pub use generator::{CacheBackedIdGenerator, GeneratorConfig, IdGenerator};
pub use source::{Clock, RandomTokenSource, SystemClock, TokenSource};

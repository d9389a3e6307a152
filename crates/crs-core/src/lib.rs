//! Coordination between the object store and the index store.
//!
//! The [`Coordinator`] is the only place where invariants spanning both
//! stores are maintained. It does so by running each multi-store operation
//! as a short saga: steps run strictly in order, and a failed indexing step
//! is compensated by deleting the record that was just written. There is no
//! shared transaction and no locking; each store's own multiplicity checks
//! carry correctness.

pub mod coordinator;
pub mod error;
pub mod saga;

pub use coordinator::{Coordinator, Stored};
pub use error::{CoordinatorError, CoordinatorResult};
pub use saga::SagaPhase;

use std::fmt;

/// Phases of the store-and-index saga.
///
/// ```text
/// Validating -> Persisting -> Indexing -> Succeeded
///     |             |            |
///     v             v            v
///   Failed        Failed    Compensating -> Failed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SagaPhase {
    Validating,
    Persisting,
    Indexing,
    Compensating,
    Succeeded,
    Failed,
}

impl SagaPhase {
    /// Returns `true` for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether the saga may move from `self` to `next`.
    pub fn can_advance_to(&self, next: SagaPhase) -> bool {
        use SagaPhase::*;
        matches!(
            (self, next),
            (Validating, Persisting)
                | (Validating, Failed)
                | (Persisting, Indexing)
                | (Persisting, Failed)
                | (Indexing, Succeeded)
                | (Indexing, Compensating)
                | (Compensating, Failed)
        )
    }
}

impl fmt::Display for SagaPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Persisting => "persisting",
            Self::Indexing => "indexing",
            Self::Compensating => "compensating",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

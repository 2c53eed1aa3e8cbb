//! Per-target write outcomes.

/// Result of one write to one external target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus<E> {
    /// The write was applied.
    Ok,
    /// No write was attempted because there was no contact to write to.
    Skipped,
    /// The write was attempted and failed.
    Failed(E),
}

impl<E> WriteStatus<E> {
    /// Builds a status from a write result.
    pub fn from_result(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(err) => Self::Failed(err),
        }
    }

    /// Returns whether the write was applied.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns whether the write was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Ok | Self::Skipped => None,
        }
    }
}

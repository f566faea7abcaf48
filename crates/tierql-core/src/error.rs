use crate::{query::PlanError, store::StoreError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for the query pipeline. Configuration errors come
/// from sequence compilation; backend errors from the storage
/// collaborator. Both are contained per sequence by the executor:
/// user-visible failure is "fewer results", never a crash.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// True for errors caused by the query itself rather than the
    /// backend.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Plan(_))
    }
}

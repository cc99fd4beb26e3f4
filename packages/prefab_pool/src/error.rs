use std::result;

use thiserror::Error;

/// Errors that can occur when operating on a [`PrefabPool`][crate::PrefabPool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller passed an argument that the operation cannot work with.
    #[error("invalid argument '{argument}': {problem}")]
    InvalidArgument {
        /// The name of the offending parameter.
        argument: &'static str,

        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = result::Result<T, Error>;

//! Domain result type
//!
//! `std::result::Result` is the two-variant outcome of every repository and
//! use case call. [`Fold`] adds the eliminator that forces both branches to be
//! handled at the call site.

use super::error::Failure;

/// Standard result type for repository and use case operations
pub type Result<T> = std::result::Result<T, Failure>;

/// Eliminator over both outcomes
pub trait Fold<T, F> {
    /// Invoke exactly one of the two producers and return its value
    fn fold<R>(self, on_failure: impl FnOnce(F) -> R, on_success: impl FnOnce(T) -> R) -> R;
}

impl<T, F> Fold<T, F> for std::result::Result<T, F> {
    fn fold<R>(self, on_failure: impl FnOnce(F) -> R, on_success: impl FnOnce(T) -> R) -> R {
        match self {
            Ok(value) => on_success(value),
            Err(failure) => on_failure(failure),
        }
    }
}

/// Pure success value
pub fn success<T>(value: T) -> Result<T> {
    Ok(value)
}

/// Pure failure value
pub fn failure<T>(failure: Failure) -> Result<T> {
    Err(failure)
}

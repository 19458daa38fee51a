//! Cooperative cancellation.
//!
//! Long-running loops poll a [`CancelToken`] (per row while rasterizing,
//! per frame while animating) and return [`Outcome::Cancelled`] instead of a
//! partial buffer once it is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller sets to abandon in-flight work.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Result of work that may be cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The work ran to completion.
    Complete(T),
    /// The token was set before the work finished.
    Cancelled,
}

impl<T> Outcome<T> {
    /// Returns the value if complete.
    pub fn complete(self) -> Option<T> {
        match self {
            Outcome::Complete(v) => Some(v),
            Outcome::Cancelled => None,
        }
    }

    /// Whether the work was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Maps the completed value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Complete(v) => Outcome::Complete(f(v)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Unwraps an `Outcome`, returning `Ok(Outcome::Cancelled)` from the
/// enclosing function when cancelled.
macro_rules! complete_or_return {
    ($outcome:expr) => {
        match $outcome {
            $crate::cancel::Outcome::Complete(v) => v,
            $crate::cancel::Outcome::Cancelled => {
                return Ok($crate::cancel::Outcome::Cancelled)
            }
        }
    };
}

pub(crate) use complete_or_return;

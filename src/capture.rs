use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

use crate::outcome::Outcome;

/// A panic captured at an [Outcome::capture] boundary.
///
/// The original payload is kept intact so it can be inspected, recovered
/// through [downcast](Self::downcast), or rethrown with
/// [resume](Self::resume). A `message` is available whenever the payload was
/// one of the string types produced by the `panic!` macro.
#[derive(Error)]
#[error("{}", .message.as_deref().unwrap_or("panic with a non-string payload"))]
pub struct Panic {
    payload: Box<dyn Any + Send>,
    message: Option<String>,
}

impl Panic {
    fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned());

        Self { payload, message }
    }

    /// The panic message, if the payload carried one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Borrows the raw payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    /// Returns `true` if the payload is a `P`.
    pub fn is<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }

    /// Recovers the payload as a `P`, handing the panic back untouched when
    /// the payload is something else.
    pub fn downcast<P: Any>(self) -> Result<P, Self> {
        let Self { payload, message } = self;

        match payload.downcast::<P>() {
            Ok(payload) => Ok(*payload),
            Err(payload) => Err(Self { payload, message }),
        }
    }

    /// Resumes the unwind this panic was captured from, with the original
    /// payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The payload cooperative cancellation unwinds with.
///
/// Capture boundaries treat this payload as a signal rather than a failure:
/// it is always rethrown so that cancellation keeps propagating through the
/// task tree instead of being turned into a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled")]
pub struct Cancellation;

/// Starts a cancellation unwind on the current thread.
pub fn cancel() -> ! {
    panic::panic_any(Cancellation)
}

/// The single interception point shared by every capturing operation: runs
/// `f` and converts an unwind into a [Panic], unless the payload is a
/// [Cancellation], which is resumed as is.
fn run_caught<T, F: FnOnce() -> T>(f: F) -> Outcome<T, Panic> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            if payload.is::<Cancellation>() {
                debug!("cancellation unwind reached a capture boundary, resuming");
                panic::resume_unwind(payload);
            }

            let panic = Panic::new(payload);
            debug!("captured panic: {}", panic);
            Outcome::Failure(panic)
        }
    }
}

impl<T> Outcome<T, Panic> {
    /// Runs `block` on the calling thread, capturing a panic as a
    /// [Failure](Outcome::Failure).
    ///
    /// A [Cancellation] payload is never captured; it is resumed immediately
    /// so this constructor cannot mask cooperative cancellation. The only
    /// side effects are `block`'s own.
    pub fn capture<F: FnOnce() -> T>(block: F) -> Self {
        run_caught(block)
    }

    /// Maps the success value through `transform`, capturing a panic from
    /// `transform` as the new failure. A [Failure](Outcome::Failure)
    /// receiver passes through unchanged, and a [Cancellation] unwind still
    /// propagates.
    pub fn map_capturing<U, F: FnOnce(T) -> U>(self, transform: F) -> Outcome<U, Panic> {
        match self {
            Self::Success(value) => run_caught(move || transform(value)),
            Self::Failure(panic) => Outcome::Failure(panic),
        }
    }

    /// Returns the success value, or resumes the captured unwind with its
    /// original payload.
    pub fn unwrap(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(panic) => panic.resume(),
        }
    }
}

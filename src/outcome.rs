use std::any::Any;
use std::convert::Infallible;
use std::fmt::Debug;
use std::panic;

/// The result of a computation that either succeeded with a `T` or failed
/// with an `E`.
///
/// An outcome is always exactly one of the two variants and never changes
/// variant once built; every adapter consumes the receiver and returns a new
/// value. The unused type parameter of a plain construction is left to
/// inference, so `Outcome::Success(v)` fits wherever any error type is
/// expected.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E> {
    /// The computation succeeded, carrying its value.
    Success(T),
    /// The computation failed, carrying the error.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns `true` if the outcome is a [Success](Self::Success).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if the outcome is a [Failure](Self::Failure).
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success value, discarding an error if there was one.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error, discarding a success value if there was one.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Borrows the contents, producing an `Outcome<&T, &E>`.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Splits the outcome into its two sides. Exactly one of the returned
    /// options is populated.
    pub fn into_parts(self) -> (Option<T>, Option<E>) {
        match self {
            Self::Success(value) => (Some(value), None),
            Self::Failure(error) => (None, Some(error)),
        }
    }

    /// Returns the success value, or computes a fallback from the error.
    pub fn unwrap_or_else<F: FnOnce(E) -> T>(self, fallback: F) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => fallback(error),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a [Success](Self::Success). That panic
    /// signals misuse of this method, not a failure of the computation the
    /// outcome came from.
    pub fn unwrap_failure(self) -> E
    where
        T: Debug,
    {
        match self {
            Self::Success(value) => {
                panic!("called `Outcome::unwrap_failure()` on a `Success` value: {value:?}")
            }
            Self::Failure(error) => error,
        }
    }

    /// Returns the success value, or panics with the payload built by
    /// `supplier`. The original error is discarded, not attached as a cause.
    pub fn expect_with<M, F>(self, supplier: F) -> T
    where
        M: Any + Send,
        F: FnOnce() -> M,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => panic::panic_any(supplier()),
        }
    }

    /// Returns the error, or panics with the payload built by `supplier`.
    /// The success value is discarded.
    pub fn expect_failure_with<M, F>(self, supplier: F) -> E
    where
        M: Any + Send,
        F: FnOnce() -> M,
    {
        match self {
            Self::Success(_) => panic::panic_any(supplier()),
            Self::Failure(error) => error,
        }
    }

    /// Applies `transform` to the success value, leaving an error untouched.
    ///
    /// No capture happens here: a panic inside `transform` unwinds into the
    /// caller.
    pub fn map<U, F: FnOnce(T) -> U>(self, transform: F) -> Outcome<U, E> {
        match self {
            Self::Success(value) => Outcome::Success(transform(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Applies `transform` to the error, leaving a success value untouched.
    pub fn map_failure<F, O: FnOnce(E) -> F>(self, transform: O) -> Outcome<T, F> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(transform(error)),
        }
    }

    /// Chains a dependent computation onto the success value.
    ///
    /// A [Failure](Self::Failure) receiver passes through unchanged and
    /// `transform` is never invoked, so a chain of `and_then` calls stops at
    /// the first failure.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U, E>>(self, transform: F) -> Outcome<U, E> {
        match self {
            Self::Success(value) => transform(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Attempts to recover from an error, returning whatever outcome
    /// `transform` produces. A success value passes through unchanged.
    pub fn or_else<F, O: FnOnce(E) -> Outcome<T, F>>(self, transform: O) -> Outcome<T, F> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => transform(error),
        }
    }

    /// Collapses both variants into a single value, invoking exactly one of
    /// the two closures.
    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Runs `action` on the success value, handing back the receiver
    /// unchanged so calls can be chained fluently.
    pub fn inspect<F: FnOnce(&T)>(self, action: F) -> Self {
        if let Self::Success(value) = &self {
            action(value);
        }
        self
    }

    /// Runs `action` on the error, handing back the receiver unchanged.
    pub fn inspect_failure<F: FnOnce(&E)>(self, action: F) -> Self {
        if let Self::Failure(error) = &self {
            action(error);
        }
        self
    }
}

impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Removes exactly one level of nesting. An outer error is re-tagged to
    /// the inner success type, an outer success yields the inner outcome as
    /// is.
    pub fn flatten(self) -> Outcome<T, E> {
        match self {
            Self::Success(inner) => inner,
            Self::Failure(error) => Outcome::Failure(error),
        }
    }
}

impl<T> Outcome<T, Infallible> {
    /// Widens the error type of an outcome that cannot fail.
    pub fn widen_failure<E>(self) -> Outcome<T, E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(never) => match never {},
        }
    }
}

impl<E> Outcome<Infallible, E> {
    /// Widens the success type of an outcome that cannot succeed.
    pub fn widen_success<T>(self) -> Outcome<T, E> {
        match self {
            Self::Success(never) => match never {},
            Self::Failure(error) => Outcome::Failure(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

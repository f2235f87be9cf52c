//! Two-variant success/failure container.
//!
//! This module provides [`Outcome`], the value every validator, adapter and
//! operator in this crate returns. An outcome is decided once, at
//! construction, and never changes variant afterwards.

use std::fmt::Debug;

use stillwater::Validation;

/// The result of a validation or pipeline step.
///
/// `Outcome` is either a `Success` carrying the produced value or a `Failure`
/// carrying the reason. Accessors such as [`ok`](Outcome::ok) and
/// [`err`](Outcome::err) never panic; [`unwrap`](Outcome::unwrap) and
/// [`expect`](Outcome::expect) panic on the wrong variant.
///
/// # Example
///
/// ```rust
/// use verdict::Outcome;
///
/// let parsed: Outcome<i32, String> = Outcome::success(21);
/// let doubled = parsed.map(|n| n * 2);
///
/// assert!(doubled.is_success());
/// assert_eq!(doubled.ok(), Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<S, F> {
    /// The step produced a value.
    Success(S),
    /// The step failed.
    Failure(F),
}

impl<S, F> Outcome<S, F> {
    /// Creates a `Success` outcome.
    #[inline]
    pub fn success(value: S) -> Self {
        Outcome::Success(value)
    }

    /// Creates a `Failure` outcome.
    #[inline]
    pub fn failure(error: F) -> Self {
        Outcome::Failure(error)
    }

    /// Returns true if this is a `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns true if this is a `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Returns the success value, or `None` for a `Failure`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::Outcome;
    ///
    /// let failed: Outcome<i32, &str> = Outcome::failure("boom");
    /// assert_eq!(failed.ok(), None);
    /// ```
    #[inline]
    pub fn ok(self) -> Option<S> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the failure value, or `None` for a `Success`.
    #[inline]
    pub fn err(self) -> Option<F> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrows the contents without consuming the outcome.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&S, &F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the success value, leaving a `Failure` untouched.
    #[inline]
    pub fn map<U, M>(self, f: M) -> Outcome<U, F>
    where
        M: FnOnce(S) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the failure value, leaving a `Success` untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::Outcome;
    ///
    /// let failed: Outcome<i32, &str> = Outcome::failure("boom");
    /// let described = failed.map_failure(|e| format!("step failed: {}", e));
    /// assert_eq!(described.err().as_deref(), Some("step failed: boom"));
    /// ```
    #[inline]
    pub fn map_failure<U, M>(self, f: M) -> Outcome<S, U>
    where
        M: FnOnce(F) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chains another fallible step onto a `Success`.
    #[inline]
    pub fn and_then<U, M>(self, f: M) -> Outcome<U, F>
    where
        M: FnOnce(S) -> Outcome<U, F>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Returns the success value or panics with the caller's message.
    ///
    /// # Panics
    ///
    /// Panics with `message` if this is a `Failure`.
    #[inline]
    #[track_caller]
    pub fn expect(self, message: &str) -> S {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => panic!("{}", message),
        }
    }

    /// Returns the failure value or panics with the caller's message.
    ///
    /// # Panics
    ///
    /// Panics with `message` if this is a `Success`.
    #[inline]
    #[track_caller]
    pub fn expect_failure(self, message: &str) -> F {
        match self {
            Outcome::Success(_) => panic!("{}", message),
            Outcome::Failure(error) => error,
        }
    }

    /// Converts into a standard `Result` so `?` can be used.
    #[inline]
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<S, F: Debug> Outcome<S, F> {
    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Failure`.
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> S {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => {
                panic!("called `Outcome::unwrap()` on a `Failure` value: {:?}", error)
            }
        }
    }
}

impl<S: Debug, F> Outcome<S, F> {
    /// Returns the failure value.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Success`.
    #[inline]
    #[track_caller]
    pub fn unwrap_failure(self) -> F {
        match self {
            Outcome::Success(value) => {
                panic!(
                    "called `Outcome::unwrap_failure()` on a `Success` value: {:?}",
                    value
                )
            }
            Outcome::Failure(error) => error,
        }
    }
}

impl<S, F> From<Result<S, F>> for Outcome<S, F> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<S, F> From<Outcome<S, F>> for Result<S, F> {
    fn from(outcome: Outcome<S, F>) -> Self {
        outcome.into_result()
    }
}

impl<S, F> From<Validation<S, F>> for Outcome<S, F> {
    fn from(validation: Validation<S, F>) -> Self {
        match validation {
            Validation::Success(value) => Outcome::Success(value),
            Validation::Failure(error) => Outcome::Failure(error),
        }
    }
}

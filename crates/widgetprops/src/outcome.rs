//! Success/failure outcome of a property operation.
//!
//! [`Outcome<T>`] is what the sheet layer hands back to callers: either the
//! computed payload or an opaque, human-readable failure message meant to be
//! displayed or logged. There is no error taxonomy at this level; callers that
//! want one use [`Outcome::into_result`] and get a [`PropsError::Failed`].
//!
//! The payload-less case is `Outcome<()>`, built with [`Outcome::ok`].
//!
//! ## Accessor Contract
//!
//! [`Outcome::value`] is only defined in the success state and
//! [`Outcome::error`] only in the failure state. Calling either in the wrong
//! state is a programming error and panics; it never falls back to a default.
//! Use [`Outcome::as_value`] or a `match` when the state is not known.

use crate::error::{PropsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Build a failure. An empty message is accepted but logged, since
    /// nothing useful can be shown to the user.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            tracing::warn!("outcome constructed with an empty failure message");
        }
        Outcome::Failure(message)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Borrow the payload.
    ///
    /// # Panics
    ///
    /// Panics if this is a failure.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(message) => {
                panic!("Outcome::value called on a failure: {}", message)
            }
        }
    }

    /// Mutably borrow the payload.
    ///
    /// # Panics
    ///
    /// Panics if this is a failure.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(message) => {
                panic!("Outcome::value_mut called on a failure: {}", message)
            }
        }
    }

    /// Take the payload.
    ///
    /// # Panics
    ///
    /// Panics if this is a failure.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(message) => {
                panic!("Outcome::into_value called on a failure: {}", message)
            }
        }
    }

    /// Borrow the failure message.
    ///
    /// # Panics
    ///
    /// Panics if this is a success.
    #[track_caller]
    pub fn error(&self) -> &str {
        match self {
            Outcome::Failure(message) => message,
            Outcome::Success(_) => panic!("Outcome::error called on a success"),
        }
    }

    /// Take the failure message.
    ///
    /// # Panics
    ///
    /// Panics if this is a success.
    #[track_caller]
    pub fn into_error(self) -> String {
        match self {
            Outcome::Failure(message) => message,
            Outcome::Success(_) => panic!("Outcome::into_error called on a success"),
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(message) => Outcome::Failure(message),
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(message) => Err(PropsError::Failed(message)),
        }
    }
}

impl Outcome<()> {
    /// Payload-less success.
    pub fn ok() -> Self {
        Outcome::Success(())
    }
}

impl<T> From<&Outcome<T>> for bool {
    fn from(outcome: &Outcome<T>) -> Self {
        outcome.is_success()
    }
}

impl<T, E: fmt::Display> From<std::result::Result<T, E>> for Outcome<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(err) => Outcome::failure(err.to_string()),
        }
    }
}

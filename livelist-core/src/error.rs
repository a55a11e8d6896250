// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for live collection streams.
//!
//! Errors travel inside streams as [`StreamItem::Error`](crate::StreamItem::Error)
//! and are terminal: a stream that yields one produces nothing afterwards.
//!
//! # Examples
//!
//! ```
//! use livelist_core::{LiveListError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(LiveListError::stream_error("source not ready"))
//! }
//!
//! assert!(load().is_err());
//! ```

use core::fmt::Debug;

/// Root error type for all live collection operations.
#[derive(Debug, thiserror::Error)]
pub enum LiveListError {
    /// General stream processing failure, typically raised by a producer.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The condition stream of one item failed.
    #[error("Condition stream of item {key} failed: {source}")]
    ConditionStreamError {
        /// Debug rendering of the item key
        key: String,
        /// Error yielded by the condition stream
        #[source]
        source: Box<LiveListError>,
    },

    /// The predicate rejected a condition value with an error.
    #[error("Predicate failed for item {key}: {source}")]
    PredicateError {
        /// Debug rendering of the item key
        key: String,
        /// Error returned by the predicate
        #[source]
        source: Box<LiveListError>,
    },

    /// An item was added while an item with the same key was still present.
    ///
    /// This is a contract violation of the upstream producer, not a transient
    /// condition: the item would otherwise be subscribed twice.
    #[error("Item {key} added twice without an intervening removal")]
    DuplicateSubscription {
        /// Debug rendering of the item key
        key: String,
    },
}

impl LiveListError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    pub fn condition_error(key: &impl Debug, source: LiveListError) -> Self {
        Self::ConditionStreamError {
            key: format!("{key:?}"),
            source: Box::new(source),
        }
    }

    pub fn predicate_error(key: &impl Debug, source: LiveListError) -> Self {
        Self::PredicateError {
            key: format!("{key:?}"),
            source: Box::new(source),
        }
    }

    pub fn duplicate_subscription(key: &impl Debug) -> Self {
        Self::DuplicateSubscription {
            key: format!("{key:?}"),
        }
    }

    /// Returns `true` if the failure is attributable to a single item rather
    /// than to the collection as a whole.
    #[must_use]
    pub const fn is_item_failure(&self) -> bool {
        matches!(
            self,
            Self::ConditionStreamError { .. } | Self::PredicateError { .. }
        )
    }
}

/// Specialized Result type for live collection operations
pub type Result<T> = std::result::Result<T, LiveListError>;

/// Extension trait for converting errors into `LiveListError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`, so a
/// fallible predicate can use `map_err(IntoLiveListError::into_live_list)`.
pub trait IntoLiveListError {
    /// Convert this error into a `LiveListError`
    fn into_live_list(self) -> LiveListError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoLiveListError for E {
    fn into_live_list(self) -> LiveListError {
        LiveListError::user_error(self)
    }
}

impl Clone for LiveListError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors cannot be cloned, keep their message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::ConditionStreamError { key, source } => Self::ConditionStreamError {
                key: key.clone(),
                source: source.clone(),
            },
            Self::PredicateError { key, source } => Self::PredicateError {
                key: key.clone(),
                source: source.clone(),
            },
            Self::DuplicateSubscription { key } => Self::DuplicateSubscription { key: key.clone() },
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Errors raised on the producer side of a subject or source list.
///
/// These are distinct from stream errors: they are returned to the caller that
/// tried to push or subscribe, and never travel through a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new items or subscribers.
    Closed,
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Subject is closed"),
        }
    }
}

impl std::error::Error for SubjectError {}

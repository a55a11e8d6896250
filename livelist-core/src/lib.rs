// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for live collections.
//!
//! A live collection is published as a stream of [`ChangeSet`]s: each change set
//! describes one batch of mutations ([`Change::Add`], [`Change::Remove`], ...) so
//! that consumers can keep a derived view current without re-reading the whole
//! collection. Every stream in this workspace carries [`StreamItem`]s, which lets
//! a terminal [`LiveListError`] travel the same path as the data.
//!
//! - [`SourceList`] is the mutable entry point producing change sets.
//! - [`Subject`] and [`BehaviorSubject`] are hot broadcasters; the latter replays
//!   its current value to every new subscriber and is the usual way to model a
//!   per-item condition.
//! - [`Keyed`] gives items their identity.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod change_set;
pub mod error;
pub mod into_stream;
pub mod keyed;
#[cfg(feature = "runtime-tokio")]
pub mod live_task;
pub mod source_list;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::change_set::{Change, ChangeSet};
pub use self::error::{IntoLiveListError, LiveListError, Result};
pub use self::into_stream::IntoStream;
pub use self::keyed::Keyed;
#[cfg(feature = "runtime-tokio")]
pub use self::live_task::LiveTask;
pub use self::source_list::{ChangeStream, ListEditor, SourceList};
pub use self::stream_item::StreamItem;
pub use self::subject::{BehaviorSubject, Subject, SubjectStream};
pub use self::subject_error::SubjectError;
#[cfg(feature = "runtime-tokio")]
pub use tokio_util::sync::CancellationToken;

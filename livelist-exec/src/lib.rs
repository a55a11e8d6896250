// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consumers of live collection streams.
//!
//! - [`SubscribeExt::subscribe`] drives any `StreamItem` stream with a
//!   sequential async handler until it ends, fails or is cancelled.
//! - [`BindExt::bind`] materialises a change-set stream into a [`BoundList`]
//!   kept current by a background task. Dropping the list stops the task and
//!   releases the whole stream chain behind it.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
mod logging;
pub mod bind;
pub mod subscribe;

pub use bind::{BindExt, BoundList};
pub use subscribe::SubscribeExt;

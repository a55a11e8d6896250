// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential async subscription to `StreamItem` streams.

mod implementation;

pub use implementation::SubscribeExt;
pub(crate) use implementation::subscribe_impl;

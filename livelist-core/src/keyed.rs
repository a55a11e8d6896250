// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Item identity.
//!
//! Live collections track items by identity, not by value: two notifications
//! about the "same" item must refer to one membership slot even if the item's
//! contents changed in between. [`Keyed`] supplies that identity.
//!
//! - `Arc<T>` is keyed by pointer, i.e. reference equality. Two clones of one
//!   `Arc` are the same item; two equal values in separate `Arc`s are not.
//! - Integers and strings are keyed by value.
//!
//! ```
//! use livelist_core::Keyed;
//! use std::sync::Arc;
//!
//! let a = Arc::new("player");
//! let b = Arc::new("player");
//!
//! assert_eq!(a.key(), Arc::clone(&a).key());
//! assert_ne!(a.key(), b.key());
//! ```

use core::fmt::Debug;
use core::hash::Hash;
use std::sync::Arc;

/// Types with a stable identity inside a live collection.
pub trait Keyed {
    /// Identity of the item.
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the identity of this item.
    fn key(&self) -> Self::Key;
}

impl<T: ?Sized> Keyed for Arc<T> {
    type Key = usize;

    fn key(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }
}

macro_rules! keyed_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                type Key = $ty;

                fn key(&self) -> $ty {
                    self.clone()
                }
            }
        )*
    };
}

keyed_by_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, String, &'static str);

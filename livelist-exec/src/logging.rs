// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Conditional logging shim: uses `tracing` when enabled, falls back to eprintln!/println!
// The fallbacks are defined under distinct names since a bare `warn` clashes
// with the built-in attribute of the same name.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{error, info, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        println!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {log_error as error, log_info as info, log_warn as warn};

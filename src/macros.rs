//! Request logging macros
//!
//! These macros log outgoing requests and raw responses in debug builds
//! but compile to no-ops in release builds so bodies never reach release logs.

/// Request debug logging - only active in debug builds
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! req_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

/// Request debug logging - no-op in release builds
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! req_debug {
    ($($arg:tt)*) => {};
}

/// Response body trace logging - only active in debug builds
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! req_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

/// Response body trace logging - no-op in release builds
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! req_trace {
    ($($arg:tt)*) => {};
}

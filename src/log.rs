//! Logging shims.
//!
//! Call sites write `crate::log::debug!(...)` and `crate::log::warn!(...)`
//! with `tracing` field syntax. With the `tracing` feature those are the
//! `tracing` macros; without it they swallow their arguments, so nothing needs
//! a `cfg` guard. Neither macro is part of the public API.
//!
//! - `debug!`: chosen tick steps, tick counts, discovered ranges
//! - `warn!`: a formatter forcing a tick spacing change

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! swallow_debug {
    ($($field:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! swallow_warn {
    ($($field:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use swallow_debug as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use swallow_warn as warn;

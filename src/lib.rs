//! NVTX marks and ranges that degrade to no-ops.
//!
//! On first use the crate looks for `libnvToolsExt` (in `$NVTX_CUDA_TOOLKIT`,
//! then the older `$NVTXPY_CUDA_TOOLKIT`, then the platform's default CUDA
//! directory) and binds its entry points. If anything about that fails every
//! call below becomes a no-op, so
//! instrumentation never changes what the instrumented program does.
//!
//! # Modules
//!
//! - [`locate`] - where the NVTX library is expected to live
//! - [`binding`] - loading it and the [`Backend`] dispatch seam
//! - [`event`] - the `nvtxEventAttributes` v1 record
//! - [`profiler`] - marks, ranges, scoped ranges and wrapped functions
//! - [`stats`] - per-range call counts and durations
//!
//! # Example
//!
//! ```no_run
//! use nvtx_ranges::{colors, EventAttrs};
//!
//! nvtx_ranges::mark("startup");
//! {
//!     let _range = nvtx_ranges::range_with("load", EventAttrs::new().with_color(colors::CYAN));
//!     // ... work ...
//! }
//!
//! let parse = nvtx_ranges::profiled("parse", EventAttrs::new()).wrap(|s: &str| s.len());
//! assert_eq!(parse("abc"), 3);
//!
//! let stats = nvtx_ranges::get_stats();
//! assert_eq!(stats["load"].count, 1);
//! ```

pub mod binding;
pub mod colors;
pub mod config;
pub mod event;
pub mod locate;
pub mod profiler;
pub mod stats;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use binding::{bind, Backend, BindingState, NoopBackend};
pub use config::Config;
pub use event::{
    DecodeError, EncodeError, EventAttributes, EventAttrs, Message, Payload, PayloadValue,
};
pub use locate::{library_path, Platform};
pub use profiler::{Profiled, Profiler, ScopedRange};
pub use stats::{RangeStat, Stats};

static PROFILER: OnceLock<Profiler> = OnceLock::new();

/// The process-wide profiler, bound from the environment on first use.
pub fn global() -> &'static Profiler {
    PROFILER.get_or_init(|| Profiler::new(&Config::from_env()))
}

/// Install `profiler` as the process-wide profiler.
///
/// Only works before anything has used [`global`]; otherwise the profiler is
/// handed back.
pub fn init_with(profiler: Profiler) -> Result<(), Profiler> {
    PROFILER.set(profiler)
}

pub fn is_available() -> bool {
    global().is_available()
}

pub fn mark(message: &str) {
    global().mark(message, EventAttrs::new())
}

pub fn mark_with(message: &str, attrs: EventAttrs) {
    global().mark(message, attrs)
}

pub fn range_push(message: &str) {
    global().range_push(message, EventAttrs::new())
}

pub fn range_push_with(message: &str, attrs: EventAttrs) {
    global().range_push(message, attrs)
}

pub fn range_pop() {
    global().range_pop()
}

/// Scoped range that also feeds [`get_stats`].
pub fn range(name: &str) -> ScopedRange<'static> {
    global().range(name, EventAttrs::new())
}

pub fn range_with(name: &str, attrs: EventAttrs) -> ScopedRange<'static> {
    global().range(name, attrs)
}

/// Scoped range that is only reported to NVTX.
pub fn range_nvtx_only(name: &str, attrs: EventAttrs) -> ScopedRange<'static> {
    global().range_nvtx_only(name, attrs)
}

pub fn profiled(tag: impl Into<String>, attrs: EventAttrs) -> Profiled<'static> {
    global().profiled(tag, attrs)
}

/// Copy of the accumulated scoped-range statistics.
pub fn get_stats() -> HashMap<String, RangeStat> {
    global().stats().snapshot()
}

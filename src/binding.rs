//! Loading `libnvToolsExt` and dispatching to it.
//!
//! [`bind`] never fails outward. Anything that goes wrong while opening the
//! library or resolving its symbols turns into [`BindingState::Unavailable`],
//! and the profiler then runs on [`NoopBackend`].

use std::ffi::{c_char, c_int, CStr};
use std::path::Path;

use anyhow::{Context, Result};
use libloading::Library;

use crate::event::EventAttributes;

type MarkAFn = unsafe extern "C" fn(message: *const c_char);
type MarkExFn = for<'a> unsafe extern "C" fn(event: *const EventAttributes<'a>);
type RangePushAFn = unsafe extern "C" fn(message: *const c_char) -> c_int;
type RangePushExFn = for<'a> unsafe extern "C" fn(event: *const EventAttributes<'a>) -> c_int;
type RangePopFn = unsafe extern "C" fn() -> c_int;

/// Target of every mark, push and pop.
///
/// Push and pop return the native stack depth, negative on error. Callers in
/// this crate ignore it.
pub trait Backend: Send + Sync {
    fn mark_ascii(&self, message: &CStr);
    fn mark_ex(&self, event: &EventAttributes<'_>);
    fn range_push_ascii(&self, message: &CStr) -> i32;
    fn range_push_ex(&self, event: &EventAttributes<'_>) -> i32;
    fn range_pop(&self) -> i32;

    /// Whether calls reach a real profiler.
    fn is_native(&self) -> bool {
        false
    }
}

/// Backend used when no NVTX library could be bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl Backend for NoopBackend {
    fn mark_ascii(&self, _message: &CStr) {}
    fn mark_ex(&self, _event: &EventAttributes<'_>) {}
    fn range_push_ascii(&self, _message: &CStr) -> i32 {
        0
    }
    fn range_push_ex(&self, _event: &EventAttributes<'_>) -> i32 {
        0
    }
    fn range_pop(&self) -> i32 {
        0
    }
}

/// An opened NVTX library with its entry points resolved.
pub struct NativeLibrary {
    mark_a: MarkAFn,
    mark_ex: MarkExFn,
    range_push_a: RangePushAFn,
    range_push_ex: RangePushExFn,
    range_pop: RangePopFn,
    // Keeps the function pointers above valid.
    _lib: Library,
}

impl NativeLibrary {
    pub fn open(path: &Path) -> Result<Self> {
        // SAFETY: loading runs the library's initializers. libnvToolsExt has
        // none that depend on the loading thread.
        let lib = unsafe { Library::new(path) }
            .with_context(|| format!("Failed to load NVTX library {}", path.display()))?;

        // SAFETY: the declared signatures match nvToolsExt.h.
        unsafe {
            Ok(Self {
                mark_a: symbol(&lib, "nvtxMarkA")?,
                mark_ex: symbol(&lib, "nvtxMarkEx")?,
                range_push_a: symbol(&lib, "nvtxRangePushA")?,
                range_push_ex: symbol(&lib, "nvtxRangePushEx")?,
                range_pop: symbol(&lib, "nvtxRangePop")?,
                _lib: lib,
            })
        }
    }
}

unsafe fn symbol<T: Copy>(lib: &Library, name: &str) -> Result<T> {
    let sym = lib
        .get::<T>(name.as_bytes())
        .with_context(|| format!("NVTX library is missing symbol {name}"))?;
    Ok(*sym)
}

impl Backend for NativeLibrary {
    fn mark_ascii(&self, message: &CStr) {
        unsafe { (self.mark_a)(message.as_ptr()) }
    }

    fn mark_ex(&self, event: &EventAttributes<'_>) {
        unsafe { (self.mark_ex)(event) }
    }

    fn range_push_ascii(&self, message: &CStr) -> i32 {
        unsafe { (self.range_push_a)(message.as_ptr()) }
    }

    fn range_push_ex(&self, event: &EventAttributes<'_>) -> i32 {
        unsafe { (self.range_push_ex)(event) }
    }

    fn range_pop(&self) -> i32 {
        unsafe { (self.range_pop)() }
    }

    fn is_native(&self) -> bool {
        true
    }
}

/// Outcome of trying to bind the NVTX library, decided once per process.
pub enum BindingState {
    Bound(NativeLibrary),
    Unavailable(anyhow::Error),
}

impl BindingState {
    pub fn is_bound(&self) -> bool {
        matches!(self, BindingState::Bound(_))
    }

    pub fn into_backend(self) -> Box<dyn Backend> {
        match self {
            BindingState::Bound(lib) => Box::new(lib),
            BindingState::Unavailable(_) => Box::new(NoopBackend),
        }
    }
}

/// Try to bind the library at `candidate`.
pub fn bind(candidate: Option<&Path>) -> BindingState {
    let Some(path) = candidate else {
        tracing::debug!("No NVTX library candidate for this platform, markers disabled");
        return BindingState::Unavailable(anyhow::anyhow!(
            "no NVTX library candidate for this platform"
        ));
    };

    match NativeLibrary::open(path) {
        Ok(lib) => {
            tracing::info!("Loaded NVTX library from {}", path.display());
            BindingState::Bound(lib)
        }
        Err(e) => {
            tracing::debug!("NVTX markers disabled: {:#}", e);
            BindingState::Unavailable(e)
        }
    }
}

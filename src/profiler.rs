//! Marks, ranges and scoped ranges on top of a [`Backend`].
//!
//! The backend is picked once when the [`Profiler`] is built. With no NVTX
//! library every call lands in [`NoopBackend`], so instrumented code behaves
//! the same whether or not a profiler is attached.

use std::marker::PhantomData;
use std::time::Instant;

use crate::binding::{bind, Backend, NoopBackend};
use crate::config::Config;
use crate::event::{message_cstring, EventAttributes, EventAttrs};
use crate::stats::Stats;

pub struct Profiler {
    backend: Box<dyn Backend>,
    stats: Stats,
}

impl Profiler {
    /// Locate and bind the NVTX library described by `config`.
    pub fn new(config: &Config) -> Self {
        let path = config.library_path();
        Self::with_backend(bind(path.as_deref()).into_backend())
    }

    pub fn noop() -> Self {
        Self::with_backend(Box::new(NoopBackend))
    }

    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            stats: Stats::new(),
        }
    }

    /// Whether events reach a real NVTX library.
    pub fn is_available(&self) -> bool {
        self.backend.is_native()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Emit an instantaneous marker.
    pub fn mark(&self, message: &str, attrs: EventAttrs) {
        let message = message_cstring(message);
        if attrs.is_empty() {
            self.backend.mark_ascii(&message);
        } else {
            let event = EventAttributes::encode(Some(&*message), &attrs);
            self.backend.mark_ex(&event);
        }
    }

    /// Open a nested range. Must be closed by [`Profiler::range_pop`] on the
    /// same thread.
    pub fn range_push(&self, message: &str, attrs: EventAttrs) {
        let message = message_cstring(message);
        if attrs.is_empty() {
            self.backend.range_push_ascii(&message);
        } else {
            let event = EventAttributes::encode(Some(&*message), &attrs);
            self.backend.range_push_ex(&event);
        }
    }

    /// Close the innermost open range. Nesting is not checked.
    pub fn range_pop(&self) {
        self.backend.range_pop();
    }

    /// Open a range that is popped when the returned guard drops, and
    /// account its duration under `name` in [`Profiler::stats`].
    pub fn range(&self, name: &str, attrs: EventAttrs) -> ScopedRange<'_> {
        self.range_push(name, attrs);
        ScopedRange {
            profiler: self,
            timing: Some((name.to_string(), Instant::now())),
            _not_send: PhantomData,
        }
    }

    /// Like [`Profiler::range`] but without touching the stats.
    pub fn range_nvtx_only(&self, name: &str, attrs: EventAttrs) -> ScopedRange<'_> {
        self.range_push(name, attrs);
        ScopedRange {
            profiler: self,
            timing: None,
            _not_send: PhantomData,
        }
    }

    /// Wrapper that runs functions inside `range(tag, attrs)`.
    pub fn profiled(&self, tag: impl Into<String>, attrs: EventAttrs) -> Profiled<'_> {
        Profiled {
            profiler: self,
            tag: tag.into(),
            attrs,
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::noop()
    }
}

/// Guard for an open range.
///
/// Dropping it, including during a panic unwind, records the elapsed time and
/// pops the range.
///
/// NVTX range stacks are per thread, so the guard stays on the thread that
/// pushed it:
///
/// ```compile_fail
/// let profiler = nvtx_ranges::Profiler::noop();
/// let guard = profiler.range("work", nvtx_ranges::EventAttrs::new());
/// std::thread::scope(|s| {
///     s.spawn(move || drop(guard));
/// });
/// ```
#[must_use = "the range is popped as soon as the guard is dropped"]
pub struct ScopedRange<'p> {
    profiler: &'p Profiler,
    timing: Option<(String, Instant)>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopedRange<'_> {
    fn drop(&mut self) {
        if let Some((name, start)) = self.timing.take() {
            self.profiler.stats.record(&name, start.elapsed());
        }
        self.profiler.range_pop();
    }
}

/// A tag and attributes to bracket function calls with.
#[derive(Clone)]
pub struct Profiled<'p> {
    profiler: &'p Profiler,
    tag: String,
    attrs: EventAttrs,
}

impl<'p> Profiled<'p> {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Run `f` once inside the range.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> R {
        let _range = self.profiler.range(&self.tag, self.attrs);
        f()
    }

    /// Wrap `f` so every call runs inside the range. Arguments and return
    /// value pass through untouched; use a tuple for several arguments.
    pub fn wrap<A, R, F>(self, f: F) -> impl Fn(A) -> R + 'p
    where
        F: Fn(A) -> R + 'p,
    {
        move |args| self.call(|| f(args))
    }

    pub fn wrap_mut<A, R, F>(self, mut f: F) -> impl FnMut(A) -> R + 'p
    where
        F: FnMut(A) -> R + 'p,
    {
        move |args| self.call(|| f(args))
    }
}

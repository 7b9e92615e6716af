//! Common test utilities for nvtx-ranges integration tests.

use std::ffi::CStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nvtx_ranges::{Backend, EventAttributes};

/// Per-entry-point call counts.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub mark_ascii: AtomicUsize,
    pub mark_ex: AtomicUsize,
    pub push_ascii: AtomicUsize,
    pub push_ex: AtomicUsize,
    pub pop: AtomicUsize,
}

#[allow(dead_code)]
impl CallCounts {
    pub fn pushes(&self) -> usize {
        self.push_ascii.load(Ordering::SeqCst) + self.push_ex.load(Ordering::SeqCst)
    }

    pub fn pops(&self) -> usize {
        self.pop.load(Ordering::SeqCst)
    }

    pub fn marks(&self) -> (usize, usize) {
        (
            self.mark_ascii.load(Ordering::SeqCst),
            self.mark_ex.load(Ordering::SeqCst),
        )
    }
}

/// Backend standing in for libnvToolsExt that only counts calls.
///
/// The push and pop return values follow NVTX: the new or previous stack
/// depth, -1 when popping an empty stack.
#[derive(Clone, Default)]
pub struct CountingBackend {
    pub counts: Arc<CallCounts>,
    depth: Arc<AtomicUsize>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self) -> i32 {
        (self.depth.fetch_add(1, Ordering::SeqCst) + 1) as i32
    }
}

impl Backend for CountingBackend {
    fn mark_ascii(&self, _message: &CStr) {
        self.counts.mark_ascii.fetch_add(1, Ordering::SeqCst);
    }

    fn mark_ex(&self, event: &EventAttributes<'_>) {
        assert!(event.message().unwrap().is_some());
        self.counts.mark_ex.fetch_add(1, Ordering::SeqCst);
    }

    fn range_push_ascii(&self, _message: &CStr) -> i32 {
        self.counts.push_ascii.fetch_add(1, Ordering::SeqCst);
        self.push()
    }

    fn range_push_ex(&self, _event: &EventAttributes<'_>) -> i32 {
        self.counts.push_ex.fetch_add(1, Ordering::SeqCst);
        self.push()
    }

    fn range_pop(&self) -> i32 {
        self.counts.pop.fetch_add(1, Ordering::SeqCst);
        match self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |d| d.checked_sub(1))
        {
            Ok(previous) => previous as i32,
            Err(_) => -1,
        }
    }

    fn is_native(&self) -> bool {
        true
    }
}

//! Per-range call counts and cumulative durations.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Accumulated timings for one range name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeStat {
    pub count: u64,
    /// Serialized as fractional seconds.
    #[serde(serialize_with = "serialize_secs")]
    pub total: Duration,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl RangeStat {
    /// Average time per call, zero if the range never ran.
    pub fn mean(&self) -> Duration {
        match u32::try_from(self.count) {
            Ok(0) => Duration::ZERO,
            Ok(count) => self.total / count,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.count as f64),
        }
    }
}

/// Shared name to [`RangeStat`] map.
///
/// Entries are created on first use and live as long as the aggregator.
#[derive(Debug, Default)]
pub struct Stats {
    ranges: Mutex<HashMap<String, RangeStat>>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    // Updates never leave an entry half-written, so a poisoned map is still
    // usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RangeStat>> {
        self.ranges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, name: &str, elapsed: Duration) {
        let mut ranges = self.lock();
        match ranges.get_mut(name) {
            Some(stat) => {
                stat.count += 1;
                stat.total += elapsed;
            }
            None => {
                ranges.insert(
                    name.to_string(),
                    RangeStat {
                        count: 1,
                        total: elapsed,
                    },
                );
            }
        }
    }

    /// Independent copy of every entry.
    pub fn snapshot(&self) -> HashMap<String, RangeStat> {
        self.lock().clone()
    }

    pub fn get(&self, name: &str) -> Option<RangeStat> {
        self.lock().get(name).copied()
    }

    /// Snapshot rendered as a JSON object keyed by range name.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let sorted: BTreeMap<String, RangeStat> = self.snapshot().into_iter().collect();
        serde_json::to_string_pretty(&sorted)
    }
}

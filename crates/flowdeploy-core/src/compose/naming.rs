use std::sync::atomic::{AtomicU64, Ordering};

use flowdeploy_model::{FlowName, InstanceName};

use crate::clock::Clock;

/// Hands out strictly increasing ticks for instance names.
///
/// The tick is the clock's epoch milliseconds, bumped past the previous tick
/// when two calls land in the same millisecond.
#[derive(Debug, Default)]
pub struct InstanceNamer {
    last: AtomicU64,
}

impl InstanceNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_tick(&self, clock: &dyn Clock) -> u64 {
        let now = clock.epoch_millis();
        let prev = match self.last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev.saturating_add(1))
    }

    pub fn next(&self, name: &FlowName, clock: &dyn Clock) -> InstanceName {
        InstanceName::new(name, self.next_tick(clock))
    }
}

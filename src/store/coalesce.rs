// SPDX-License-Identifier: MPL-2.0
//! Frame-boundary batching.
//!
//! A `Coalescer` buffers values and delivers them as one batch on the next
//! tick of a fixed interval, so hosts can collapse same-frame visual churn.
//! It is strictly opt-in: the store itself publishes synchronously, and
//! nothing in the core depends on this primitive.

use crate::scheduler::{Scheduler, TimerHandle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Buffers pushed values and flushes them as a batch once per tick.
///
/// One timer at most is outstanding: the first `push` after a flush arms
/// the tick, later pushes ride along. Dropping the coalescer cancels the
/// pending tick; buffered values are then never delivered.
pub struct Coalescer<T> {
    buffer: Arc<Mutex<Buffer<T>>>,
    scheduler: Arc<dyn Scheduler>,
    interval: Duration,
    sink: Arc<dyn Fn(Vec<T>) + Send + Sync>,
}

struct Buffer<T> {
    values: Vec<T>,
    tick: Option<TimerHandle>,
}

impl<T: Send + 'static> Coalescer<T> {
    /// Creates a coalescer delivering batches to `sink` on an `interval`
    /// tick of `scheduler`.
    #[must_use]
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        interval: Duration,
        sink: impl Fn(Vec<T>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Buffer {
                values: Vec::new(),
                tick: None,
            })),
            scheduler,
            interval,
            sink: Arc::new(sink),
        }
    }

    /// Buffers a value, arming the tick if none is outstanding.
    pub fn push(&self, value: T) {
        let mut buffer = self.buffer.lock().expect("coalescer poisoned");
        buffer.values.push(value);
        if buffer.tick.is_some() {
            return;
        }

        let weak = Arc::downgrade(&self.buffer);
        let sink = Arc::clone(&self.sink);
        buffer.tick = Some(self.scheduler.schedule(
            self.interval,
            Box::new(move || {
                let Some(buffer) = weak.upgrade() else {
                    return;
                };
                let batch = {
                    let mut buffer = buffer.lock().expect("coalescer poisoned");
                    buffer.tick = None;
                    std::mem::take(&mut buffer.values)
                };
                if !batch.is_empty() {
                    sink(batch);
                }
            }),
        ));
    }

    /// Delivers the buffered batch immediately and disarms the pending tick.
    pub fn flush(&self) {
        let batch = {
            let mut buffer = self.buffer.lock().expect("coalescer poisoned");
            if let Some(tick) = buffer.tick.take() {
                tick.cancel();
            }
            std::mem::take(&mut buffer.values)
        };
        if !batch.is_empty() {
            (self.sink)(batch);
        }
    }

    /// Returns the number of values waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.lock().expect("coalescer poisoned").values.len()
    }
}

impl<T> Drop for Coalescer<T> {
    fn drop(&mut self) {
        if let Some(tick) = self
            .buffer
            .lock()
            .expect("coalescer poisoned")
            .tick
            .take()
        {
            tick.cancel();
        }
    }
}

impl<T> std::fmt::Debug for Coalescer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coalescer")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

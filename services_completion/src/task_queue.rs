//! Deferred session work
//!
//! Work requested while the buffer is being edited is queued and run on the
//! next tick. Tasks posted while a batch is running land in the queue for
//! the following tick; nothing is dropped and nothing re-enters.

use std::collections::VecDeque;

/// Work a parameter session defers to the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Copy parameter `param`'s text to its copies
    Propagate { param: usize },
}

/// Cooperative queue drained once per tick
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    pending: VecDeque<T>,
    running: bool,
    tick_count: u64,
}

impl<T: PartialEq> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            running: false,
            tick_count: 0,
        }
    }

    /// Queues `task` unless an equal task is already pending
    ///
    /// Returns whether the task was queued.
    pub fn post(&mut self, task: T) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        self.pending.push_back(task);
        true
    }

    /// Takes everything pending and marks the queue as running
    ///
    /// Returns `None` while a batch is already running.
    pub fn begin_batch(&mut self) -> Option<Vec<T>> {
        if self.running {
            return None;
        }
        self.running = true;
        self.tick_count += 1;
        Some(self.pending.drain(..).collect())
    }

    pub fn end_batch(&mut self) {
        self.running = false;
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of batches started so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl<T: PartialEq> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

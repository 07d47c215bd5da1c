#![forbid(unsafe_code)]

//! Single-threaded cooperative scheduler with a virtual clock.
//!
//! The pipeline never touches an ambient global scheduler: anything that
//! needs deferred execution receives a [`Scheduler`] handle explicitly. Time
//! is virtual and advances only through [`advance`](Scheduler::advance), so
//! a host can pump it from its own tick loop and tests control it exactly.
//!
//! # Invariants
//!
//! 1. Tasks run in due-time order; ties run in submission order (FIFO).
//! 2. `now()` observed from inside a task equals that task's due time.
//! 3. A task scheduled during `advance` still runs in the same call if its
//!    due time falls within the window.
//! 4. After `advance(delta)` returns, `now()` has moved by exactly `delta`.
//! 5. The clock never moves backward.
//!
//! # Failure Modes
//!
//! - **Task panics**: the clock and queue keep the state reached so far;
//!   later tasks in the window are not run.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration;

/// A queued task with its due time and submission order.
struct Entry {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want earliest-due first,
        // then lowest sequence number.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct SchedulerInner {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

/// Handle to a shared cooperative task queue.
///
/// Cloning shares the same queue and clock.
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("now", &inner.now)
            .field("pending", &inner.queue.len())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler with an empty queue and the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                next_seq: 0,
                queue: BinaryHeap::new(),
            })),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Queue a task due immediately.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        self.schedule_after(Duration::ZERO, task);
    }

    /// Queue a task due `delay` after the current virtual time.
    pub fn schedule_after(&self, delay: Duration, task: impl FnOnce() + 'static) {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(Entry {
            due,
            seq,
            task: Box::new(task),
        });
    }

    /// Run every task already due, without moving the clock.
    pub fn run_until_idle(&self) {
        self.advance(Duration::ZERO);
    }

    /// Move the clock forward by `delta`, running every task that falls due.
    ///
    /// Tasks run in due-then-FIFO order with `now()` set to their due time;
    /// tasks they schedule inside the window run in the same call.
    pub fn advance(&self, delta: Duration) {
        let target = self.inner.borrow().now + delta;
        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                if inner.queue.peek().is_some_and(|entry| entry.due <= target) {
                    let entry = inner
                        .queue
                        .pop()
                        .expect("peeked entry is still in the queue");
                    inner.now = inner.now.max(entry.due);
                    Some(entry.task)
                } else {
                    None
                }
            };
            // The borrow is released before the task runs, so tasks may
            // schedule freely.
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

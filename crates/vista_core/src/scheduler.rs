//! Cooperative frame and timer scheduler
//!
//! The presentation layer is single-threaded and event driven: work is
//! deferred either to the next animation frame or behind a fixed delay
//! that shadows a CSS transition duration. This scheduler makes both
//! queues explicit and puts them on a virtual clock the host pumps, so
//! transition sequencing is deterministic under test.
//!
//! There is deliberately no cancellation primitive; controllers abandon
//! stale deferred work by checking a generation counter when it fires.

use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send>;

new_key_type! {
    /// Identifier for a pending timer.
    pub struct TimerId;
}

struct TimerEntry {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct SchedulerInner {
    frame_tasks: VecDeque<Task>,
    timers: SlotMap<TimerId, TimerEntry>,
    now: Duration,
    seq: u64,
}

/// Clonable handle for queueing work from controllers and callbacks.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Queue `task` for the next frame.
    pub fn request_frame(&self, task: impl FnOnce() + Send + 'static) {
        self.inner
            .lock()
            .unwrap()
            .frame_tasks
            .push_back(Box::new(task));
    }

    /// Run `task` once `delay` has elapsed on the scheduler clock.
    pub fn after(&self, delay: Duration, task: impl FnOnce() + Send + 'static) -> TimerId {
        let mut inner = self.inner.lock().unwrap();
        let due = inner.now + delay;
        let seq = inner.seq;
        inner.seq += 1;
        inner.timers.insert(TimerEntry {
            due,
            seq,
            task: Box::new(task),
        })
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.lock().unwrap().now
    }
}

/// The scheduler pump, owned by the host.
pub struct FrameScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner::default())),
        }
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn now(&self) -> Duration {
        self.inner.lock().unwrap().now
    }

    /// Run one animation frame.
    ///
    /// Exactly the tasks queued before the call run; tasks they queue land
    /// in the following frame. This is what lets a controller hold a
    /// transition guard over a full frame boundary.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<Task> = {
            let mut inner = self.inner.lock().unwrap();
            inner.frame_tasks.drain(..).collect()
        };
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Advance the clock by `dt`, firing due timers in due-time order
    /// (ties resolve in creation order). A fired timer may schedule
    /// further timers; those fire too if they fall inside the window.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        let mut fired = 0;

        loop {
            let next = {
                let mut inner = self.inner.lock().unwrap();
                let key = inner
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(k, _)| k);
                match key {
                    Some(key) => {
                        let entry = inner.timers.remove(key).expect("timer key just observed");
                        inner.now = inner.now.max(entry.due);
                        Some(entry.task)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => {
                    task();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }

    /// Advance the clock, then pump frames (and any zero-delay timers they
    /// arm) until the queues settle.
    pub fn advance_and_run(&self, dt: Duration) {
        self.advance(dt);
        loop {
            let frames = self.run_frame();
            let timers = self.advance(Duration::ZERO);
            if frames == 0 && timers == 0 {
                break;
            }
        }
    }

    /// True when no frame tasks or timers are pending.
    pub fn is_idle(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.frame_tasks.is_empty() && inner.timers.is_empty()
    }

    pub fn pending_frame_tasks(&self) -> usize {
        self.inner.lock().unwrap().frame_tasks.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.lock().unwrap().timers.len()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

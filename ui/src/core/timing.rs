//! Timer and animation-frame scheduling.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserScheduler;

/// Deferred execution on the single UI thread.
///
/// Neither primitive hands out a cancellation token; tasks are expected to
/// guard against their targets having gone away.
pub trait Scheduler: Clone + 'static {
    /// Current high-resolution time in milliseconds.
    fn now(&self) -> f64;
    /// Runs `task` once after `delay_ms`.
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
    /// Runs `task` on the next display frame with the frame timestamp.
    fn next_frame(&self, task: Box<dyn FnOnce(f64)>);
}

pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

struct Timer {
    due: f64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

struct ManualState {
    now: f64,
    frame_interval: f64,
    next_seq: u64,
    timers: Vec<Timer>,
    frames: Vec<Box<dyn FnOnce(f64)>>,
}

/// Virtual-clock scheduler. Time only moves through [`ManualScheduler::advance`];
/// frames fire on a fixed grid of `frame_interval` milliseconds.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .field("frames", &state.frames.len())
            .finish()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

enum Due {
    Timer(usize),
    Frame(f64),
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(frame_interval: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now: 0.0,
                frame_interval: frame_interval.max(1.0),
                next_seq: 0,
                timers: Vec::new(),
                frames: Vec::new(),
            })),
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Moves the clock forward by `ms`, running every timer and frame that
    /// becomes due on the way, in time order (timers first on ties).
    pub fn advance(&self, ms: f64) {
        let target = self.state.borrow().now + ms.max(0.0);

        loop {
            let due = {
                let state = self.state.borrow();
                let next_timer = state
                    .timers
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
                    .map(|(idx, timer)| (idx, timer.due));
                let next_frame = (!state.frames.is_empty()).then(|| {
                    ((state.now / state.frame_interval).floor() + 1.0) * state.frame_interval
                });

                match (next_timer, next_frame) {
                    (Some((idx, at)), Some(frame_at)) if at <= frame_at => {
                        (at <= target).then_some(Due::Timer(idx))
                    }
                    (_, Some(frame_at)) => (frame_at <= target).then_some(Due::Frame(frame_at)),
                    (Some((idx, at)), None) => (at <= target).then_some(Due::Timer(idx)),
                    (None, None) => None,
                }
            };

            match due {
                Some(Due::Timer(idx)) => {
                    let timer = {
                        let mut state = self.state.borrow_mut();
                        let timer = state.timers.swap_remove(idx);
                        state.now = state.now.max(timer.due);
                        timer
                    };
                    (timer.task)();
                }
                Some(Due::Frame(at)) => {
                    let frames = {
                        let mut state = self.state.borrow_mut();
                        state.now = at;
                        std::mem::take(&mut state.frames)
                    };
                    for frame in frames {
                        frame(at);
                    }
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let due = state.now + f64::from(delay_ms);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.push(Timer { due, seq, task });
    }

    fn next_frame(&self, task: Box<dyn FnOnce(f64)>) {
        self.state.borrow_mut().frames.push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn timers_fire_in_due_order_with_stable_ties() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "c"), (100, "a"), (100, "b")] {
            let log = log.clone();
            scheduler.after(delay, Box::new(move || log.borrow_mut().push(label)));
        }

        scheduler.advance(99.0);
        assert!(log.borrow().is_empty());
        scheduler.advance(1.0);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        scheduler.advance(500.0);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn frames_requested_during_a_frame_run_on_the_next_one() {
        let scheduler = ManualScheduler::with_frame_interval(10.0);
        let stamps = Rc::new(RefCell::new(Vec::new()));

        fn tick(scheduler: ManualScheduler, stamps: Rc<RefCell<Vec<f64>>>, remaining: u32) {
            let next = scheduler.clone();
            scheduler.next_frame(Box::new(move |ts| {
                stamps.borrow_mut().push(ts);
                if remaining > 1 {
                    tick(next, stamps, remaining - 1);
                }
            }));
        }

        tick(scheduler.clone(), stamps.clone(), 3);
        scheduler.advance(100.0);
        assert_eq!(*stamps.borrow(), vec![10.0, 20.0, 30.0]);
        assert_eq!(scheduler.now(), 100.0);
    }
}

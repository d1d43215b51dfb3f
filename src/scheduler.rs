/**
 * Deferred actions: moving on to the next question a fixed time after an answer.
 *
 * The timer itself sits behind the `Timer` trait so that the event loop can run on the
 * system clock while tests step a `FakeClock` by hand.
 */
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::debug;


/// How long an answer stays on screen before the next question loads.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);


/// A source of monotonic time, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}


pub struct SystemClock {
    origin: Instant,
}


impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}


impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}


/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<Duration>>,
}


impl FakeClock {
    pub fn new() -> Self {
        FakeClock::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}


impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}


/// What to do when a deferred action comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Move past the answered question at this index.
    Advance { question: usize },
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);


/// A capability for running actions after a delay.
pub trait Timer {
    fn schedule(&mut self, delay: Duration, action: Deferred) -> TimerHandle;
    /// Drop a pending action. Cancelling an action that already fired or was already
    /// cancelled does nothing.
    fn cancel(&mut self, handle: TimerHandle);
    /// How long until the earliest pending action is due, if there is one.
    fn time_until_next(&self) -> Option<Duration>;
    /// Remove and return every pending action that is due, earliest first.
    fn fire_due(&mut self) -> Vec<(TimerHandle, Deferred)>;
}


/// A `Timer` that keeps its pending actions in a list and checks them against a clock
/// whenever it is polled.
pub struct TimerQueue<C: Clock> {
    clock: C,
    next_id: u64,
    pending: Vec<(Duration, TimerHandle, Deferred)>,
}


impl<C: Clock> TimerQueue<C> {
    pub fn new(clock: C) -> Self {
        TimerQueue { clock, next_id: 0, pending: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}


impl<C: Clock> Timer for TimerQueue<C> {
    fn schedule(&mut self, delay: Duration, action: Deferred) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((self.clock.now() + delay, handle, action));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(_, h, _)| *h != handle);
    }

    fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .iter()
            .map(|(deadline, _, _)| *deadline)
            .min()
            .map(|deadline| deadline.checked_sub(now).unwrap_or_default())
    }

    fn fire_due(&mut self) -> Vec<(TimerHandle, Deferred)> {
        let now = self.clock.now();
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(deadline, _, _)| *deadline <= now);
        self.pending = pending;
        due.sort_by_key(|(deadline, handle, _)| (*deadline, handle.0));
        due.into_iter().map(|(_, handle, action)| (handle, action)).collect()
    }
}


/// Arms the automatic advance after each answer. At most one advance is pending at a
/// time.
pub struct ProgressionScheduler<T: Timer> {
    timer: T,
    delay: Duration,
    pending: Option<(TimerHandle, usize)>,
}


impl<T: Timer> ProgressionScheduler<T> {
    pub fn new(timer: T, delay: Duration) -> Self {
        ProgressionScheduler { timer, delay, pending: None }
    }

    /// Schedule an advance past `question`, replacing any advance already pending.
    pub fn arm(&mut self, question: usize) {
        self.cancel();
        let handle = self.timer.schedule(self.delay, Deferred::Advance { question });
        debug!("scheduled advance past question {} in {:?}", question, self.delay);
        self.pending = Some((handle, question));
    }

    /// Cancel the pending advance, if any.
    pub fn cancel(&mut self) {
        if let Some((handle, question)) = self.pending.take() {
            self.timer.cancel(handle);
            debug!("cancelled advance past question {}", question);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.timer.time_until_next()
    }

    /// Return the question whose advance has come due, if the pending advance fired.
    /// Actions other than the pending one are stale and are dropped.
    pub fn poll(&mut self) -> Option<usize> {
        let mut fired = None;
        for (handle, action) in self.timer.fire_due() {
            let Deferred::Advance { question } = action;
            if self.pending.map(|(pending, _)| pending) == Some(handle) {
                self.pending = None;
                fired = Some(question);
            } else {
                debug!("dropping stale deferred action {:?}", action);
            }
        }
        fired
    }
}

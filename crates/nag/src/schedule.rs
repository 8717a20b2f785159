use crate::event::{Event, TimerSlot};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};
use std::time::Duration;

pub trait TimerHandle {
    fn cancel(self);
}

/// The host's timer facility. Fired timers hand their event back to whoever drives the
/// session; nothing here runs session code directly.
pub trait Scheduler {
    type Handle: TimerHandle;

    fn schedule_once(&mut self, after: Duration, event: Event) -> Self::Handle;
    fn schedule_repeating(&mut self, period: Duration, event: Event) -> Self::Handle;
    /// Milliseconds on whatever clock popup ids are derived from.
    fn now_millis(&self) -> u64;
}

/// Owns the handles of mount-time timers and cancels whatever is left when dropped.
pub struct TimerRegistry<H: TimerHandle> {
    handles: HashMap<TimerSlot, H>,
}

impl<H: TimerHandle> TimerRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Stores `handle` under `slot`, cancelling whatever was there before.
    pub fn insert(&mut self, slot: TimerSlot, handle: H) {
        if let Some(previous) = self.handles.insert(slot, handle) {
            previous.cancel();
        }
    }

    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        self.handles.remove(&slot).map(H::cancel).is_some()
    }

    /// Drops the handle of a timer that has already completed on its own.
    pub fn forget(&mut self, slot: TimerSlot) -> bool {
        self.handles.remove(&slot).is_some()
    }

    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        self.handles.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn release_all(&mut self) {
        for (slot, handle) in self.handles.drain() {
            log::debug!("Cancelling {} timer", slot);
            handle.cancel();
        }
    }
}

impl<H: TimerHandle> Default for TimerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TimerHandle> Drop for TimerRegistry<H> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[derive(Debug)]
struct Pending {
    id: u64,
    event: Event,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct Timeline {
    now: Duration,
    next_seq: u64,
    next_id: u64,
    // keyed by (deadline, scheduling order) so equal deadlines fire first-in first-out
    queue: BTreeMap<(Duration, u64), Pending>,
}

impl Timeline {
    fn push(&mut self, deadline: Duration, pending: Pending) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((deadline, seq), pending);
    }

    fn arm(&mut self, after: Duration, event: Event, period: Option<Duration>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now + after;
        self.push(deadline, Pending { id, event, period });
        id
    }

    fn remove(&mut self, id: u64) {
        self.queue.retain(|_, pending| pending.id != id);
    }

    fn pop_due(&mut self, until: Duration) -> Option<(Duration, Event)> {
        let key = *self.queue.keys().next()?;
        let (deadline, _) = key;
        if deadline > until {
            return None;
        }
        let pending = self.queue.remove(&key)?;
        self.now = deadline;

        let event = pending.event.clone();
        if let Some(period) = pending.period {
            self.push(deadline + period, pending);
        }
        Some((deadline, event))
    }
}

/// Deterministic stand-in for a real timer facility. Time only moves when the owner
/// calls [`VirtualClock::run_until`] or [`VirtualClock::advance`].
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    timeline: Rc<RefCell<Timeline>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.timeline.borrow().queue.len()
    }

    /// Fires every timer due up to `until`, in deadline order, then parks the clock at `until`.
    pub fn run_until(&self, until: Duration, mut fire: impl FnMut(Duration, Event)) {
        loop {
            // the borrow must end before `fire`, which usually schedules more timers
            let next = self.timeline.borrow_mut().pop_due(until);
            match next {
                Some((at, event)) => fire(at, event),
                None => break,
            }
        }
        let mut timeline = self.timeline.borrow_mut();
        timeline.now = timeline.now.max(until);
    }

    pub fn advance(&self, by: Duration, fire: impl FnMut(Duration, Event)) {
        let until = self.now() + by;
        self.run_until(until, fire);
    }
}

#[derive(Debug)]
pub struct VirtualTimer {
    id: u64,
    timeline: Weak<RefCell<Timeline>>,
}

impl TimerHandle for VirtualTimer {
    fn cancel(self) {
        if let Some(timeline) = self.timeline.upgrade() {
            timeline.borrow_mut().remove(self.id);
        }
    }
}

impl Scheduler for VirtualClock {
    type Handle = VirtualTimer;

    fn schedule_once(&mut self, after: Duration, event: Event) -> VirtualTimer {
        let id = self.timeline.borrow_mut().arm(after, event, None);
        VirtualTimer {
            id,
            timeline: Rc::downgrade(&self.timeline),
        }
    }

    fn schedule_repeating(&mut self, period: Duration, event: Event) -> VirtualTimer {
        let period = period.max(Duration::from_millis(1));
        let id = self.timeline.borrow_mut().arm(period, event, Some(period));
        VirtualTimer {
            id,
            timeline: Rc::downgrade(&self.timeline),
        }
    }

    fn now_millis(&self) -> u64 {
        self.now().as_millis() as u64
    }
}

//! Virtual-time timer queue for the page's single event loop.
//!
//! Components never hold raw callbacks, they hold [`TimerId`]s. The host feeds
//! elapsed time into the page, which pops due timers one at a time so a
//! handler can cancel or schedule timers before the next one fires.
use std::{collections::BTreeMap, collections::HashMap, time::Duration};

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOwner {
    Typing,
    Slideshow(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub owner: TimerOwner,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    owner: TimerOwner,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), Entry>,
    due_at: HashMap<TimerId, Duration>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since page load.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, after: Duration, owner: TimerOwner) -> TimerId {
        self.insert(after, owner, None)
    }

    /// Fires every `period`, first after one full period. The id stays valid until cancelled.
    pub fn schedule_every(&mut self, period: Duration, owner: TimerOwner) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(period, owner, Some(period))
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_at.remove(&id) {
            Some(due) => self.queue.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.due_at.contains_key(&id)
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first_key_value().map(|(&(due, _), _)| due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }

        let entry = self.queue.remove(&(due, id))?;
        self.due_at.remove(&id);
        self.now = self.now.max(due);

        // A period that saturates at the end of time would fire forever.
        if let Some(period) = entry.period {
            let next = due.saturating_add(period);
            if next > due {
                self.queue.insert((next, id), entry);
                self.due_at.insert(id, next);
            }
        }

        Some(Fired {
            id,
            owner: entry.owner,
        })
    }

    /// Moves the clock forward once every due timer up to `until` was handled.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, after: Duration, owner: TimerOwner, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(after);
        self.queue.insert((due, id), Entry { owner, period });
        self.due_at.insert(id, due);

        id
    }
}

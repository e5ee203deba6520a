use std::time::Duration;

use indexmap::IndexMap;

use super::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    Redraw,
    Countdown,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due: Duration,
    period: Option<Duration>,
    event: Event,
}

/// Pending timers, at most one per purpose.
///
/// Scheduling a purpose that is already pending replaces it.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: IndexMap<TimerPurpose, Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, purpose: TimerPurpose, delay: Duration, now: Duration, event: Event) {
        self.arm(
            purpose,
            Entry {
                due: now.saturating_add(delay),
                period: None,
                event,
            },
        );
    }

    pub fn schedule_every(
        &mut self,
        purpose: TimerPurpose,
        period: Duration,
        now: Duration,
        event: Event,
    ) {
        self.arm(
            purpose,
            Entry {
                due: now.saturating_add(period),
                period: Some(period),
                event,
            },
        );
    }

    // a replaced entry moves to the back so tie order follows scheduling order
    fn arm(&mut self, purpose: TimerPurpose, entry: Entry) {
        self.entries.shift_remove(&purpose);
        self.entries.insert(purpose, entry);
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        self.entries.shift_remove(&purpose).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, purpose: TimerPurpose) -> bool {
        self.entries.contains_key(&purpose)
    }

    pub fn due_at(&self, purpose: TimerPurpose) -> Option<Duration> {
        self.entries.get(&purpose).map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.values().map(|e| e.due).min()
    }

    /// Removes and returns the earliest entry due at `now`. Ties go to the
    /// entry whose latest (re)scheduling came first.
    /// Periodic entries are re-armed, never in the past.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerPurpose, Event)> {
        let mut best: Option<(usize, Duration)> = None;
        for (idx, entry) in self.entries.values().enumerate() {
            if entry.due > now {
                continue;
            }
            if best.map_or(true, |(_, due)| entry.due < due) {
                best = Some((idx, entry.due));
            }
        }
        let (idx, _) = best?;

        let (&purpose, entry) = self.entries.get_index_mut(idx)?;
        let event = entry.event;
        match entry.period {
            Some(period) => {
                let next = entry.due.saturating_add(period);
                entry.due = if next > now {
                    next
                } else {
                    now.saturating_add(period)
                };
            }
            None => {
                self.entries.shift_remove_index(idx);
            }
        }
        Some((purpose, event))
    }
}

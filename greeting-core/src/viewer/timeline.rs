use super::{Action, Timer, ViewState};
use std::time::Duration;

/// Deterministic clock for driving a [`ViewState`] without sleeping.
///
/// Timers returned by transitions are queued at `now + delay` and only fire
/// when [`ManualTimeline::advance`] moves the clock past them. Timers due at
/// the same instant fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct ManualTimeline {
    state: ViewState,
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    seq: u64,
    timer: Timer,
}

impl ManualTimeline {
    pub fn start(photo_count: usize) -> Self {
        let (state, timers) = ViewState::start(photo_count);
        let mut timeline = Self {
            state,
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        };
        timeline.schedule(timers);
        timeline
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Applies a user action at the current instant
    pub fn dispatch(&mut self, action: Action) {
        let (state, timers) = self.state.clone().apply(action);
        self.state = state;
        self.schedule(timers);
    }

    /// Moves the clock forward, firing every timer that falls due on the way
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;

        while let Some(pos) = self.next_due(target) {
            let scheduled = self.pending.remove(pos);
            self.now = scheduled.due;
            let (state, timers) = self.state.clone().fire(scheduled.timer);
            self.state = state;
            self.schedule(timers);
        }

        self.now = target;
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= target)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(pos, _)| pos)
    }

    fn schedule(&mut self, timers: Vec<Timer>) {
        for timer in timers {
            self.pending.push(Scheduled {
                due: self.now + timer.delay,
                seq: self.next_seq,
                timer,
            });
            self.next_seq += 1;
        }
    }
}

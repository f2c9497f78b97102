//! Viewing stage machine.
//!
//! The slideshow is a straight path of stages with a single loop back from
//! the final gift to the countdown:
//!
//! ```text
//! Countdown -> Cake -> Balloons -> MessageReveal -> PhotoCarousel -> MessageCard -> FinalGift
//!     ^                                                                               |
//!     +--------------------------------- Restart ------------------------------------+
//! ```
//!
//! [`ViewState::apply`] is a pure transition. Delayed follow-ups (countdown
//! ticks, sparkle fade, the pause after the last balloon) come back as
//! [`Timer`] values which the caller sleeps on and hands to
//! [`ViewState::fire`]. Each timer carries the epoch it was created in and a
//! restart bumps the epoch, so timers left over from a previous run are dropped.

mod decorations;
mod timeline;

use std::time::Duration;

pub use decorations::{Decoration, DecorationKind, DECORATIONS, PHRASE, WORD_STAGGER_MS};
pub use timeline::ManualTimeline;

pub const COUNTDOWN_FROM: u8 = 3;
pub const BALLOON_COUNT: usize = 4;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const SPARKLE_PULSE: Duration = Duration::from_millis(500);
pub const BALLOONS_FINISH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Seconds left before the intro panel
    Ticking(u8),
    /// Welcome panel waiting for "start"
    Intro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CakeStep {
    Decorate,
    CandleReady,
    Lit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cake {
    pub step: CakeStep,
    pub decorated: bool,
}

impl Cake {
    fn new() -> Self {
        Self {
            step: CakeStep::Decorate,
            decorated: false,
        }
    }

    /// Decorations currently placed around the cake
    pub fn decorations(&self) -> &'static [Decoration] {
        if self.decorated {
            &DECORATIONS
        } else {
            &[]
        }
    }

    pub fn is_lit(&self) -> bool {
        self.step == CakeStep::Lit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balloons {
    popped: [bool; BALLOON_COUNT],
}

impl Balloons {
    pub fn is_popped(&self, index: usize) -> bool {
        self.popped.get(index).copied().unwrap_or(false)
    }

    pub fn all_popped(&self) -> bool {
        self.popped.iter().all(|p| *p)
    }

    /// Phrase words uncovered so far, in phrase order
    pub fn revealed_words(&self) -> [Option<&'static str>; BALLOON_COUNT] {
        let mut words = [None; BALLOON_COUNT];
        for (i, word) in words.iter_mut().enumerate() {
            if self.popped[i] {
                *word = Some(PHRASE[i]);
            }
        }
        words
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Countdown(Countdown),
    Cake(Cake),
    Balloons(Balloons),
    MessageReveal,
    PhotoCarousel { index: usize },
    MessageCard,
    FinalGift,
}

impl Stage {
    /// Position in the forward order, starting at 0
    pub fn position(&self) -> u8 {
        match self {
            Stage::Countdown(_) => 0,
            Stage::Cake(_) => 1,
            Stage::Balloons(_) => 2,
            Stage::MessageReveal => 3,
            Stage::PhotoCarousel { .. } => 4,
            Stage::MessageCard => 5,
            Stage::FinalGift => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Countdown(_) => "countdown",
            Stage::Cake(_) => "cake",
            Stage::Balloons(_) => "balloons",
            Stage::MessageReveal => "message-reveal",
            Stage::PhotoCarousel { .. } => "photo-carousel",
            Stage::MessageCard => "message-card",
            Stage::FinalGift => "final-gift",
        }
    }
}

/// Full-screen overlays that outlive a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    pub confetti: bool,
    pub sparkles: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Countdown second elapsed (timer)
    Tick,
    Start,
    Decorate,
    ReadyCandle,
    LightCandle,
    GoToBalloons,
    Pop(usize),
    /// Sparkle pulse finished (timer)
    ClearSparkles,
    /// Pause after the last balloon finished (timer)
    FinishBalloons,
    ShowPhotos,
    NextPhoto,
    PreviousPhoto,
    OpenMessage,
    OpenGift,
    Restart,
}

/// A delayed action requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub delay: Duration,
    pub action: Action,
    pub epoch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    stage: Stage,
    effects: Effects,
    photo_count: usize,
    epoch: u32,
}

impl ViewState {
    /// Fresh state at the top of the countdown plus the first tick
    pub fn start(photo_count: usize) -> (Self, Vec<Timer>) {
        Self::begin(photo_count, 0)
    }

    fn begin(photo_count: usize, epoch: u32) -> (Self, Vec<Timer>) {
        let state = Self {
            stage: Stage::Countdown(Countdown::Ticking(COUNTDOWN_FROM)),
            effects: Effects::default(),
            photo_count,
            epoch,
        };
        let tick = state.timer(TICK_INTERVAL, Action::Tick);
        (state, vec![tick])
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn effects(&self) -> Effects {
        self.effects
    }

    pub fn photo_count(&self) -> usize {
        self.photo_count
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Carousel position, if the carousel is showing
    pub fn photo_index(&self) -> Option<usize> {
        match self.stage {
            Stage::PhotoCarousel { index } => Some(index),
            _ => None,
        }
    }

    /// Photo under the carousel cursor; `None` outside the carousel or when
    /// `photos` is shorter than expected
    pub fn current_photo<'a>(&self, photos: &'a [String]) -> Option<&'a str> {
        self.photo_index()
            .and_then(|i| photos.get(i))
            .map(String::as_str)
    }

    fn timer(&self, delay: Duration, action: Action) -> Timer {
        Timer {
            delay,
            action,
            epoch: self.epoch,
        }
    }

    /// Delivers an elapsed timer. Timers from an earlier epoch are ignored.
    pub fn fire(self, timer: Timer) -> (Self, Vec<Timer>) {
        if timer.epoch != self.epoch {
            log::debug!(
                "Dropping stale {:?} timer (epoch {} != {})",
                timer.action,
                timer.epoch,
                self.epoch
            );
            return (self, Vec::new());
        }
        self.apply(timer.action)
    }

    /// Pure transition. Actions that do not fit the current stage leave the
    /// state untouched and schedule nothing.
    pub fn apply(mut self, action: Action) -> (Self, Vec<Timer>) {
        let mut timers = Vec::new();

        match (self.stage, action) {
            (Stage::Countdown(Countdown::Ticking(left)), Action::Tick) => {
                let left = left.saturating_sub(1);
                if left == 0 {
                    self.stage = Stage::Countdown(Countdown::Intro);
                } else {
                    self.stage = Stage::Countdown(Countdown::Ticking(left));
                    timers.push(self.timer(TICK_INTERVAL, Action::Tick));
                }
            }
            (Stage::Countdown(Countdown::Intro), Action::Start) => {
                self.stage = Stage::Cake(Cake::new());
            }

            (Stage::Cake(mut cake), Action::Decorate) if !cake.decorated => {
                cake.decorated = true;
                self.stage = Stage::Cake(cake);
            }
            (Stage::Cake(mut cake), Action::ReadyCandle)
                if cake.step == CakeStep::Decorate && cake.decorated =>
            {
                cake.step = CakeStep::CandleReady;
                self.stage = Stage::Cake(cake);
            }
            (Stage::Cake(mut cake), Action::LightCandle) if cake.step == CakeStep::CandleReady => {
                cake.step = CakeStep::Lit;
                self.stage = Stage::Cake(cake);
                self.effects.confetti = true;
                self.effects.sparkles = true;
            }
            (Stage::Cake(cake), Action::GoToBalloons) if cake.is_lit() => {
                self.effects = Effects::default();
                self.stage = Stage::Balloons(Balloons::default());
            }

            (Stage::Balloons(mut balloons), Action::Pop(i))
                if i < BALLOON_COUNT && !balloons.popped[i] =>
            {
                balloons.popped[i] = true;
                self.stage = Stage::Balloons(balloons);
                self.effects.sparkles = true;
                timers.push(self.timer(SPARKLE_PULSE, Action::ClearSparkles));
                if balloons.all_popped() {
                    timers.push(self.timer(BALLOONS_FINISH_DELAY, Action::FinishBalloons));
                }
            }
            (_, Action::ClearSparkles) => {
                self.effects.sparkles = false;
            }
            (Stage::Balloons(balloons), Action::FinishBalloons) if balloons.all_popped() => {
                self.effects.confetti = true;
                self.stage = Stage::MessageReveal;
            }

            (Stage::MessageReveal, Action::ShowPhotos) => {
                self.stage = Stage::PhotoCarousel { index: 0 };
            }
            (Stage::PhotoCarousel { index }, Action::NextPhoto) if index + 1 < self.photo_count => {
                self.stage = Stage::PhotoCarousel { index: index + 1 };
            }
            (Stage::PhotoCarousel { index }, Action::PreviousPhoto) if index > 0 => {
                self.stage = Stage::PhotoCarousel { index: index - 1 };
            }
            (Stage::PhotoCarousel { .. }, Action::OpenMessage) => {
                self.stage = Stage::MessageCard;
            }
            (Stage::MessageCard, Action::OpenGift) => {
                self.stage = Stage::FinalGift;
            }
            (Stage::FinalGift, Action::Restart) => {
                log::debug!("Restarting greeting (epoch {})", self.epoch + 1);
                return Self::begin(self.photo_count, self.epoch.wrapping_add(1));
            }

            (stage, action) => {
                log::trace!("Ignoring {:?} in stage {}", action, stage.name());
            }
        }

        (self, timers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(state: ViewState, actions: &[Action]) -> ViewState {
        actions
            .iter()
            .fold(state, |state, action| state.apply(*action).0)
    }

    fn at_intro(photo_count: usize) -> ViewState {
        let (state, _) = ViewState::start(photo_count);
        run(state, &[Action::Tick, Action::Tick, Action::Tick])
    }

    fn at_balloons() -> ViewState {
        run(
            at_intro(3),
            &[
                Action::Start,
                Action::Decorate,
                Action::ReadyCandle,
                Action::LightCandle,
                Action::GoToBalloons,
            ],
        )
    }

    fn at_carousel(photo_count: usize) -> ViewState {
        let state = run(
            at_intro(photo_count),
            &[
                Action::Start,
                Action::Decorate,
                Action::ReadyCandle,
                Action::LightCandle,
                Action::GoToBalloons,
                Action::Pop(0),
                Action::Pop(1),
                Action::Pop(2),
                Action::Pop(3),
                Action::FinishBalloons,
            ],
        );
        run(state, &[Action::ShowPhotos])
    }

    #[test]
    fn test_start_schedules_first_tick() {
        let (state, timers) = ViewState::start(3);
        assert_eq!(*state.stage(), Stage::Countdown(Countdown::Ticking(3)));
        assert_eq!(
            timers,
            vec![Timer {
                delay: TICK_INTERVAL,
                action: Action::Tick,
                epoch: 0
            }]
        );
        assert_eq!(state.effects(), Effects::default());
    }

    #[test]
    fn test_countdown_reaches_intro_on_third_tick() {
        let (state, _) = ViewState::start(3);
        let (state, timers) = state.apply(Action::Tick);
        assert_eq!(*state.stage(), Stage::Countdown(Countdown::Ticking(2)));
        assert_eq!(timers.len(), 1);

        let (state, _) = state.apply(Action::Tick);
        let (state, timers) = state.apply(Action::Tick);
        assert_eq!(*state.stage(), Stage::Countdown(Countdown::Intro));
        assert!(timers.is_empty());

        // Start is only accepted once the intro is up
        let (early, _) = ViewState::start(3);
        assert_eq!(early.clone().apply(Action::Start).0, early);
    }

    #[test]
    fn test_decorating_is_idempotent() {
        let state = run(at_intro(3), &[Action::Start]);
        let decorated = run(state, &[Action::Decorate]);
        match decorated.stage() {
            Stage::Cake(cake) => assert_eq!(cake.decorations().len(), 5),
            other => panic!("unexpected stage {other:?}"),
        }
        assert_eq!(decorated.clone().apply(Action::Decorate).0, decorated);
    }

    #[test]
    fn test_candle_needs_decorations() {
        let state = run(at_intro(3), &[Action::Start]);
        let (same, _) = state.clone().apply(Action::ReadyCandle);
        assert_eq!(same, state);

        let state = run(state, &[Action::Decorate, Action::ReadyCandle]);
        assert_eq!(
            *state.stage(),
            Stage::Cake(Cake {
                step: CakeStep::CandleReady,
                decorated: true
            })
        );
    }

    #[test]
    fn test_lighting_candle_turns_on_effects_and_leaving_clears_them() {
        let lit = run(
            at_intro(3),
            &[Action::Start, Action::Decorate, Action::ReadyCandle, Action::LightCandle],
        );
        assert_eq!(
            lit.effects(),
            Effects {
                confetti: true,
                sparkles: true
            }
        );

        let balloons = run(lit, &[Action::GoToBalloons]);
        assert_eq!(*balloons.stage(), Stage::Balloons(Balloons::default()));
        assert_eq!(balloons.effects(), Effects::default());
    }

    #[test]
    fn test_popping_reveals_matching_word_only() {
        for i in 0..BALLOON_COUNT {
            let (state, timers) = at_balloons().apply(Action::Pop(i));
            let Stage::Balloons(balloons) = *state.stage() else {
                panic!("left balloon stage");
            };
            let words = balloons.revealed_words();
            for (j, word) in words.iter().enumerate() {
                if i == j {
                    assert_eq!(*word, Some(PHRASE[i]));
                } else {
                    assert_eq!(*word, None);
                }
            }
            assert!(state.effects().sparkles);
            assert_eq!(
                timers.iter().map(|t| t.action).collect::<Vec<_>>(),
                vec![Action::ClearSparkles]
            );
        }
    }

    #[test]
    fn test_popping_twice_has_no_effect() {
        let (once, _) = at_balloons().apply(Action::Pop(2));
        let (twice, timers) = once.clone().apply(Action::Pop(2));
        assert_eq!(twice, once);
        assert!(timers.is_empty());

        let (out_of_range, timers) = at_balloons().apply(Action::Pop(4));
        assert_eq!(out_of_range, at_balloons());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_last_pop_schedules_finish_once() {
        let state = run(at_balloons(), &[Action::Pop(0), Action::Pop(1), Action::Pop(2)]);
        let (state, timers) = state.apply(Action::Pop(3));
        assert_eq!(
            timers,
            vec![
                Timer {
                    delay: SPARKLE_PULSE,
                    action: Action::ClearSparkles,
                    epoch: 0
                },
                Timer {
                    delay: BALLOONS_FINISH_DELAY,
                    action: Action::FinishBalloons,
                    epoch: 0
                },
            ]
        );

        for i in 0..BALLOON_COUNT {
            assert!(state.clone().apply(Action::Pop(i)).1.is_empty());
        }

        let (revealed, _) = state.apply(Action::FinishBalloons);
        assert_eq!(*revealed.stage(), Stage::MessageReveal);
        assert!(revealed.effects().confetti);
        assert_eq!(revealed.clone().apply(Action::FinishBalloons).0, revealed);
    }

    #[test]
    fn test_finish_ignored_until_all_popped() {
        let state = run(at_balloons(), &[Action::Pop(0)]);
        assert_eq!(state.clone().apply(Action::FinishBalloons).0, state);
    }

    #[test]
    fn test_carousel_is_bounded_without_wraparound() {
        let state = at_carousel(3);
        assert_eq!(state.photo_index(), Some(0));
        assert_eq!(state.clone().apply(Action::PreviousPhoto).0, state);

        let state = run(state, &[Action::NextPhoto, Action::NextPhoto]);
        assert_eq!(state.photo_index(), Some(2));
        assert_eq!(state.clone().apply(Action::NextPhoto).0, state);

        let state = run(state, &[Action::PreviousPhoto]);
        assert_eq!(state.photo_index(), Some(1));
    }

    #[test]
    fn test_carousel_tolerates_missing_photos() {
        let state = at_carousel(0);
        assert_eq!(state.photo_index(), Some(0));
        assert_eq!(state.clone().apply(Action::NextPhoto).0, state);
        assert_eq!(state.current_photo(&[]), None);

        let photos = vec!["/uploads/a.jpg".to_string()];
        let state = at_carousel(5);
        let state = run(state, &[Action::NextPhoto]);
        assert_eq!(state.current_photo(&photos), None);
    }

    #[test]
    fn test_forward_path_to_final_gift() {
        let state = run(at_carousel(3), &[Action::OpenMessage]);
        assert_eq!(*state.stage(), Stage::MessageCard);
        let state = run(state, &[Action::OpenGift]);
        assert_eq!(*state.stage(), Stage::FinalGift);
        assert_eq!(state.stage().position(), 6);
    }

    #[test]
    fn test_restart_resets_everything() {
        let state = run(at_carousel(3), &[Action::NextPhoto, Action::OpenMessage, Action::OpenGift]);
        assert!(state.effects().confetti);

        let (restarted, timers) = state.apply(Action::Restart);
        let (fresh, fresh_timers) = ViewState::start(3);

        assert_eq!(*restarted.stage(), *fresh.stage());
        assert_eq!(restarted.effects(), Effects::default());
        assert_eq!(restarted.photo_count(), 3);
        assert_eq!(restarted.epoch(), 1);
        assert_eq!(timers.len(), fresh_timers.len());
        assert_eq!(timers[0].epoch, 1);
    }

    #[test]
    fn test_restart_only_from_final_gift() {
        let state = at_balloons();
        assert_eq!(state.clone().apply(Action::Restart).0, state);
    }

    #[test]
    fn test_stale_timer_is_dropped_after_restart() {
        let (state, first) = ViewState::start(2);
        let gift = run(
            run(state, &[Action::Tick, Action::Tick, Action::Tick]),
            &[
                Action::Start,
                Action::Decorate,
                Action::ReadyCandle,
                Action::LightCandle,
                Action::GoToBalloons,
                Action::Pop(0),
                Action::Pop(1),
                Action::Pop(2),
                Action::Pop(3),
                Action::FinishBalloons,
                Action::ShowPhotos,
                Action::OpenMessage,
                Action::OpenGift,
            ],
        );
        let (restarted, _) = gift.apply(Action::Restart);
        let (after, timers) = restarted.clone().fire(first[0]);
        assert_eq!(after, restarted);
        assert!(timers.is_empty());
    }
}

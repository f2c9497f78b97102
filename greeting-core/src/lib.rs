//! # Greeting Core
//!
//! Shared logic for birthday greeting pages, used by both the HTTP server and
//! the Dioxus client.
//!
//! This crate provides:
//! - The `Greeting` data contract exchanged over the API
//! - Validation rules for recipient fields and uploaded photos
//! - The creation draft model behind the greeting form
//! - The viewing stage machine that drives the animated slideshow
//!
//! ## Separation of Concerns
//!
//! Nothing in here performs IO. The stage machine returns timers as data and
//! leaves it to the caller to sleep and feed them back, so it can be driven
//! by a real UI or by [`ManualTimeline`] in tests.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use greeting_core::{Action, ViewState};
//!
//! let (state, timers) = ViewState::start(greeting.photos.len());
//! // sleep for each timer.delay, then:
//! let (state, more) = state.fire(timers[0]);
//! let (state, _) = state.apply(Action::Start);
//! ```

pub mod draft;
pub mod models;
pub mod share;
pub mod validation;
pub mod viewer;

pub use draft::{DraftError, DraftPhoto, GreetingDraft, Submission};
pub use models::{ApiErrorBody, FieldError, Greeting, NewGreeting};
pub use share::{share_link, wish_id_from_path};
pub use validation::ValidationError;
pub use viewer::{
    Action, Balloons, Cake, CakeStep, Countdown, Decoration, DecorationKind, Effects,
    ManualTimeline, Stage, Timer, ViewState, DECORATIONS, PHRASE,
};

use crate::services::{timer, GreetingApi};
use dioxus::prelude::*;
use dioxus_i18n::t;
use greeting_core::{Action, Greeting, Stage, Timer, ViewState};

use super::effects::{Bunting, EffectsOverlay};
use super::stages::{
    BalloonsStage, CakeStage, CountdownStage, FinalGiftStage, MessageCardStage,
    MessageRevealStage, PhotoCarouselStage,
};

#[component]
pub fn ViewGreetingScreen(id: String) -> Element {
    let greeting = use_resource(use_reactive!(|(id,)| async move {
        let result = GreetingApi::default().fetch(&id).await;
        if let Err(e) = &result {
            log::warn!("Could not show greeting {}: {}", id, e);
        }
        result
    }));

    match &*greeting.read_unchecked() {
        None => rsx! {
            div { class: "page page-party",
                div { class: "stage-subheading", {t!("view-loading")} }
            }
        },
        Some(Err(_)) => rsx! {
            div { class: "page page-party",
                div { class: "stage-subheading", {t!("view-not-found")} }
            }
        },
        Some(Ok(greeting)) => rsx! {
            BirthdayShow { key: "{greeting.id}", greeting: greeting.clone() }
        },
    }
}

/// Runs each timer on the page scope and feeds it back when it fires.
/// Tasks die with the scope, and timers from before a restart are
/// discarded by the state itself.
fn schedule(mut view: Signal<ViewState>, timers: Vec<Timer>) {
    for timer in timers {
        spawn(async move {
            timer::sleep(timer.delay).await;
            let (next, more) = view.peek().clone().fire(timer);
            view.set(next);
            schedule(view, more);
        });
    }
}

#[component]
fn BirthdayShow(greeting: Greeting) -> Element {
    let api = use_hook(GreetingApi::default);
    let photo_count = greeting.photos.len();

    let mut view = use_hook(move || {
        let (state, timers) = ViewState::start(photo_count);
        let view = Signal::new(state);
        schedule(view, timers);
        view
    });

    let mut dispatch = move |action: Action| {
        let (next, timers) = view.peek().clone().apply(action);
        view.set(next);
        schedule(view, timers);
    };

    let state = view.read().clone();
    let photo = state
        .current_photo(&greeting.photos)
        .map(|reference| api.photo_url(reference));
    let stage_class = format!("page page-party stage-{}", state.stage().name());

    rsx! {
        div { class: "{stage_class}",
            Bunting {}
            EffectsOverlay { effects: state.effects() }

            div { class: "stage",
                match *state.stage() {
                    Stage::Countdown(countdown) => rsx! {
                        CountdownStage {
                            countdown,
                            age: greeting.recipient_age,
                            on_action: move |a| dispatch(a),
                        }
                    },
                    Stage::Cake(cake) => rsx! {
                        CakeStage { cake, on_action: move |a| dispatch(a) }
                    },
                    Stage::Balloons(balloons) => rsx! {
                        BalloonsStage { balloons, on_action: move |a| dispatch(a) }
                    },
                    Stage::MessageReveal => rsx! {
                        MessageRevealStage { on_action: move |a| dispatch(a) }
                    },
                    Stage::PhotoCarousel { index } => rsx! {
                        PhotoCarouselStage {
                            photo,
                            index,
                            count: state.photo_count(),
                            on_action: move |a| dispatch(a),
                        }
                    },
                    Stage::MessageCard => rsx! {
                        MessageCardStage { on_action: move |a| dispatch(a) }
                    },
                    Stage::FinalGift => rsx! {
                        FinalGiftStage {
                            name: greeting.recipient_name.clone(),
                            on_action: move |a| dispatch(a),
                        }
                    },
                }
            }
        }
    }
}

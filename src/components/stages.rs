//! One component per viewing stage. Each renders its stage and reports user
//! input as [`Action`]s; the stage machine decides what happens next.

use dioxus::prelude::*;
use dioxus_i18n::t;
use greeting_core::viewer::{BALLOON_COUNT, WORD_STAGGER_MS};
use greeting_core::{Action, Balloons, Cake, CakeStep, Countdown, Decoration, PHRASE};

const CAKE_UNLIT: &str = "/cake-unlit.png";
const CAKE_LIT: &str = "/cake-lit.png";

#[component]
pub fn CountdownStage(countdown: Countdown, age: u8, on_action: EventHandler<Action>) -> Element {
    match countdown {
        Countdown::Ticking(left) => rsx! {
            div { class: "countdown bounce", "{left}" }
        },
        Countdown::Intro => rsx! {
            div { class: "fade-in",
                div { class: "bounce-slow", style: "font-size: 96px; margin-bottom: 16px;", "🐻" }
                h1 { class: "stage-heading", {t!("intro-born")} }
                h2 { class: "stage-subheading", {t!("intro-years", age: age)} }
                p { class: "stage-text", {t!("intro-teaser")} }
                button {
                    class: "btn-party",
                    onclick: move |_| on_action.call(Action::Start),
                    "🎁 " {t!("intro-start")}
                }
            }
        },
    }
}

#[component]
fn DecorationImage(decoration: Decoration) -> Element {
    rsx! {
        img {
            class: decoration.css_class(),
            src: decoration.src,
            alt: "",
            aria_hidden: "true",
            style: "animation-delay: {decoration.delay_ms}ms;",
        }
    }
}

#[component]
pub fn CakeStage(cake: Cake, on_action: EventHandler<Action>) -> Element {
    let cake_src = if cake.is_lit() { CAKE_LIT } else { CAKE_UNLIT };
    let decorations = cake.decorations();

    rsx! {
        div { class: "fade-in cake-stage",
            for decoration in decorations.iter().filter(|d| d.is_ribbon()) {
                DecorationImage { key: "{decoration.delay_ms}", decoration: *decoration }
            }

            div {
                class: "cake-image",
                role: "img",
                aria_label: "Birthday Cake",
                style: "background-image: url({cake_src});",
                for decoration in decorations.iter().filter(|d| !d.is_ribbon()) {
                    DecorationImage { key: "{decoration.delay_ms}", decoration: *decoration }
                }
            }

            if cake.is_lit() {
                h2 { class: "stage-heading pulse", {t!("cake-greeting")} }
            }

            div { class: "stage-actions",
                match cake.step {
                    CakeStep::Decorate => rsx! {
                        button {
                            class: "btn-party",
                            disabled: cake.decorated,
                            onclick: move |_| on_action.call(Action::Decorate),
                            if cake.decorated {
                                {t!("cake-decorated")}
                            } else {
                                {t!("cake-decorate")}
                            }
                        }
                        if cake.decorated {
                            button {
                                class: "btn-party",
                                onclick: move |_| on_action.call(Action::ReadyCandle),
                                {t!("cake-next")}
                            }
                        }
                    },
                    CakeStep::CandleReady => rsx! {
                        button {
                            class: "btn-party",
                            onclick: move |_| on_action.call(Action::LightCandle),
                            {t!("cake-light")}
                        }
                    },
                    CakeStep::Lit => rsx! {
                        button {
                            class: "btn-party",
                            onclick: move |_| on_action.call(Action::GoToBalloons),
                            {t!("cake-to-balloons")}
                        }
                    },
                }
            }
        }
    }
}

#[component]
pub fn BalloonsStage(balloons: Balloons, on_action: EventHandler<Action>) -> Element {
    let revealed = balloons.revealed_words();

    rsx! {
        div { class: "fade-in",
            h2 { class: "stage-subheading", {t!("balloons-title")} }
            div { class: "balloons",
                for i in 0..BALLOON_COUNT {
                    button {
                        key: "{i}",
                        class: if balloons.is_popped(i) { "balloon popped" } else { "balloon float" },
                        style: format!("animation-delay: {}ms; filter: hue-rotate({}deg);", i * 200, i * 90),
                        disabled: balloons.is_popped(i),
                        onclick: move |_| on_action.call(Action::Pop(i)),
                        "🎈"
                    }
                }
            }
            div { class: "phrase",
                for (i, word) in revealed.iter().enumerate().filter_map(|(i, w)| w.map(|w| (i, w))) {
                    span {
                        key: "{i}",
                        class: if i + 1 == BALLOON_COUNT { "scale-in accent" } else { "scale-in" },
                        "{word}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn MessageRevealStage(on_action: EventHandler<Action>) -> Element {
    rsx! {
        div { class: "fade-in",
            div { class: "phrase phrase-large",
                for (i, word) in PHRASE.iter().enumerate() {
                    span {
                        key: "{i}",
                        class: if i + 1 == PHRASE.len() { "bounce accent" } else { "bounce" },
                        style: format!("animation-delay: {}ms;", i as u32 * WORD_STAGGER_MS),
                        "{word}"
                    }
                }
            }
            button {
                class: "btn-party",
                onclick: move |_| on_action.call(Action::ShowPhotos),
                {t!("next")}
            }
        }
    }
}

/// Bounded carousel: the arrows stop at the first and last photo
#[component]
pub fn PhotoCarouselStage(
    /// Absolute URL of the photo under the cursor
    photo: Option<String>,
    index: usize,
    count: usize,
    on_action: EventHandler<Action>,
) -> Element {
    let number = index + 1;

    rsx! {
        div { class: "fade-in carousel",
            h2 { class: "stage-subheading", {t!("carousel-title")} }
            div { class: "carousel-frame",
                if let Some(src) = photo {
                    img { key: "{index}", class: "carousel-photo fade-in", src: "{src}", alt: "Memory {number}" }
                }
                div { class: "carousel-controls",
                    button {
                        class: "carousel-arrow",
                        disabled: index == 0,
                        onclick: move |_| on_action.call(Action::PreviousPhoto),
                        "←"
                    }
                    button {
                        class: "carousel-arrow",
                        disabled: number >= count,
                        onclick: move |_| on_action.call(Action::NextPhoto),
                        "→"
                    }
                }
            }
            div { class: "carousel-dots",
                for i in 0..count {
                    div { key: "{i}", class: if i == index { "dot active" } else { "dot" } }
                }
            }
            button {
                class: "btn-party",
                onclick: move |_| on_action.call(Action::OpenMessage),
                {t!("carousel-open-message")}
            }
        }
    }
}

#[component]
pub fn MessageCardStage(on_action: EventHandler<Action>) -> Element {
    rsx! {
        div { class: "fade-in",
            h2 { class: "stage-subheading", {t!("message-title")} }
            div { class: "message-card",
                div { style: "font-size: 64px; margin-bottom: 16px;", "🎈🎈🎈" }
                div { class: "message-card-inner",
                    h3 { style: "font-size: 30px;", {t!("message-happy")} }
                    h3 { style: "font-size: 38px;", {t!("message-birthday")} }
                    h3 { style: "font-size: 24px; font-style: italic;", {t!("message-to-you")} }
                }
            }
            button {
                class: "btn-party",
                onclick: move |_| on_action.call(Action::OpenGift),
                {t!("next")}
            }
        }
    }
}

#[component]
pub fn FinalGiftStage(name: String, on_action: EventHandler<Action>) -> Element {
    rsx! {
        div { class: "fade-in",
            h2 { class: "stage-heading", style: "font-style: italic;", {t!("gift-title")} }
            div { class: "bounce-slow", style: "font-size: 128px; margin-bottom: 32px;", "🎁" }
            p { class: "stage-text", {t!("gift-wish", name: name.clone())} }
            button {
                class: "btn-party",
                onclick: move |_| on_action.call(Action::Restart),
                {t!("gift-restart")}
            }
        }
    }
}

use dioxus::prelude::*;
use greeting_core::Effects;

const PARTY_COLORS: [&str; 5] = ["#FF1493", "#00CED1", "#FFD700", "#FF6347", "#9370DB"];
const CONFETTI_PIECES: usize = 50;
const SPARKLE_COUNT: usize = 20;

/// Spreads `i` over `0..modulus` without clustering neighbours
fn scatter(i: usize, step: usize, modulus: usize) -> usize {
    (i * step + 7) % modulus
}

/// Pennant garland along the top edge
#[component]
pub fn Bunting() -> Element {
    rsx! {
        div { class: "bunting",
            svg { width: "100%", height: "100%", view_box: "0 0 1000 60", preserve_aspect_ratio: "none",
                for i in 0..10usize {
                    polygon {
                        key: "{i}",
                        points: pennant(i),
                        fill: PARTY_COLORS[i % PARTY_COLORS.len()],
                    }
                }
            }
        }
    }
}

fn pennant(i: usize) -> String {
    let x = i * 100;
    format!(
        "{},0 {},0 {},40 {},0 {},0 {},20 {},40 {},60 {},40 {},20",
        x,
        x + 40,
        x + 50,
        x + 60,
        x + 100,
        x + 90,
        x + 80,
        x + 70,
        x + 60,
        x + 50
    )
}

/// Confetti rain and sparkle burst, drawn above the current stage
#[component]
pub fn EffectsOverlay(effects: Effects) -> Element {
    rsx! {
        if effects.confetti {
            div { class: "overlay",
                for i in 0..CONFETTI_PIECES {
                    div {
                        key: "confetti-{i}",
                        class: "confetti-piece",
                        style: format!(
                            "left: {}%; background-color: {}; animation-delay: {}ms;",
                            scatter(i, 37, 100),
                            PARTY_COLORS[i % PARTY_COLORS.len()],
                            scatter(i, 613, 3000),
                        ),
                    }
                }
            }
        }
        if effects.sparkles {
            div { class: "overlay",
                for i in 0..SPARKLE_COUNT {
                    div {
                        key: "sparkle-{i}",
                        class: "sparkle",
                        style: format!(
                            "left: {}%; top: {}%; animation-delay: {}ms;",
                            30 + scatter(i, 17, 40),
                            30 + scatter(i, 23, 40),
                            scatter(i, 97, 500),
                        ),
                        "✨"
                    }
                }
            }
        }
    }
}

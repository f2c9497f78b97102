use dioxus::prelude::*;
use dioxus_i18n::t;

/// Thumbnail grid of the photos picked so far, each with a remove button
#[component]
pub fn PhotoPreviews(
    /// Data URLs in selection order
    previews: Vec<String>,
    on_remove: EventHandler<usize>,
) -> Element {
    if previews.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 12px; margin-top: 16px;",
            for (index, preview) in previews.into_iter().enumerate() {
                div {
                    key: "{index}",
                    style: "position: relative; aspect-ratio: 1/1; border-radius: 8px; overflow: hidden; border: 2px solid #f3c1dc;",
                    img {
                        src: "{preview}",
                        alt: "Upload",
                        style: "width: 100%; height: 100%; object-fit: cover;",
                    }
                    button {
                        r#type: "button",
                        title: t!("photos-remove"),
                        style: "position: absolute; top: 4px; right: 4px; width: 28px; height: 28px; background: rgba(204, 0, 0, 0.9); color: white; border-radius: 50%; font-size: 14px; display: flex; align-items: center; justify-content: center; cursor: pointer; border: none;",
                        onclick: move |_| on_remove.call(index),
                        "×"
                    }
                }
            }
        }
    }
}

use crate::Route;
use dioxus::prelude::*;
use dioxus_i18n::t;
use greeting_core::wish_id_from_path;

use super::view_greeting::ViewGreetingScreen;

#[component]
pub fn NotFoundScreen(segments: Vec<String>) -> Element {
    let path = format!("/{}/", segments.join("/"));

    // shared links sometimes pick up a trailing slash
    if let Some(id) = wish_id_from_path(&path) {
        return rsx! {
            ViewGreetingScreen { id: id.to_string() }
        };
    }

    rsx! {
        div { class: "page page-light",
            div { style: "text-align: center;",
                div { class: "bounce-slow", style: "font-size: 96px;", "🎁" }
                h1 { style: "font-size: 72px; margin: 0 0 16px 0;", {t!("not-found-title")} }
                p { style: "font-size: 20px; color: #666; margin-bottom: 32px;",
                    {t!("not-found-message")}
                }
                Link { class: "btn-primary", to: Route::CreateGreetingScreen {}, {t!("not-found-home")} }
            }
        }
    }
}

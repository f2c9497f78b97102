use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;

mod components;
mod config;
mod error;
mod i18n;
mod services;

use components::{CreateGreetingScreen, NotFoundScreen, ViewGreetingScreen};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    dioxus::launch(App);
}

/// Pages of the app
#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    CreateGreetingScreen {},
    #[route("/wish/:id")]
    ViewGreetingScreen { id: String },
    #[route("/:..segments")]
    NotFoundScreen { segments: Vec<String> },
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

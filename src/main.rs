#![allow(non_snake_case)]

mod chain;
mod components;
mod config;
mod contracts;
mod flow;
mod raindrop;
mod state;

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

use state::{AppState, SharedEthClient};

const STYLE: &str = include_str!("../assets/style.css");

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/create")]
    Create {},
    #[route("/raindrop/:id")]
    Details { id: String },
}

fn main() {
    tracing_subscriber::fmt::init();

    // Configuration errors are fatal before anything is rendered.
    let config = config::AppConfig::from_env().unwrap_or_else(|err| {
        eprintln!("raindrop-ui: {err}");
        std::process::exit(1);
    });
    tracing::debug!(project_id = %config.project_id, "wallet-connect project configured");

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    // Provide shared state to all pages
    use_context_provider(|| Signal::new(AppState::default()));
    use_context_provider::<SharedEthClient>(|| Arc::new(Mutex::new(None)));

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout — persistent header + routed content
// ---------------------------------------------------------------------------

#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::Header {}
            main { class: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route components — thin wrappers around the real pages
// ---------------------------------------------------------------------------

#[component]
fn Home() -> Element {
    rsx! { components::home::HomePage {} }
}

#[component]
fn Create() -> Element {
    rsx! { components::create::CreatePage {} }
}

#[component]
fn Details(id: String) -> Element {
    rsx! { components::details::DetailsPage { id } }
}

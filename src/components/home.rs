use dioxus::prelude::*;

use crate::state::{AppState, ConnectionStatus};
use crate::Route;

#[component]
pub fn HomePage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let mut lookup_id = use_signal(String::new);

    let connected = matches!(
        state.read().connection_status,
        ConnectionStatus::Connected
    );

    let on_open = move |_| {
        let id = lookup_id.read().trim().to_string();
        if id.is_empty() {
            return;
        }
        nav.push(Route::Details { id });
    };

    rsx! {
        div { class: "page",
            h1 { "Raindrop" }
            p { class: "subtitle", "Scheduled token distributions on Base." }

            if !connected {
                div { class: "connect-nudge",
                    p { class: "empty-desc",
                        "Hit Connect in the header to reach the network, then unlock a signing key to manage your raindrops."
                    }
                }
            }

            div { class: "form-group",
                label { "Look up a raindrop by id" }
                input {
                    class: "input input-wide",
                    r#type: "text",
                    placeholder: "party1",
                    value: "{lookup_id}",
                    oninput: move |e| lookup_id.set(e.value()),
                }
                button { class: "btn btn-primary", onclick: on_open, "Open" }
            }

            p { class: "hint", "Or create a new raindrop from the Create tab." }
        }
    }
}

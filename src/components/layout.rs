use dioxus::prelude::*;

use super::connect::ConnectWidget;
use crate::Route;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "header",
            Link { class: "logo", to: Route::Home {},
                span { class: "logo-icon", "💧" }
                span { class: "logo-text", "Raindrop" }
            }
            nav { class: "nav-links",
                Link { class: "nav-link", to: Route::Home {}, "Home" }
                Link { class: "nav-link", to: Route::Create {}, "Create Raindrop" }
            }
            div { class: "connect-container",
                ConnectWidget {}
            }
        }
    }
}

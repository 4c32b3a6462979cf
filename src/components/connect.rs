//! Header wallet widget: RPC connection status plus signing-key unlock.

use alloy::signers::local::PrivateKeySigner;
use dioxus::prelude::*;

use crate::chain::EthClient;
use crate::config::AppConfig;
use crate::state::{AppState, ConnectionStatus, SharedEthClient};

#[component]
pub fn ConnectWidget() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let eth = use_context::<SharedEthClient>();
    let config = use_context::<AppConfig>();

    let mut key_input = use_signal(String::new);
    let mut unlock_error = use_signal(|| None::<String>);

    let status = state.read().connection_status.clone();
    let account = state.read().account;

    let (dot_class, label) = match &status {
        ConnectionStatus::Disconnected => ("dot disconnected", "Disconnected"),
        ConnectionStatus::Connecting => ("dot connecting", "Connecting"),
        ConnectionStatus::Connected => ("dot connected", "Connected"),
        ConnectionStatus::Error(_) => ("dot error", "Error"),
    };
    let is_connected = matches!(status, ConnectionStatus::Connected);

    let connect = {
        let eth = eth.clone();
        move |_| {
            let eth = eth.clone();
            let config = config.clone();
            spawn(async move {
                state.write().connection_status = ConnectionStatus::Connecting;
                match EthClient::connect(&config).await {
                    Ok(client) => {
                        *eth.lock().unwrap() = Some(client);
                        state.write().connection_status = ConnectionStatus::Connected;
                    }
                    Err(e) => {
                        state.write().connection_status = ConnectionStatus::Error(e.to_string());
                    }
                }
            });
        }
    };

    let disconnect = {
        let eth = eth.clone();
        move |_| {
            *eth.lock().unwrap() = None;
            state.write().connection_status = ConnectionStatus::Disconnected;
            state.write().account = None;
            key_input.set(String::new());
            unlock_error.set(None);
        }
    };

    let unlock = {
        let eth = eth.clone();
        move |_| {
            let raw = key_input.read().trim().to_string();
            match raw.parse::<PrivateKeySigner>() {
                Ok(signer) => {
                    let mut guard = eth.lock().unwrap();
                    if let Some(client) = guard.take() {
                        let client = client.with_signer(signer);
                        let account = client.account();
                        *guard = Some(client);
                        drop(guard);
                        state.write().account = account;
                        key_input.set(String::new());
                        unlock_error.set(None);
                    }
                }
                Err(_) => unlock_error.set(Some("Invalid private key".into())),
            }
        }
    };

    rsx! {
        div { class: "conn-indicator",
            span { class: dot_class }
            span { class: "conn-label", "{label}" }

            if is_connected {
                if let Some(address) = account {
                    span { class: "conn-account mono", "{truncate_address(&address.to_string())}" }
                } else {
                    input {
                        class: "input input-key",
                        r#type: "password",
                        placeholder: "Signing key",
                        value: "{key_input}",
                        oninput: move |e| key_input.set(e.value()),
                    }
                    button { class: "conn-btn", onclick: unlock, "Unlock" }
                }
                button { class: "conn-btn conn-btn-disconnect", onclick: disconnect, "Disconnect" }
            } else {
                button {
                    class: "conn-btn conn-btn-connect",
                    disabled: matches!(status, ConnectionStatus::Connecting),
                    onclick: connect,
                    "Connect"
                }
            }

            if let Some(msg) = unlock_error.read().as_ref() {
                span { class: "error-text", "{msg}" }
            }
            if let ConnectionStatus::Error(msg) = &status {
                span { class: "error-text", "{msg}" }
            }
        }
    }
}

fn truncate_address(address: &str) -> String {
    if address.len() > 12 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_prefix_and_suffix() {
        let full = "0x1111111111111111111111111111111111111111";
        assert_eq!(truncate_address(full), "0x1111...1111");
        assert_eq!(truncate_address("0xabc"), "0xabc");
    }
}

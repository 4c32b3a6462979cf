//! Create page: collect id, token, amount, and schedule, then drive the
//! approve-then-create sequence from `crate::flow`.

use alloy::primitives::Address;
use chrono::{Local, NaiveDateTime, TimeZone};
use dioxus::prelude::*;

use crate::chain::ChainError;
use crate::flow::{step, CreateFlow, FlowEvent};
use crate::raindrop::{format_token_amount, parse_token_amount};
use crate::state::{AppState, SharedEthClient};
use crate::Route;

#[component]
pub fn CreatePage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let eth = use_context::<SharedEthClient>();
    let nav = use_navigator();

    let mut raindrop_id = use_signal(String::new);
    let mut token_address = use_signal(String::new);
    let mut amount_str = use_signal(String::new);
    let mut schedule_str = use_signal(String::new);

    let mut decimals = use_signal(|| None::<u8>);
    let mut token_balance = use_signal(|| None::<String>);
    let mut fetching_token = use_signal(|| false);
    let mut token_error = use_signal(|| None::<String>);

    let mut flow = use_signal(CreateFlow::default);
    let mut error_msg = use_signal(|| None::<String>);

    let account = state.read().account;

    // Token decimals (and balance) resolve as soon as the address parses.
    // Submission stays blocked until they do.
    {
        let eth = eth.clone();
        use_effect(move || {
            let text = token_address.read().trim().to_string();
            let owner = state.read().account;
            decimals.set(None);
            token_balance.set(None);
            token_error.set(None);
            let Ok(token) = text.parse::<Address>() else {
                return;
            };
            let client = match eth.lock().unwrap().clone() {
                Some(c) => c,
                None => return,
            };
            fetching_token.set(true);
            spawn(async move {
                match client.token_decimals(token).await {
                    Ok(d) => {
                        decimals.set(Some(d));
                        if let Some(owner) = owner {
                            if let Ok(balance) = client.token_balance(token, owner).await {
                                token_balance.set(Some(format_token_amount(balance, d)));
                            }
                        }
                    }
                    Err(_) => token_error.set(Some(
                        "Could not find token. Is it a valid ERC-20 on this network?".into(),
                    )),
                }
                fetching_token.set(false);
            });
        });
    }

    let on_submit = {
        let eth = eth.clone();
        move |_| {
            let id = raindrop_id.read().trim().to_string();
            if id.is_empty() {
                error_msg.set(Some("Raindrop id is required".into()));
                return;
            }
            let token = match token_address.read().trim().parse::<Address>() {
                Ok(t) => t,
                Err(_) => {
                    error_msg.set(Some("Invalid token address".into()));
                    return;
                }
            };
            let dec = match *decimals.read() {
                Some(d) => d,
                None => {
                    error_msg.set(Some(
                        "Token details not resolved yet. Check the address and try again.".into(),
                    ));
                    return;
                }
            };
            let amount = match parse_token_amount(&amount_str.read(), dec) {
                Some(a) => a,
                None => {
                    error_msg.set(Some("Invalid amount".into()));
                    return;
                }
            };
            let schedule = match parse_local_datetime(&schedule_str.read()) {
                Some(ts) => ts,
                None => {
                    error_msg.set(Some("Invalid scheduled time".into()));
                    return;
                }
            };
            let client = match eth.lock().unwrap().clone() {
                Some(c) => c,
                None => {
                    error_msg.set(Some("Connect your wallet first".into()));
                    return;
                }
            };

            error_msg.set(None);
            let cur = *flow.read();
            flow.set(step(cur, FlowEvent::Submit));

            spawn(async move {
                let result = async {
                    let hash = client.approve(token, amount).await?;
                    let cur = *flow.read();
                    flow.set(step(cur, FlowEvent::ApprovalSubmitted));
                    client.wait_for_receipt(hash).await?;
                    let cur = *flow.read();
                    flow.set(step(
                        cur,
                        FlowEvent::ApprovalConfirmed {
                            decimals_known: true,
                        },
                    ));

                    let hash = client.create_raindrop(&id, token, amount, schedule).await?;
                    let cur = *flow.read();
                    flow.set(step(cur, FlowEvent::CreateSubmitted));
                    client.wait_for_receipt(hash).await?;
                    let cur = *flow.read();
                    flow.set(step(cur, FlowEvent::CreateConfirmed));
                    Ok::<_, ChainError>(())
                }
                .await;

                match result {
                    Ok(()) => {
                        nav.push(Route::Details { id });
                    }
                    Err(e) => {
                        let cur = *flow.read();
                        flow.set(step(cur, FlowEvent::Error));
                        error_msg.set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    let current_flow = *flow.read();
    let busy = current_flow.is_busy();
    let submit_blocked = busy || *fetching_token.read() || decimals.read().is_none();

    rsx! {
        div { class: "page",
            h1 { "Create a New Raindrop" }

            if account.is_none() {
                p { class: "hint",
                    "Connect your wallet and unlock a signing key to create a raindrop."
                }
            } else {
                div { class: "form-group",
                    label { "Raindrop ID (a unique name)" }
                    input {
                        class: "input input-wide",
                        r#type: "text",
                        placeholder: "party1",
                        value: "{raindrop_id}",
                        oninput: move |e| raindrop_id.set(e.value()),
                    }
                }

                div { class: "form-group",
                    label { "Token Contract Address" }
                    input {
                        class: "input input-wide",
                        r#type: "text",
                        placeholder: "0x...",
                        value: "{token_address}",
                        oninput: move |e| token_address.set(e.value()),
                    }
                    if *fetching_token.read() {
                        small { class: "hint", "Fetching token info..." }
                    }
                    if let Some(msg) = token_error.read().as_ref() {
                        small { class: "error-text", "{msg}" }
                    }
                    if let Some(balance) = token_balance.read().as_ref() {
                        small { class: "hint", "Your balance: {balance}" }
                    }
                }

                div { class: "form-group",
                    label { "Total Amount to Distribute" }
                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "100",
                        value: "{amount_str}",
                        oninput: move |e| amount_str.set(e.value()),
                    }
                }

                div { class: "form-group",
                    label { "Scheduled Execution Time" }
                    input {
                        class: "input",
                        r#type: "datetime-local",
                        value: "{schedule_str}",
                        oninput: move |e| schedule_str.set(e.value()),
                    }
                }

                button {
                    class: "btn btn-primary",
                    disabled: submit_blocked,
                    onclick: on_submit,
                    if let Some(line) = current_flow.status_line() {
                        "{line}"
                    } else {
                        "Approve & Create Raindrop"
                    }
                }
            }

            if let Some(msg) = error_msg.read().as_ref() {
                p { class: "error-text", "Error: {msg}" }
            }
        }
    }
}

/// Parse the `datetime-local` input value in the user's local timezone and
/// convert it to unix seconds.
fn parse_local_datetime(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    let local = Local.from_local_datetime(&naive).single()?;
    let ts = local.timestamp();
    (ts > 0).then(|| ts as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_local_values_parse() {
        assert!(parse_local_datetime("2030-01-02T15:04").is_some());
        assert!(parse_local_datetime("2030-01-02T15:04:05").is_some());
        assert!(parse_local_datetime("  2030-01-02T15:04  ").is_some());
    }

    #[test]
    fn malformed_datetimes_are_rejected() {
        assert!(parse_local_datetime("").is_none());
        assert!(parse_local_datetime("tomorrow").is_none());
        assert!(parse_local_datetime("2030-01-02 15:04").is_none());
    }
}

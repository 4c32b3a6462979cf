//! Detail/manage page for one raindrop id.
//!
//! Two-stage dependent fetch: the raindrop tuple first, then the token's
//! decimals only once the tuple (and so the token address) exists. Host-only
//! management controls submit one write each and re-fetch the tuple after the
//! receipt confirms; nothing is updated optimistically.

use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, B256};
use chrono::{Local, LocalResult, TimeZone};
use dioxus::prelude::*;

use crate::chain::{ChainError, EthClient};
use crate::raindrop::{format_token_amount, parse_participants, RaindropDetails};
use crate::state::{AppState, ConnectionStatus, SharedEthClient};

const PARTICIPANTS_PAGE_SIZE: u64 = 25;

fn fetch_details(
    id: String,
    eth: SharedEthClient,
    mut details: Signal<Option<RaindropDetails>>,
    mut loading: Signal<bool>,
    mut load_error: Signal<Option<String>>,
) {
    let client = match eth.lock().unwrap().clone() {
        Some(c) => c,
        None => return,
    };
    loading.set(true);
    load_error.set(None);
    spawn(async move {
        match client.raindrop_details(&id).await {
            Ok(d) => details.set(Some(d)),
            Err(e) => load_error.set(Some(e.to_string())),
        }
        loading.set(false);
    });
}

/// Submit one contract write, wait for its receipt, then re-read the tuple so
/// the page reflects the chain's new state. On failure the status line is
/// cleared and the error text shown instead.
fn submit_action<Fut>(
    eth: SharedEthClient,
    id: String,
    mut details: Signal<Option<RaindropDetails>>,
    mut busy: Signal<bool>,
    mut status_msg: Signal<Option<String>>,
    mut error_msg: Signal<Option<String>>,
    action: impl FnOnce(EthClient) -> Fut + 'static,
) where
    Fut: Future<Output = Result<B256, ChainError>> + 'static,
{
    let client = match eth.lock().unwrap().clone() {
        Some(c) => c,
        None => {
            error_msg.set(Some("Not connected".into()));
            return;
        }
    };
    error_msg.set(None);
    status_msg.set(None);
    busy.set(true);
    spawn(async move {
        let result = async {
            let hash = action(client.clone()).await?;
            status_msg.set(Some(format!("Transaction sent: {hash}")));
            client.wait_for_receipt(hash).await?;
            Ok::<_, ChainError>(())
        }
        .await;
        match result {
            Ok(()) => {
                status_msg.set(Some("Transaction confirmed".into()));
                match client.raindrop_details(&id).await {
                    Ok(d) => details.set(Some(d)),
                    Err(e) => error_msg.set(Some(e.to_string())),
                }
            }
            Err(e) => {
                status_msg.set(None);
                error_msg.set(Some(e.to_string()));
            }
        }
        busy.set(false);
    });
}

#[component]
pub fn DetailsPage(id: String) -> Element {
    let state = use_context::<Signal<AppState>>();
    let eth = use_context::<SharedEthClient>();

    let details = use_signal(|| None::<RaindropDetails>);
    let loading = use_signal(|| false);
    let load_error = use_signal(|| None::<String>);
    let mut decimals = use_signal(|| None::<u8>);
    let mut participants = use_signal(Vec::<Address>::new);
    let mut more_participants = use_signal(|| false);
    let mut add_text = use_signal(String::new);
    let mut remove_text = use_signal(String::new);
    let busy = use_signal(|| false);
    let status_msg = use_signal(|| None::<String>);
    let mut error_msg = use_signal(|| None::<String>);

    let connected = matches!(
        state.read().connection_status,
        ConnectionStatus::Connected
    );
    let account = state.read().account;

    // Stage 1: the raindrop tuple, fetched once a connection exists.
    {
        let eth = eth.clone();
        let id = id.clone();
        use_effect(move || {
            if matches!(
                state.read().connection_status,
                ConnectionStatus::Connected
            ) {
                fetch_details(id.clone(), eth.clone(), details, loading, load_error);
            }
        });
    }

    // Stage 2: token decimals, gated on the tuple being present. The token
    // address is immutable, so one resolution is enough.
    {
        let eth = eth.clone();
        use_effect(move || {
            let token = match details.read().as_ref() {
                Some(d) => d.token,
                None => return,
            };
            if decimals.read().is_some() {
                return;
            }
            let client = match eth.lock().unwrap().clone() {
                Some(c) => c,
                None => return,
            };
            spawn(async move {
                if let Ok(d) = client.token_decimals(token).await {
                    decimals.set(Some(d));
                }
            });
        });
    }

    // Participant list: first page re-pulled whenever the tuple refreshes.
    {
        let eth = eth.clone();
        let id = id.clone();
        use_effect(move || {
            if details.read().is_none() {
                return;
            }
            let client = match eth.lock().unwrap().clone() {
                Some(c) => c,
                None => return,
            };
            let id = id.clone();
            spawn(async move {
                if let Ok(page) = client
                    .participants_page(&id, 0, PARTICIPANTS_PAGE_SIZE)
                    .await
                {
                    more_participants.set(page.len() as u64 == PARTICIPANTS_PAGE_SIZE);
                    participants.set(page);
                }
            });
        });
    }

    let on_load_more = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let client = match eth.lock().unwrap().clone() {
                Some(c) => c,
                None => return,
            };
            let id = id.clone();
            spawn(async move {
                let cursor = participants.read().len() as u64;
                match client
                    .participants_page(&id, cursor, PARTICIPANTS_PAGE_SIZE)
                    .await
                {
                    Ok(page) => {
                        more_participants.set(page.len() as u64 == PARTICIPANTS_PAGE_SIZE);
                        participants.write().extend(page);
                    }
                    Err(e) => error_msg.set(Some(e.to_string())),
                }
            });
        }
    };

    let on_execute = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let action_id = id.clone();
            submit_action(
                eth.clone(),
                id.clone(),
                details,
                busy,
                status_msg,
                error_msg,
                move |client| async move { client.execute_raindrop(&action_id).await },
            );
        }
    };

    let on_cancel = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let action_id = id.clone();
            submit_action(
                eth.clone(),
                id.clone(),
                details,
                busy,
                status_msg,
                error_msg,
                move |client| async move { client.cancel_raindrop(&action_id).await },
            );
        }
    };

    let on_add = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let list = parse_participants(&add_text.read());
            if list.is_empty() {
                error_msg.set(Some("Enter at least one valid address".into()));
                return;
            }
            let action_id = id.clone();
            submit_action(
                eth.clone(),
                id.clone(),
                details,
                busy,
                status_msg,
                error_msg,
                move |client| async move { client.add_participants(&action_id, list).await },
            );
            add_text.set(String::new());
        }
    };

    let on_remove = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let list = parse_participants(&remove_text.read());
            if list.is_empty() {
                error_msg.set(Some("Enter at least one valid address".into()));
                return;
            }
            let action_id = id.clone();
            submit_action(
                eth.clone(),
                id.clone(),
                details,
                busy,
                status_msg,
                error_msg,
                move |client| async move { client.remove_participants(&action_id, list).await },
            );
            remove_text.set(String::new());
        }
    };

    let on_clear = {
        let eth = eth.clone();
        let id = id.clone();
        move |_| {
            let action_id = id.clone();
            submit_action(
                eth.clone(),
                id.clone(),
                details,
                busy,
                status_msg,
                error_msg,
                move |client| async move { client.clear_participants(&action_id).await },
            );
        }
    };

    let is_busy = *busy.read();
    let current = details.read().clone();

    let body = if !connected {
        rsx! {
            p { class: "hint", "Connect to the network to view this raindrop." }
        }
    } else if current.is_none() && *loading.read() {
        rsx! {
            p { class: "hint", "Loading details..." }
        }
    } else if let Some(msg) = load_error.read().as_ref() {
        rsx! {
            p { class: "error-text", "{msg}" }
        }
    } else if let Some(d) = current {
        let status = d.status();
        let amount = match *decimals.read() {
            Some(dec) => format_token_amount(d.total_amount, dec),
            None => "N/A".to_string(),
        };
        let is_host = d.is_host(account);
        let can_execute = d.can_execute(unix_now());

        rsx! {
            div { class: "details-grid",
                div { class: "details-key", "Status" }
                div {
                    span { class: status.css_class(), "{status}" }
                }
                div { class: "details-key", "Host" }
                div { class: "mono", "{d.host}" }
                div { class: "details-key", "Token" }
                div { class: "mono", "{d.token}" }
                div { class: "details-key", "Total Amount" }
                div { "{amount}" }
                div { class: "details-key", "Scheduled Time" }
                div { "{format_timestamp(d.scheduled_time)}" }
                div { class: "details-key", "Participants" }
                div { "{d.participant_count}" }
            }

            if !participants.read().is_empty() {
                div { class: "participants",
                    h3 { "Participants" }
                    ul { class: "participant-list",
                        for address in participants.read().iter() {
                            li { class: "mono", "{address}" }
                        }
                    }
                    if *more_participants.read() {
                        button { class: "btn", onclick: on_load_more, "Load more" }
                    }
                }
            }

            if is_host && d.is_open() {
                div { class: "management",
                    h3 { "Manage Raindrop" }
                    div { class: "action-buttons",
                        button {
                            class: "btn btn-primary",
                            disabled: !can_execute || is_busy,
                            onclick: on_execute,
                            if is_busy { "Processing..." } else { "Execute Raindrop" }
                        }
                        button {
                            class: "btn btn-danger",
                            disabled: is_busy,
                            onclick: on_cancel,
                            if is_busy { "Processing..." } else { "Cancel Raindrop" }
                        }
                    }
                    if !can_execute {
                        small { class: "hint",
                            "You can execute this raindrop after the scheduled time has passed."
                        }
                    }

                    div { class: "form-group",
                        h4 { "Add Participants" }
                        textarea {
                            class: "input input-wide",
                            rows: "5",
                            placeholder: "Paste addresses here, separated by spaces or commas.",
                            value: "{add_text}",
                            oninput: move |e| add_text.set(e.value()),
                        }
                        button { class: "btn", disabled: is_busy, onclick: on_add, "Add Participants" }
                    }

                    div { class: "form-group",
                        h4 { "Remove Participants" }
                        textarea {
                            class: "input input-wide",
                            rows: "3",
                            placeholder: "Addresses to remove, separated by spaces or commas.",
                            value: "{remove_text}",
                            oninput: move |e| remove_text.set(e.value()),
                        }
                        button { class: "btn", disabled: is_busy, onclick: on_remove, "Remove Participants" }
                    }

                    button { class: "btn btn-danger", disabled: is_busy, onclick: on_clear,
                        "Clear All Participants"
                    }
                }
            }
        }
    } else {
        rsx! {
            p { class: "hint", "Could not find details for raindrop: {id}" }
        }
    };

    rsx! {
        div { class: "page details-page",
            h1 { "Raindrop: {id}" }
            {body}

            if let Some(msg) = status_msg.read().as_ref() {
                p { class: "success-text", "{msg}" }
            }
            if let Some(msg) = error_msg.read().as_ref() {
                p { class: "error-text", "Error: {msg}" }
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn format_timestamp(secs: u64) -> String {
    match Local.timestamp_opt(secs as i64, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => format!("{secs} (unix)"),
    }
}

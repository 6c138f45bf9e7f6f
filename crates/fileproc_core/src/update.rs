use std::collections::BTreeSet;

use crate::progress::parse_frame;
use crate::state::{ConnectionState, NoticeKind, PAGE_SIZE};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageRequested(target) => {
            if !state.page_in_range(target) {
                Vec::new()
            } else {
                state.set_loading(true);
                vec![Effect::FetchPage {
                    page: target,
                    page_size: PAGE_SIZE,
                }]
            }
        }
        Msg::PageLoaded(page) => {
            // Replaced wholesale; the selection deliberately survives
            // navigation so files picked on other pages stay queued.
            state.set_loading(false);
            state.set_page(page);
            Vec::new()
        }
        Msg::PageLoadFailed(reason) => {
            state.set_loading(false);
            state.push_notice(
                NoticeKind::Error,
                format!("Failed to fetch files: {reason}"),
            );
            Vec::new()
        }
        Msg::FileToggled(file_name) => {
            state.toggle_selected(file_name);
            Vec::new()
        }
        Msg::SelectAllToggled => {
            let page_names: BTreeSet<String> = state
                .page()
                .map(|page| page.items.iter().map(|file| file.name.clone()).collect())
                .unwrap_or_default();
            if page_names.is_empty() {
                return (state, Vec::new());
            }
            if *state.selection() == page_names {
                state.clear_selection();
            } else {
                state.replace_selection(page_names);
            }
            Vec::new()
        }
        Msg::UploadRequested(paths) => {
            if paths.is_empty() {
                state.push_notice(NoticeKind::Error, "No files given to upload.");
                Vec::new()
            } else {
                vec![Effect::UploadFiles { paths }]
            }
        }
        Msg::UploadSucceeded { message } => {
            state.push_notice(NoticeKind::Info, message);
            // Refresh the inventory so the new files show up.
            let page = state.page().map(|p| p.page_number).unwrap_or(1);
            state.set_loading(true);
            vec![Effect::FetchPage {
                page,
                page_size: PAGE_SIZE,
            }]
        }
        Msg::UploadFailed(reason) => {
            state.push_notice(NoticeKind::Error, format!("Upload failed: {reason}"));
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.selection().is_empty() {
                state.push_notice(
                    NoticeKind::Error,
                    "No files selected. Select at least one file to process.",
                );
                return (state, Vec::new());
            }
            let Some(client_id) = state.client_id().map(ToOwned::to_owned) else {
                state.push_notice(NoticeKind::Error, "Not signed in; cannot submit.");
                return (state, Vec::new());
            };
            let file_names: Vec<String> = state.selection().iter().cloned().collect();
            state.set_submitting(true);
            vec![Effect::SubmitBatch {
                file_names,
                client_id,
            }]
        }
        Msg::SubmitSucceeded { submitted } => {
            state.set_submitting(false);
            state.clear_selection();
            state.push_notice(
                NoticeKind::Info,
                format!("Processing started for {submitted} {}", plural(submitted)),
            );
            Vec::new()
        }
        Msg::SubmitFailed(reason) => {
            // Selection is kept so the user can retry. The channel is torn
            // down: with no batch in flight it would never reach a terminal
            // state on its own.
            state.set_submitting(false);
            state.push_notice(NoticeKind::Error, format!("Failed to process files: {reason}"));
            controlled_close(&mut state)
        }
        Msg::DetailRequested(file_name) => {
            vec![Effect::FetchDetail { file_name }]
        }
        Msg::DetailLoaded { file_name, detail } => {
            match detail {
                Some(detail) => {
                    let mut text = format!("{file_name}: {}", detail.status);
                    if let Some(at) = detail.processed_at {
                        text.push_str(&format!(" at {at}"));
                    }
                    if let Some(err) = detail.error {
                        text.push_str(&format!(" ({err})"));
                    }
                    state.push_notice(NoticeKind::Info, text);
                }
                None => {
                    state.push_notice(NoticeKind::Info, format!("{file_name}: no result yet"));
                }
            }
            Vec::new()
        }
        Msg::DetailFailed(reason) => {
            state.push_notice(NoticeKind::Error, format!("Result lookup failed: {reason}"));
            Vec::new()
        }
        Msg::IdentityReady { client_id } => {
            state.set_client_id(client_id);
            connect(&mut state)
        }
        Msg::ConnectRequested => connect(&mut state),
        Msg::ChannelEstablished => {
            if state.connection() == ConnectionState::Connecting {
                state.set_connection(ConnectionState::Open);
            }
            Vec::new()
        }
        Msg::ChannelFrame(raw) => {
            // Frames racing a controlled close must not resurrect the ledger.
            if state.connection() == ConnectionState::Closed {
                return (state, Vec::new());
            }
            match parse_frame(&raw) {
                Ok(record) => {
                    let terminal = record.status.is_terminal();
                    state.apply_record(record);
                    if terminal {
                        vec![Effect::ScheduleCloseCheck]
                    } else {
                        Vec::new()
                    }
                }
                Err(err) => {
                    log::warn!("dropping progress frame: {err}");
                    Vec::new()
                }
            }
        }
        Msg::CloseCheckElapsed => {
            // Re-evaluated against live state, never a snapshot taken when
            // the terminal event arrived.
            if state.connection() == ConnectionState::Open && !state.has_active_files() {
                controlled_close(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::ChannelClosed { error } => {
            // Uncontrolled disconnect: the ledger is left as-is for
            // inspection, and reconnecting needs an explicit request.
            state.set_connection(ConnectionState::Closed);
            match error {
                Some(error) => {
                    state.push_notice(NoticeKind::Error, format!("Connection error: {error}"))
                }
                None => state.push_notice(NoticeKind::Info, "Connection closed."),
            }
            Vec::new()
        }
        Msg::DisconnectRequested => controlled_close(&mut state),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// `Closed -> Connecting`, idempotent: a no-op while connecting or open, and
/// a no-op without a known identity.
fn connect(state: &mut AppState) -> Vec<Effect> {
    let Some(client_id) = state.client_id().map(ToOwned::to_owned) else {
        return Vec::new();
    };
    if state.connection() != ConnectionState::Closed {
        return Vec::new();
    }
    state.set_connection(ConnectionState::Connecting);
    vec![Effect::OpenChannel { client_id }]
}

/// Deliberate teardown: wipes the ledger and asks the engine to drop the
/// channel. Transport-level closes go through `Msg::ChannelClosed` instead.
fn controlled_close(state: &mut AppState) -> Vec<Effect> {
    if state.connection() == ConnectionState::Closed {
        return Vec::new();
    }
    state.set_connection(ConnectionState::Closed);
    state.wipe_ledger();
    vec![Effect::CloseChannel]
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "file"
    } else {
        "files"
    }
}

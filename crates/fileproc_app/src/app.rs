//! The console's single event loop: stdin commands and engine events are
//! funneled into one channel and applied to the core state serially, so the
//! ledger and connection state never see concurrent writers.

use std::io::BufRead;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use client_logging::client_info;
use fileproc_core::{update, AppState, Msg};
use fileproc_engine::{ApiSettings, ChannelSettings, EngineConfig, EngineHandle};

use crate::commands::{self, Command};
use crate::config::{self, AppConfig};
use crate::effects::{map_event, EffectRunner};
use crate::render;

enum Input {
    Msg(Msg),
    Command(Command),
    /// stdin reached end of file.
    Eof,
}

pub fn run() -> ExitCode {
    let config = config::from_env();
    crate::logging::initialize(config.log_destination);
    client_info!("fileproc console starting against {}", config.base_url);

    let (engine, event_rx) = EngineHandle::new(engine_config(&config));
    let runner = EffectRunner::new(engine);
    let (input_tx, input_rx) = mpsc::channel::<Input>();

    spawn_event_pump(event_rx, input_tx.clone());
    spawn_stdin_reader(input_tx.clone());

    let mut state = AppState::new();

    // Known identity opens the channel; the first page always loads.
    if let Some(client_id) = config.client_id.clone() {
        let _ = input_tx.send(Input::Msg(Msg::IdentityReady { client_id }));
    } else {
        println!("No FILEPROC_CLIENT_ID set; progress streaming is disabled.");
    }
    let _ = input_tx.send(Input::Msg(Msg::PageRequested(1)));

    while let Ok(input) = input_rx.recv() {
        let msg = match input {
            Input::Msg(msg) => msg,
            Input::Eof => break,
            Input::Command(Command::Quit) => break,
            Input::Command(Command::Help) => {
                println!("{}", commands::HELP_TEXT);
                continue;
            }
            Input::Command(Command::Show) => {
                render::render(&state.view());
                continue;
            }
            Input::Command(command) => translate(command, &state),
        };

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.enqueue(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    // Drop the channel before exiting so the server sees a clean close.
    let (state, effects) = update(state, Msg::DisconnectRequested);
    runner.enqueue(effects);
    drop(state);
    client_info!("fileproc console exiting");
    ExitCode::SUCCESS
}

fn engine_config(config: &AppConfig) -> EngineConfig {
    EngineConfig {
        api: ApiSettings {
            base_url: config.base_url.clone(),
            bearer_token: config.token.clone(),
            ..ApiSettings::default()
        },
        channel: ChannelSettings {
            ws_url: config.ws_url.clone(),
        },
        ..EngineConfig::default()
    }
}

/// Commands that need the current view context become messages here.
fn translate(command: Command, state: &AppState) -> Msg {
    match command {
        Command::Page(number) => Msg::PageRequested(number),
        Command::Next => {
            let current = state.page().map(|page| page.page_number).unwrap_or(0);
            Msg::PageRequested(current + 1)
        }
        Command::Prev => match state.page().map(|page| page.page_number) {
            Some(current) if current > 1 => Msg::PageRequested(current - 1),
            _ => Msg::NoOp,
        },
        Command::Select(index) => {
            match state
                .page()
                .and_then(|page| page.items.get(index - 1))
                .map(|file| file.name.clone())
            {
                Some(name) => Msg::FileToggled(name),
                None => {
                    println!("No row {index} on this page.");
                    Msg::NoOp
                }
            }
        }
        Command::SelectAll => Msg::SelectAllToggled,
        Command::Submit => Msg::SubmitClicked,
        Command::Upload(paths) => Msg::UploadRequested(paths),
        Command::Detail(name) => Msg::DetailRequested(name),
        Command::Connect => Msg::ConnectRequested,
        Command::Disconnect => Msg::DisconnectRequested,
        Command::Show | Command::Help | Command::Quit => Msg::NoOp,
    }
}

fn spawn_event_pump(event_rx: mpsc::Receiver<fileproc_engine::EngineEvent>, tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if tx.send(Input::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match commands::parse(&line) {
                Some(Ok(command)) => {
                    if tx.send(Input::Command(command)).is_err() {
                        return;
                    }
                }
                Some(Err(hint)) => println!("{hint}"),
                None => {}
            }
        }
        let _ = tx.send(Input::Eof);
    });
}

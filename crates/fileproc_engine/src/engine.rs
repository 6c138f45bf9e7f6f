use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_error, client_info};
use tokio::sync::watch;

use crate::api::{ApiSettings, ProcessingApi, ReqwestApi};
use crate::channel::{run_channel, ChannelHandle, ChannelSettings};
use crate::types::EngineEvent;

/// Commands the application loop hands to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    FetchPage { page: u32, page_size: u32 },
    Upload { paths: Vec<PathBuf> },
    Submit {
        file_names: Vec<String>,
        client_id: String,
    },
    FetchDetail { file_name: String },
    OpenChannel { client_id: String },
    CloseChannel,
    ScheduleCloseCheck,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub channel: ChannelSettings,
    /// Debounce before re-checking whether the channel may close.
    pub close_check_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            channel: ChannelSettings::default(),
            close_check_delay: Duration::from_secs(1),
        }
    }
}

/// Command-side handle to the engine thread. The matching event receiver is
/// returned by [`EngineHandle::new`] and polled by the application loop.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(config, cmd_rx, event_tx));

        (Self { cmd_tx }, event_rx)
    }

    pub fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

fn run_engine(
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let api = match ReqwestApi::new(config.api.clone()) {
        Ok(api) => Arc::new(api),
        Err(err) => {
            client_error!("engine cannot start, bad api settings: {}", err);
            return;
        }
    };

    // At most one live channel per engine; the core enforces the same
    // invariant per client identity.
    let mut channel: Option<ChannelHandle> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::FetchPage { page, page_size } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.fetch_page(page, page_size).await;
                    let _ = event_tx.send(EngineEvent::PageFetched(result));
                });
            }
            EngineCommand::Upload { paths } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.upload(&paths).await;
                    let _ = event_tx.send(EngineEvent::UploadFinished(result));
                });
            }
            EngineCommand::Submit {
                file_names,
                client_id,
            } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.submit(&file_names, &client_id).await;
                    let _ = event_tx.send(EngineEvent::SubmitFinished(result));
                });
            }
            EngineCommand::FetchDetail { file_name } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.fetch_result(&file_name).await;
                    let _ = event_tx.send(EngineEvent::DetailFetched { file_name, result });
                });
            }
            EngineCommand::OpenChannel { client_id } => {
                if channel.as_ref().is_some_and(|handle| !handle.is_finished()) {
                    client_info!("channel already live, ignoring open request");
                    continue;
                }
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                channel = Some(ChannelHandle::new(shutdown_tx));
                runtime.spawn(run_channel(
                    config.channel.clone(),
                    client_id,
                    event_tx.clone(),
                    shutdown_rx,
                ));
            }
            EngineCommand::CloseChannel => {
                if let Some(handle) = channel.take() {
                    handle.close();
                }
            }
            EngineCommand::ScheduleCloseCheck => {
                let event_tx = event_tx.clone();
                let delay = config.close_check_delay;
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(EngineEvent::CloseCheckDue);
                });
            }
        }
    }
}

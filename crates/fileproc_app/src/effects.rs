//! Bridges the pure core to the engine: effects become engine commands,
//! engine events become messages.

use std::path::PathBuf;

use client_logging::client_info;
use fileproc_core::{Effect, FileDetail, FileRecord, Msg, PageState};
use fileproc_engine::{EngineCommand, EngineEvent, EngineHandle, FileWire, PageWire};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { page, page_size } => {
                    client_info!("fetching inventory page {}", page);
                    self.engine.send(EngineCommand::FetchPage { page, page_size });
                }
                Effect::UploadFiles { paths } => {
                    client_info!("uploading {} file(s)", paths.len());
                    self.engine.send(EngineCommand::Upload {
                        paths: paths.into_iter().map(PathBuf::from).collect(),
                    });
                }
                Effect::SubmitBatch {
                    file_names,
                    client_id,
                } => {
                    client_info!("submitting {} file(s) for processing", file_names.len());
                    self.engine.send(EngineCommand::Submit {
                        file_names,
                        client_id,
                    });
                }
                Effect::FetchDetail { file_name } => {
                    self.engine.send(EngineCommand::FetchDetail { file_name });
                }
                Effect::OpenChannel { client_id } => {
                    client_info!("opening progress channel for {}", client_id);
                    self.engine.send(EngineCommand::OpenChannel { client_id });
                }
                Effect::CloseChannel => {
                    self.engine.send(EngineCommand::CloseChannel);
                }
                Effect::ScheduleCloseCheck => {
                    self.engine.send(EngineCommand::ScheduleCloseCheck);
                }
            }
        }
    }
}

/// Translates one engine event into the message the core understands.
pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched(Ok(page)) => Msg::PageLoaded(map_page(page)),
        EngineEvent::PageFetched(Err(err)) => Msg::PageLoadFailed(err.to_string()),
        EngineEvent::UploadFinished(Ok(ack)) => Msg::UploadSucceeded {
            message: ack.message,
        },
        EngineEvent::UploadFinished(Err(err)) => Msg::UploadFailed(err.to_string()),
        EngineEvent::SubmitFinished(Ok(ack)) => Msg::SubmitSucceeded {
            submitted: ack.results.len(),
        },
        EngineEvent::SubmitFinished(Err(err)) => Msg::SubmitFailed(err.to_string()),
        EngineEvent::DetailFetched { file_name, result } => match result {
            Ok(record) => Msg::DetailLoaded {
                file_name,
                detail: record.map(|record| FileDetail {
                    status: record.status,
                    processed_at: record.processed_at,
                    error: record.error,
                }),
            },
            Err(err) => Msg::DetailFailed(err.to_string()),
        },
        EngineEvent::ChannelUp => Msg::ChannelEstablished,
        EngineEvent::ChannelFrame(raw) => Msg::ChannelFrame(raw),
        EngineEvent::ChannelDown { error } => Msg::ChannelClosed { error },
        EngineEvent::CloseCheckDue => Msg::CloseCheckElapsed,
    }
}

fn map_page(page: PageWire) -> PageState {
    PageState {
        page_number: page.page,
        page_size: page.page_size,
        items: page.files.into_iter().map(map_file).collect(),
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next: page.has_next,
        has_previous: page.has_prev,
    }
}

fn map_file(file: FileWire) -> FileRecord {
    FileRecord {
        name: file.file_name,
        size_bytes: file.size,
        storage_path: file.path,
        uploaded_at: file.upload_time,
        modified_at: file.last_modified,
    }
}

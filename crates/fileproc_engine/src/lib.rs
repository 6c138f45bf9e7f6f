//! Fileproc engine: HTTP calls and the streaming channel, executed on a
//! dedicated runtime thread and reported back as [`EngineEvent`]s.
mod api;
mod channel;
mod engine;
mod types;

pub use api::{ApiSettings, ProcessingApi, ReqwestApi};
pub use channel::{run_channel, ChannelHandle, ChannelSettings};
pub use engine::{EngineCommand, EngineConfig, EngineHandle};
pub use types::{
    ApiError, EngineEvent, ErrorBody, FileWire, PageWire, ProcessAck, ProcessRequestWire,
    ResultWire, UploadAck,
};

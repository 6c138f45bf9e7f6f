use serde::{Deserialize, Serialize};

/// Events the engine delivers back to the application loop.
#[derive(Debug)]
pub enum EngineEvent {
    PageFetched(Result<PageWire, ApiError>),
    UploadFinished(Result<UploadAck, ApiError>),
    SubmitFinished(Result<ProcessAck, ApiError>),
    DetailFetched {
        file_name: String,
        result: Result<Option<ResultWire>, ApiError>,
    },
    /// The streaming channel handshake completed.
    ChannelUp,
    /// One raw text frame from the streaming channel.
    ChannelFrame(String),
    /// The channel ended, either on request or from the transport side.
    ChannelDown { error: Option<String> },
    /// The debounced close check is due.
    CloseCheckDue,
}

/// One file entry in the inventory listing response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileWire {
    pub file_name: String,
    pub size: u64,
    pub path: String,
    pub upload_time: String,
    pub last_modified: String,
}

/// `GET /api/v1/files` response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageWire {
    pub files: Vec<FileWire>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// `POST /api/v1/process` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequestWire {
    pub file_names: Vec<String>,
    pub client_id: String,
}

/// One stored processing result, also returned per file by the results
/// lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultWire {
    pub file_name: String,
    pub status: String,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/v1/process` response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessAck {
    pub message: String,
    #[serde(default)]
    pub results: Vec<ResultWire>,
}

/// Upload acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadAck {
    pub message: String,
}

/// Error body the service returns on non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Failures from the HTTP side of the service, one attempt, no retry.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not read file: {0}")]
    File(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

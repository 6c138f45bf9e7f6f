/// I/O requested by [`crate::update`], executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { page: u32, page_size: u32 },
    UploadFiles { paths: Vec<String> },
    SubmitBatch {
        file_names: Vec<String>,
        client_id: String,
    },
    FetchDetail { file_name: String },
    OpenChannel { client_id: String },
    CloseChannel,
    /// Arrange for a `CloseCheckElapsed` message roughly one second from now.
    ScheduleCloseCheck,
}

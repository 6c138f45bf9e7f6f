use crate::state::{FileDetail, PageState};

/// Everything that can happen to the console, from the user or the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for an inventory page (1-based). Out-of-range is a no-op.
    PageRequested(u32),
    /// Engine finished a page fetch; replaces the current page wholesale.
    PageLoaded(PageState),
    /// Page fetch failed; the previous page is kept.
    PageLoadFailed(String),
    /// User flipped one file's selection.
    FileToggled(String),
    /// User hit select-all: full current page if not fully selected, else empty.
    SelectAllToggled,
    /// User asked to upload local files into the inventory.
    UploadRequested(Vec<String>),
    UploadSucceeded { message: String },
    UploadFailed(String),
    /// User submitted the current selection for processing.
    SubmitClicked,
    SubmitSucceeded { submitted: usize },
    SubmitFailed(String),
    /// User asked for the stored processing result of one file.
    DetailRequested(String),
    DetailLoaded {
        file_name: String,
        detail: Option<FileDetail>,
    },
    DetailFailed(String),
    /// An authenticated identity became known; stores it and tries to connect.
    IdentityReady { client_id: String },
    /// Explicit (re)connect attempt; a no-op without an identity or while a
    /// channel is already connecting or open.
    ConnectRequested,
    /// The channel reported its "established" signal.
    ChannelEstablished,
    /// One inbound text frame from the streaming channel, still unparsed.
    ChannelFrame(String),
    /// Transport-level close or error; terminal for this channel instance.
    ChannelClosed { error: Option<String> },
    /// User asked to tear the channel down.
    DisconnectRequested,
    /// The debounced close check fired; active files are re-evaluated now.
    CloseCheckElapsed,
    NoOp,
}

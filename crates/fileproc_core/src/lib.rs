//! Fileproc core: pure state machine for the processing console.
//!
//! Holds the inventory page, the selection of files slated for processing,
//! the progress ledger fed by the streaming channel, and the channel
//! connection state. All I/O is described by [`Effect`] values and executed
//! elsewhere.
mod effect;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use progress::{parse_frame, ParseError, ProgressRecord, ProgressStatus};
pub use state::{
    AppState, ConnectionState, FileDetail, FileRecord, Notice, NoticeKind, PageState, PAGE_SIZE,
};
pub use update::update;
pub use view_model::{format_size, AppViewModel, FileRowView, ProgressView};

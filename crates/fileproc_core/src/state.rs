use std::collections::{BTreeMap, BTreeSet};

use crate::progress::{ProgressRecord, ProgressStatus};
use crate::view_model::AppViewModel;

/// Inventory page size; the listing view always requests pages of five.
pub const PAGE_SIZE: u32 = 5;

/// One uploaded file as reported by the inventory service.
///
/// Immutable once fetched; the whole page is replaced on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size_bytes: u64,
    pub storage_path: String,
    pub uploaded_at: String,
    pub modified_at: String,
}

/// One fetched inventory page, replaced atomically per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub page_number: u32,
    pub page_size: u32,
    pub items: Vec<FileRecord>,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Lifecycle of the single streaming channel for this client identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-visible notification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Result of a per-file detail lookup, shown as a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetail {
    pub status: String,
    pub processed_at: Option<String>,
    pub error: Option<String>,
}

/// Whole console state. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Option<PageState>,
    selection: BTreeSet<String>,
    ledger: BTreeMap<String, ProgressRecord>,
    connection: ConnectionState,
    client_id: Option<String>,
    loading: bool,
    submitting: bool,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Option<&PageState> {
        self.page.as_ref()
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn ledger(&self) -> &BTreeMap<String, ProgressRecord> {
        &self.ledger
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True iff some ledger entry is exactly `processing`. Queued entries do
    /// not count as active; neither do terminal ones.
    pub fn has_active_files(&self) -> bool {
        self.ledger
            .values()
            .any(|record| record.status == ProgressStatus::Processing)
    }

    /// Whether `target` is a valid page to navigate to. Before the first
    /// fetch there is no known page count, so any page >= 1 is allowed.
    pub fn page_in_range(&self, target: u32) -> bool {
        if target < 1 {
            return false;
        }
        match &self.page {
            Some(page) => target <= page.total_pages,
            None => true,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    /// Returns and resets the dirty flag, used to coalesce rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.dirty = true;
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        self.dirty = true;
    }

    pub(crate) fn set_page(&mut self, page: PageState) {
        self.page = Some(page);
        self.dirty = true;
    }

    pub(crate) fn set_client_id(&mut self, client_id: String) {
        self.client_id = Some(client_id);
        self.dirty = true;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionState) {
        if self.connection != connection {
            self.connection = connection;
            self.dirty = true;
        }
    }

    pub(crate) fn toggle_selected(&mut self, file_name: String) {
        if !self.selection.remove(&file_name) {
            self.selection.insert(file_name);
        }
        self.dirty = true;
    }

    pub(crate) fn replace_selection(&mut self, names: BTreeSet<String>) {
        self.selection = names;
        self.dirty = true;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.dirty = true;
    }

    /// Last-write-wins merge: the record replaces any prior entry for the
    /// same file name wholesale, including clearing an absent `error` field.
    pub(crate) fn apply_record(&mut self, record: ProgressRecord) {
        self.ledger.insert(record.file_name.clone(), record);
        self.dirty = true;
    }

    pub(crate) fn wipe_ledger(&mut self) {
        if !self.ledger.is_empty() {
            self.ledger.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn push_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            text: text.into(),
        });
        self.dirty = true;
    }

    pub(crate) fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

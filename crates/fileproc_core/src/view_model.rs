use crate::progress::ProgressStatus;
use crate::state::{AppState, ConnectionState, Notice};

/// Read-only projection of [`AppState`] for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connected: bool,
    pub connecting: bool,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub rows: Vec<FileRowView>,
    pub selected_count: usize,
    pub loading: bool,
    pub submitting: bool,
    pub notices: Vec<Notice>,
}

/// One inventory row with its selection mark and any known progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub size_display: String,
    pub uploaded_at: String,
    pub modified_at: String,
    pub selected: bool,
    pub progress: Option<ProgressView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u8,
    pub status: ProgressStatus,
    pub processed_at: Option<String>,
    pub error: Option<String>,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        let mut view = AppViewModel {
            connected: state.connection() == ConnectionState::Open,
            connecting: state.connection() == ConnectionState::Connecting,
            selected_count: state.selection().len(),
            loading: state.is_loading(),
            submitting: state.is_submitting(),
            notices: state.notices().to_vec(),
            ..AppViewModel::default()
        };

        if let Some(page) = state.page() {
            view.page_number = page.page_number;
            view.total_pages = page.total_pages;
            view.total_items = page.total_items;
            view.has_next = page.has_next;
            view.has_previous = page.has_previous;
            view.rows = page
                .items
                .iter()
                .map(|file| FileRowView {
                    name: file.name.clone(),
                    size_display: format_size(file.size_bytes),
                    uploaded_at: file.uploaded_at.clone(),
                    modified_at: file.modified_at.clone(),
                    selected: state.selection().contains(&file.name),
                    progress: state.ledger().get(&file.name).map(|record| ProgressView {
                        percent: record.progress_percent,
                        status: record.status,
                        processed_at: record.processed_at.clone(),
                        error: record.error.clone(),
                    }),
                })
                .collect();
        }

        view
    }
}

/// Human-readable file size, 1024-based, trailing zeros trimmed.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let mut rendered = format!("{value:.2}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    format!("{rendered} {}", UNITS[exponent])
}

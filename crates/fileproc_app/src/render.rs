//! Plain-text rendering of the console view model.

use chrono::DateTime;
use fileproc_core::{AppViewModel, NoticeKind, ProgressStatus};

pub fn render(view: &AppViewModel) {
    println!();
    println!("Uploaded Files {}", connection_indicator(view));

    if view.loading {
        println!("  loading...");
    }

    if view.rows.is_empty() {
        println!("  No files found");
    } else {
        for (index, row) in view.rows.iter().enumerate() {
            let mark = if row.selected { "x" } else { " " };
            println!(
                "  [{mark}] {} {}  {}  uploaded {}  modified {}",
                index + 1,
                row.name,
                row.size_display,
                short_date(&row.uploaded_at),
                short_date(&row.modified_at),
            );
            if let Some(progress) = &row.progress {
                let status = status_label(progress.status);
                match &progress.error {
                    Some(error) => println!("      {status} {}% - {error}", progress.percent),
                    None => println!("      {status} {}%", progress.percent),
                }
            }
        }
        println!(
            "  Page {} of {} ({} total files, {} selected)",
            view.page_number, view.total_pages, view.total_items, view.selected_count
        );
    }

    if view.submitting {
        println!("  Processing...");
    }
    for notice in view.notices.iter().rev().take(3).rev() {
        match notice.kind {
            NoticeKind::Info => println!("  * {}", notice.text),
            NoticeKind::Error => println!("  ! {}", notice.text),
        }
    }
}

fn connection_indicator(view: &AppViewModel) -> &'static str {
    if view.connected {
        "[connected]"
    } else if view.connecting {
        "[connecting]"
    } else {
        "[not connected]"
    }
}

fn status_label(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Queued => "queued",
        ProgressStatus::Processing => "processing",
        ProgressStatus::Completed => "completed",
        ProgressStatus::Error => "error",
    }
}

/// Timestamps arrive as RFC 3339; fall back to the raw string when they
/// are anything else.
fn short_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::short_date;

    #[test]
    fn rfc3339_timestamps_shorten_to_dates() {
        assert_eq!(short_date("2026-08-01T10:30:00Z"), "2026-08-01");
        assert_eq!(short_date("2026-08-01T10:30:00+02:00"), "2026-08-01");
    }

    #[test]
    fn other_strings_pass_through() {
        assert_eq!(short_date("yesterday"), "yesterday");
    }
}

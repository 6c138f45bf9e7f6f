use fileproc_core::{update, AppState, Effect, FileRecord, Msg, PageState, PAGE_SIZE};

fn file(name: &str) -> FileRecord {
    FileRecord {
        name: name.to_string(),
        size_bytes: 1024,
        storage_path: format!("uploads/{name}"),
        uploaded_at: "2026-08-01T10:00:00Z".to_string(),
        modified_at: "2026-08-02T10:00:00Z".to_string(),
    }
}

/// Seven items at page size five: page 1 holds five, page 2 holds two.
fn page_of_seven(page_number: u32) -> PageState {
    let names: Vec<String> = (1..=7).map(|i| format!("file-{i}.txt")).collect();
    let start = ((page_number - 1) * PAGE_SIZE) as usize;
    let items = names
        .iter()
        .skip(start)
        .take(PAGE_SIZE as usize)
        .map(|name| file(name))
        .collect();
    PageState {
        page_number,
        page_size: PAGE_SIZE,
        items,
        total_items: 7,
        total_pages: 2,
        has_next: page_number < 2,
        has_previous: page_number > 1,
    }
}

#[test]
fn initial_page_request_fetches_page_one() {
    let state = AppState::new();
    let (_state, effects) = update(state, Msg::PageRequested(1));
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            page: 1,
            page_size: PAGE_SIZE
        }]
    );
}

#[test]
fn seven_items_split_across_two_pages() {
    let state = AppState::new();
    let (mut state, _) = update(state, Msg::PageLoaded(page_of_seven(1)));

    let view = state.view();
    assert_eq!(view.rows.len(), 5);
    assert!(view.has_next);
    assert!(!view.has_previous);
    assert_eq!(view.total_items, 7);
    assert!(state.consume_dirty());

    let (state, effects) = update(state, Msg::PageRequested(2));
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            page: 2,
            page_size: PAGE_SIZE
        }]
    );
    let (state, _) = update(state, Msg::PageLoaded(page_of_seven(2)));

    let view = state.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].name, "file-6.txt");
    assert!(!view.has_next);
    assert!(view.has_previous);
}

#[test]
fn out_of_range_page_change_is_a_noop() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::PageLoaded(page_of_seven(1)));

    let before = state.clone();
    let (state, effects) = update(state, Msg::PageRequested(0));
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, effects) = update(state, Msg::PageRequested(3));
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn failed_fetch_keeps_current_page_and_surfaces_a_notice() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::PageLoaded(page_of_seven(1)));
    let rows_before = state.view().rows;

    let (state, effects) = update(
        state,
        Msg::PageLoadFailed("connection refused".to_string()),
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.rows, rows_before);
    assert!(view
        .notices
        .iter()
        .any(|notice| notice.text.contains("Failed to fetch files")));
}

#[test]
fn loaded_page_replaces_the_previous_one_wholesale() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::PageLoaded(page_of_seven(1)));
    let (state, _) = update(state, Msg::PageLoaded(page_of_seven(2)));

    let names: Vec<_> = state.view().rows.iter().map(|row| row.name.clone()).collect();
    assert_eq!(names, vec!["file-6.txt", "file-7.txt"]);
}

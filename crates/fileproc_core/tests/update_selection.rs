use fileproc_core::{update, AppState, Effect, FileRecord, Msg, PageState};

fn small_page(names: &[&str]) -> PageState {
    PageState {
        page_number: 1,
        page_size: 5,
        items: names
            .iter()
            .map(|name| FileRecord {
                name: name.to_string(),
                size_bytes: 10,
                storage_path: format!("uploads/{name}"),
                uploaded_at: "2026-08-01T10:00:00Z".to_string(),
                modified_at: "2026-08-01T10:00:00Z".to_string(),
            })
            .collect(),
        total_items: names.len() as u64,
        total_pages: 1,
        has_next: false,
        has_previous: false,
    }
}

fn with_page(names: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::PageLoaded(small_page(names)));
    state
}

#[test]
fn toggle_flips_membership_both_ways() {
    let state = with_page(&["a.txt", "b.txt"]);

    let (state, _) = update(state, Msg::FileToggled("a.txt".to_string()));
    assert!(state.selection().contains("a.txt"));

    let (state, _) = update(state, Msg::FileToggled("a.txt".to_string()));
    assert!(state.selection().is_empty());
}

#[test]
fn select_all_toggles_between_empty_and_full_page() {
    let state = with_page(&["a.txt", "b.txt", "c.txt"]);

    let (state, _) = update(state, Msg::SelectAllToggled);
    assert_eq!(state.selection().len(), 3);

    let (state, _) = update(state, Msg::SelectAllToggled);
    assert!(state.selection().is_empty());

    // Partial selection snaps to the full page, not to empty.
    let (state, _) = update(state, Msg::FileToggled("b.txt".to_string()));
    let (state, _) = update(state, Msg::SelectAllToggled);
    assert_eq!(state.selection().len(), 3);
}

#[test]
fn submit_with_empty_selection_is_a_local_validation_failure() {
    let state = with_page(&["a.txt"]);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(state
        .view()
        .notices
        .iter()
        .any(|notice| notice.text.contains("No files selected")));
}

#[test]
fn submit_without_identity_is_rejected_locally() {
    let state = with_page(&["a.txt"]);
    let (state, _) = update(state, Msg::FileToggled("a.txt".to_string()));
    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
}

#[test]
fn successful_submit_clears_the_selection() {
    let state = with_page(&["a.txt", "b.txt"]);
    let (state, _) = update(
        state,
        Msg::IdentityReady {
            client_id: "client-7".to_string(),
        },
    );
    let (state, _) = update(state, Msg::SelectAllToggled);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitBatch {
            file_names: vec!["a.txt".to_string(), "b.txt".to_string()],
            client_id: "client-7".to_string(),
        }]
    );
    assert!(state.is_submitting());

    let (state, _) = update(state, Msg::SubmitSucceeded { submitted: 2 });
    assert!(state.selection().is_empty());
    assert!(!state.is_submitting());
    assert!(state
        .view()
        .notices
        .iter()
        .any(|notice| notice.text == "Processing started for 2 files"));
}

#[test]
fn failed_submit_keeps_selection_and_drops_the_channel() {
    let state = with_page(&["a.txt"]);
    let (state, _) = update(
        state,
        Msg::IdentityReady {
            client_id: "client-7".to_string(),
        },
    );
    let (state, _) = update(state, Msg::ChannelEstablished);
    let (state, _) = update(state, Msg::FileToggled("a.txt".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);

    let (state, effects) = update(state, Msg::SubmitFailed("503".to_string()));
    assert!(effects.contains(&Effect::CloseChannel));
    assert!(state.selection().contains("a.txt"));
}

#[test]
fn selection_survives_page_navigation() {
    let state = with_page(&["a.txt", "b.txt"]);
    let (state, _) = update(state, Msg::FileToggled("a.txt".to_string()));
    let (state, _) = update(state, Msg::PageLoaded(small_page(&["c.txt", "d.txt"])));

    assert!(state.selection().contains("a.txt"));
    // Select-all operates only on what the current page shows.
    let (state, _) = update(state, Msg::SelectAllToggled);
    assert!(state.selection().contains("c.txt"));
    assert!(state.selection().contains("d.txt"));
    assert!(!state.selection().contains("a.txt"));
}

mod common;

use common::harness;
use solace_application::Lane;
use solace_core::attachment::RawAttachment;
use solace_core::error::SolaceError;

#[tokio::test]
async fn test_initialize_loads_everything() {
    let h = harness();
    h.remote.seed_chat("Chat", &[]);
    h.remote.seed_entry("Entry");

    h.coordinator.initialize().await.unwrap();

    assert_eq!(h.coordinator.chat_store().sessions().len(), 1);
    assert_eq!(h.coordinator.journal_store().entries().len(), 1);
    assert!(h.coordinator.settings_controller().state().loaded);
}

#[tokio::test]
async fn test_initialize_failures_are_independent() {
    let h = harness();
    h.remote.seed_chat("Chat", &[]);
    h.remote.fail_on("list_entries");

    let err = h.coordinator.initialize().await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(h.coordinator.chat_store().sessions().len(), 1);
    assert!(h.notifier.saw("Error loading journal entries"));
}

#[tokio::test]
async fn test_same_lane_operations_never_overlap() {
    let h = harness();

    let (a, b, c) = tokio::join!(
        h.coordinator.new_chat(),
        h.coordinator.send_message("hello"),
        h.coordinator.refresh_chats()
    );

    a.unwrap();
    b.unwrap();
    c.unwrap();
    assert_eq!(h.remote.max_in_flight("chat"), 1);
    // The send was issued after the first create, so it reused that chat.
    assert_eq!(h.remote.calls("create_chat"), 1);
}

#[tokio::test]
async fn test_lanes_run_concurrently() {
    let h = harness();

    let (chats, journal) = tokio::join!(
        h.coordinator.refresh_chats(),
        h.coordinator.refresh_journal()
    );

    chats.unwrap();
    journal.unwrap();
    assert_eq!(h.remote.max_in_flight("chat"), 1);
    assert_eq!(h.remote.max_in_flight("all"), 2);
}

#[tokio::test]
async fn test_wipe_partial_failure_still_clears_locally() {
    let h = harness();
    h.remote.seed_chat("Chat", &[("a", "b")]);
    let entry = h.remote.seed_entry("Entry");
    h.coordinator.initialize().await.unwrap();
    let chat = h.coordinator.chat_store().sessions()[0].id.clone();
    h.coordinator.select_chat(&chat).await.unwrap();
    h.coordinator.open_journal_entry(&entry).await.unwrap();
    h.coordinator
        .attach_image(&RawAttachment::new(b"img".to_vec()))
        .unwrap();
    h.remote.fail_on("wipe_journal");

    let err = h.coordinator.wipe_memory().await.unwrap_err();

    assert!(matches!(err, SolaceError::Status { code: 500, .. }));
    assert_eq!(h.remote.calls("wipe_chats"), 1);
    assert_eq!(h.remote.chat_count(), 0);
    assert_eq!(h.remote.entry_count(), 1);
    assert!(h.coordinator.chat_store().sessions().is_empty());
    assert!(h.coordinator.journal_store().entries().is_empty());
    let view = h.coordinator.view();
    assert!(view.active_chat_id.is_none());
    assert!(view.journal_form.is_draft());
    assert!(!view.has_attachment());
    assert!(h.notifier.saw("Error clearing memory"));
    assert!(!h.notifier.saw("All memory cleared successfully"));
    assert!(!h.coordinator.loading().any());
}

#[tokio::test]
async fn test_wipe_success() {
    let h = harness();
    h.remote.seed_chat("Chat", &[]);
    h.remote.seed_entry("Entry");
    h.coordinator.initialize().await.unwrap();

    assert!(h.coordinator.wipe_memory().await.unwrap());

    assert_eq!(h.remote.chat_count(), 0);
    assert_eq!(h.remote.entry_count(), 0);
    assert!(h.notifier.saw("All memory cleared successfully"));
}

#[tokio::test]
async fn test_declined_wipe_changes_nothing() {
    let h = harness();
    h.remote.seed_chat("Chat", &[]);
    h.coordinator.refresh_chats().await.unwrap();
    h.confirmation.answer(false);

    assert!(!h.coordinator.wipe_memory().await.unwrap());

    assert_eq!(h.remote.calls("wipe_chats"), 0);
    assert_eq!(h.coordinator.chat_store().sessions().len(), 1);
    assert!(h.confirmation.prompts()[0].starts_with("Delete ALL memory?"));
}

#[tokio::test]
async fn test_view_changes_are_published() {
    let h = harness();
    let mut view = h.coordinator.subscribe();

    h.coordinator.new_chat().await.unwrap();

    assert!(view.has_changed().unwrap());
    assert!(view.borrow_and_update().active_chat_id.is_some());
    assert!(!h.coordinator.loading().is_loading(Lane::Chat));
}

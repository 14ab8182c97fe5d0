mod common;

use common::{MockRemote, harness_with};
use solace_core::settings::UserType;

fn remote_with_templates() -> MockRemote {
    let remote = MockRemote::new();
    remote.add_template("Hearing", "Use short written sentences.");
    remote.add_template("Vision", "Describe everything verbally.");
    remote
}

#[tokio::test]
async fn test_load_applies_selected_template() {
    let remote = remote_with_templates();
    remote.set_settings("stale prompt", Some("Vision"));
    let h = harness_with(remote);

    let state = h.coordinator.load_settings().await.unwrap();

    assert!(state.loaded);
    assert_eq!(state.settings.system_prompt, "Describe everything verbally.");
    assert_eq!(
        state.template_preview.as_deref(),
        Some("Describe everything verbally.")
    );
    assert_eq!(state.catalog.len(), 2);
}

#[tokio::test]
async fn test_select_overwrites_prompt_and_clear_keeps_it() {
    let remote = remote_with_templates();
    remote.set_settings("Be kind.", None);
    let h = harness_with(remote);
    h.coordinator.load_settings().await.unwrap();
    h.coordinator.edit_prompt("my own edits");

    let state = h.coordinator.select_template(Some("Hearing")).await.unwrap();
    assert_eq!(state.settings.system_prompt, "Use short written sentences.");
    assert_eq!(state.settings.user_type(), UserType::SpeciallyAbled);

    let state = h.coordinator.select_template(None).await.unwrap();
    assert_eq!(state.settings.system_prompt, "Use short written sentences.");
    assert!(state.template_preview.is_none());
    assert_eq!(state.settings.user_type(), UserType::Regular);
}

#[tokio::test]
async fn test_unknown_template_is_not_found() {
    let h = harness_with(remote_with_templates());
    h.coordinator.load_settings().await.unwrap();

    let err = h.coordinator.select_template(Some("Mobility")).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(h.coordinator.settings_controller().state().settings.selected_template.is_none());
}

#[tokio::test]
async fn test_save_derives_user_type() {
    let h = harness_with(remote_with_templates());

    h.coordinator
        .save_settings("Speak slowly.", Some("Hearing".to_string()))
        .await
        .unwrap();
    h.coordinator.save_settings("Plain.", None).await.unwrap();

    let saved = h.remote.saved_settings();
    assert_eq!(saved[0].user_type, UserType::SpeciallyAbled);
    assert_eq!(saved[0].disability_type.as_deref(), Some("Hearing"));
    assert_eq!(saved[1].user_type, UserType::Regular);
    assert!(h.notifier.saw("Settings saved successfully"));
}

#[tokio::test]
async fn test_save_refreshes_template_preview() {
    let remote = remote_with_templates();
    remote.set_settings("Be kind.", Some("Vision"));
    let h = harness_with(remote);
    h.coordinator.load_settings().await.unwrap();

    h.coordinator
        .save_settings("Speak slowly.", Some("Hearing".to_string()))
        .await
        .unwrap();
    let state = h.coordinator.settings_controller().state();
    assert_eq!(
        state.template_preview.as_deref(),
        Some("Use short written sentences.")
    );

    h.coordinator.save_settings("Plain.", None).await.unwrap();
    assert!(h.coordinator.settings_controller().state().template_preview.is_none());
}

#[tokio::test]
async fn test_failed_load_leaves_state_unloaded() {
    let remote = remote_with_templates();
    remote.fail_on("templates");
    let h = harness_with(remote);

    h.coordinator.load_settings().await.unwrap_err();

    assert!(!h.coordinator.settings_controller().state().loaded);
    assert!(h.notifier.saw("Error loading settings"));
}

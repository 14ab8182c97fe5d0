use crate::display;
use anyhow::Result;
use solace_application::SessionCoordinator;

pub async fn show(coordinator: &SessionCoordinator) -> Result<()> {
    let state = coordinator.load_settings().await?;
    display::print_settings(&state);
    Ok(())
}

pub async fn templates(coordinator: &SessionCoordinator) -> Result<()> {
    let state = coordinator.load_settings().await?;
    display::print_templates(&state);
    Ok(())
}

/// Selects a template and saves its text as the system prompt.
pub async fn select(coordinator: &SessionCoordinator, name: &str) -> Result<()> {
    coordinator.load_settings().await?;
    let state = coordinator.select_template(Some(name)).await?;
    coordinator
        .save_settings(
            &state.settings.system_prompt,
            state.settings.selected_template.clone(),
        )
        .await?;
    Ok(())
}

pub async fn save(
    coordinator: &SessionCoordinator,
    prompt: &str,
    template: Option<String>,
) -> Result<()> {
    coordinator.save_settings(prompt, template).await?;
    Ok(())
}

use crate::display;
use anyhow::{Result, anyhow};
use solace_application::SessionCoordinator;
use solace_infrastructure::attachment_loader::load_image;
use std::path::Path;

pub async fn list(coordinator: &SessionCoordinator) -> Result<()> {
    let sessions = coordinator.refresh_chats().await?;
    display::print_chats(&sessions);
    Ok(())
}

pub async fn show(coordinator: &SessionCoordinator, chat_id: &str) -> Result<()> {
    coordinator.refresh_chats().await?;
    let session = coordinator.select_chat(chat_id).await?;
    display::print_messages(&session.messages);
    Ok(())
}

/// Sends one message. Without `--chat` a new conversation is started.
pub async fn send(
    coordinator: &SessionCoordinator,
    text: &str,
    chat_id: Option<&str>,
    image: Option<&Path>,
) -> Result<()> {
    if let Some(chat_id) = chat_id {
        coordinator.refresh_chats().await?;
        coordinator.select_chat(chat_id).await?;
    }
    if let Some(path) = image {
        let raw = load_image(path)
            .await
            .map_err(|e| anyhow!("Failed to load image {}: {}", path.display(), e))?;
        coordinator.attach_image(&raw)?;
    }

    let pair = coordinator.send_message(text).await?;
    display::print_message(&pair);
    Ok(())
}

pub async fn delete(coordinator: &SessionCoordinator, chat_id: &str) -> Result<()> {
    coordinator.delete_chat(chat_id).await?;
    Ok(())
}

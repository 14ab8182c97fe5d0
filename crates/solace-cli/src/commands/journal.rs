use crate::display;
use anyhow::Result;
use solace_application::SessionCoordinator;

pub async fn list(coordinator: &SessionCoordinator) -> Result<()> {
    let entries = coordinator.refresh_journal().await?;
    display::print_entries(&entries);
    Ok(())
}

pub async fn show(coordinator: &SessionCoordinator, entry_id: &str) -> Result<()> {
    coordinator.refresh_journal().await?;
    let form = coordinator.open_journal_entry(entry_id).await?;
    display::print_form(&form);
    Ok(())
}

pub async fn new(coordinator: &SessionCoordinator, content: &str) -> Result<()> {
    coordinator.new_journal_entry().await;
    let entry = coordinator.save_journal(content).await?;
    println!("{}", entry.title());
    Ok(())
}

/// Replaces the content of an entry, keeping its stored analysis.
pub async fn update(coordinator: &SessionCoordinator, entry_id: &str, content: &str) -> Result<()> {
    coordinator.refresh_journal().await?;
    coordinator.open_journal_entry(entry_id).await?;
    coordinator.save_journal(content).await?;
    Ok(())
}

/// Prints the analysis of `content`. Nothing is saved.
pub async fn analyze(coordinator: &SessionCoordinator, content: &str) -> Result<()> {
    let analysis = coordinator.analyze_journal(content).await?;
    println!("{}", analysis);
    Ok(())
}

pub async fn delete(coordinator: &SessionCoordinator, entry_id: &str) -> Result<()> {
    coordinator.refresh_journal().await?;
    coordinator.open_journal_entry(entry_id).await?;
    coordinator.delete_journal_entry().await?;
    Ok(())
}

use anyhow::Result;
use solace_application::SessionCoordinator;

pub async fn wipe(coordinator: &SessionCoordinator) -> Result<()> {
    coordinator.wipe_memory().await?;
    Ok(())
}

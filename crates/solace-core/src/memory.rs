//! Bulk deletion of everything the assistant remembers.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Part of the remote memory a wipe targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    Chats,
    Journal,
}

/// Remote memory wipe.
///
/// The HTTP implementation sends `DELETE /memory?scope=<scope>`. A server
/// that only knows the bare `DELETE /memory` ignores the query and wipes
/// both scopes on each call, so a per-scope failure is only meaningful
/// against a server that honours `scope`.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Deletes every stored item in the given scope.
    async fn wipe(&self, scope: MemoryScope) -> Result<()>;
}

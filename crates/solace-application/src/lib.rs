//! Application layer: cached stores, operation lanes and the coordinator
//! that the presentation layer drives.

pub mod chat_store;
pub mod coordinator;
pub mod journal_store;
pub mod lane;
pub mod settings_controller;
pub mod synced;
pub mod view;

pub use chat_store::ChatStore;
pub use coordinator::{RemoteServices, SessionCoordinator};
pub use journal_store::JournalStore;
pub use lane::{Lane, LaneGate, LaneGuard, LoadingIndicator};
pub use settings_controller::{SettingsController, SettingsState};
pub use synced::Synced;
pub use view::CoordinatorView;

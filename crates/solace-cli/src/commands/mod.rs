pub mod chats;
pub mod journal;
pub mod memory;
pub mod settings;

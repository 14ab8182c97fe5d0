//! Infrastructure layer for the Solace client.
//!
//! HTTP access to the remote service, wire formats, configuration loading
//! and local file access.

pub mod attachment_loader;
pub mod config_service;
pub mod dto;
pub mod http_client;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_client::HttpRemoteClient;
pub use crate::paths::SolacePaths;

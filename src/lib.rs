pub mod libs;

use crate::libs::api::api_traits::ApiError;
use crate::libs::core::config::ConfigError;
use crate::libs::storage::storage_traits::StoreError;
use thiserror::Error;

pub use crate::libs::core::config::ChatConfig;
pub use crate::libs::ffi::session::{ChatSession, FeedListener};
pub use crate::libs::logging::init_logging;

uniffi::setup_scaffolding!();

/// The single error type crossing the crate boundary. Callers that only
/// care whether an operation worked can treat every variant alike.
#[derive(Error, Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ChatError {
    #[error("Network Error: {0}")]
    Network(#[from] ApiError),
    #[error("Storage Error: {0}")]
    Storage(#[from] StoreError),
    #[error("Background Task Error: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
}

//! Bridge error types

use contracts::ContractError;
use thiserror::Error;

/// Bridge specific error
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Command path not in the catalogue
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Result alias
pub type Result<T> = std::result::Result<T, BridgeError>;

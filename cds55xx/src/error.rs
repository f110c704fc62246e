//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] cds55xx_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] cds55xx_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] cds55xx_types::Error),
}

impl Error {
    /// Check if the failure happened on the physical link
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

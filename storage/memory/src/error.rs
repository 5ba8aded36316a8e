use keyseek_core::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("lock poisoned: {0}")]
    Poisoned(&'static str),
}

impl From<MemoryError> for StorageError {
    fn from(err: MemoryError) -> Self { StorageError::backend(err) }
}

use crate::services::EntryError;
use wildmap_core::{AppError, NetworkError};

impl From<EntryError> for AppError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::Network(s) => AppError::Transport(NetworkError::ConnectionFailed(s)),
            EntryError::Storage(s) | EntryError::Other(s) => AppError::Storage(s),
        }
    }
}

use thiserror::Error;

use crate::domain::ReservationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Book already exists: {0}")]
    BookAlreadyExists(String),

    #[error("Unknown region group: {0}")]
    UnknownRegion(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::InvalidArgument(message) => AppError::InvalidArgument(message),
        }
    }
}

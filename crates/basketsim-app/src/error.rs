// Service-level error: a domain rejection or a storage failure.

use basketsim_core::LeagueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    League(#[from] LeagueError),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// The domain error, if this is one.
    pub fn league(&self) -> Option<&LeagueError> {
        match self {
            ServiceError::League(e) => Some(e),
            ServiceError::Storage(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

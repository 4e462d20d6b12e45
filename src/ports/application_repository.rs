use async_trait::async_trait;

use crate::domain::applications::{ApplicationCard, ApplicationStatus};
use crate::domain::foundation::{ApplicationId, OwnerId};

/// Port for tenant applications shown on the pipeline board.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Lists applications for all properties of an owner, oldest first.
    async fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApplicationCard>, ApplicationError>;

    /// Moves an application from `from` to `to`.
    ///
    /// The write only applies while the stored status is still `from`;
    /// otherwise it fails with `InvalidTransition` and nothing changes.
    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<(), ApplicationError>;
}

/// Errors that can occur during pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Application not found: {0}")]
    NotFound(ApplicationId),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ApplicationError {
    /// The stored status moved on since the board was read.
    pub fn stale_status(id: ApplicationId, expected: ApplicationStatus, actual: ApplicationStatus) -> Self {
        ApplicationError::InvalidTransition(format!(
            "application {} is {}, expected {}",
            id, actual, expected
        ))
    }
}

impl From<sqlx::Error> for ApplicationError {
    fn from(err: sqlx::Error) -> Self {
        ApplicationError::Database(err.to_string())
    }
}

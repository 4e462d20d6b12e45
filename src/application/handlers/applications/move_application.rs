//! MoveApplicationHandler - Command handler for pipeline moves.
//!
//! Covers column drops, card drops and the approve/reject quick actions.
//! Only a real move is persisted, and only if the stored status still
//! matches the one the move was planned from.

use std::sync::Arc;

use crate::domain::applications::{
    ApplicationCard, MoveOutcome, PipelineBoard, PipelineCommand, PipelineError,
};
use crate::domain::foundation::{ApplicationId, OwnerId};
use crate::ports::{ApplicationError, ApplicationRepository};

/// Command to move one application on the owner's board.
#[derive(Debug, Clone)]
pub struct MoveApplicationCommand {
    pub owner_id: OwnerId,
    pub application_id: ApplicationId,
    pub command: PipelineCommand,
}

#[derive(Debug, Clone)]
pub struct MoveApplicationResult {
    pub outcome: MoveOutcome,
    pub card: ApplicationCard,
}

pub struct MoveApplicationHandler {
    repository: Arc<dyn ApplicationRepository>,
}

impl MoveApplicationHandler {
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: MoveApplicationCommand) -> Result<MoveApplicationResult, ApplicationError> {
        let cards = self.repository.list_for_owner(&cmd.owner_id).await?;
        let mut board = PipelineBoard::new(cards);

        let outcome = board
            .apply(cmd.application_id, cmd.command)
            .map_err(|err| match err {
                PipelineError::CardNotFound(id) => ApplicationError::NotFound(id),
                PipelineError::InvalidTransition(e) => ApplicationError::InvalidTransition(e.to_string()),
            })?;

        if let MoveOutcome::Moved { from, to } = outcome {
            self.repository.update_status(cmd.application_id, from, to).await?;
            tracing::info!(
                application_id = %cmd.application_id,
                from = %from,
                to = %to,
                "Application moved"
            );
        }

        let card = board
            .card(&cmd.application_id)
            .cloned()
            .ok_or(ApplicationError::NotFound(cmd.application_id))?;

        Ok(MoveApplicationResult { outcome, card })
    }
}

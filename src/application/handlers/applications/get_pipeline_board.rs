//! GetPipelineBoardHandler - Query handler for the application pipeline.

use std::sync::Arc;

use crate::domain::applications::PipelineBoard;
use crate::domain::foundation::OwnerId;
use crate::ports::{ApplicationError, ApplicationRepository};

#[derive(Debug, Clone)]
pub struct GetPipelineBoardQuery {
    pub owner_id: OwnerId,
}

pub struct GetPipelineBoardHandler {
    repository: Arc<dyn ApplicationRepository>,
}

impl GetPipelineBoardHandler {
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPipelineBoardQuery) -> Result<PipelineBoard, ApplicationError> {
        let cards = self.repository.list_for_owner(&query.owner_id).await?;
        Ok(PipelineBoard::new(cards))
    }
}

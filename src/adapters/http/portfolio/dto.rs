//! HTTP DTOs for portfolio and pipeline endpoints.
//!
//! The dashboard and listing view models are already designed for
//! serialization, so they are returned as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::RefreshOutcome;
use crate::domain::applications::{
    ApplicationCard, ApplicationStatus, MoveOutcome, PipelineBoard, QuickActions,
};
use crate::domain::portfolio::{OwnerDashboard, PropertyListing};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameter pinning the evaluation day. Defaults to today (UTC).
#[derive(Debug, Default, Deserialize)]
pub struct AsOfParams {
    pub as_of: Option<NaiveDate>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub outcome: RefreshOutcome,
    pub dashboard: Option<OwnerDashboard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyListing>,
    /// Properties before filtering.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    #[serde(flatten)]
    pub card: ApplicationCard,
    pub quick_actions: QuickActions,
}

impl From<ApplicationCard> for CardResponse {
    fn from(card: ApplicationCard) -> Self {
        Self {
            quick_actions: card.quick_actions(),
            card,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnResponse {
    pub status: ApplicationStatus,
    pub cards: Vec<CardResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineBoardResponse {
    pub columns: Vec<ColumnResponse>,
}

impl From<&PipelineBoard> for PipelineBoardResponse {
    fn from(board: &PipelineBoard) -> Self {
        Self {
            columns: board
                .columns()
                .into_iter()
                .map(|column| ColumnResponse {
                    status: column.status,
                    cards: column.cards.into_iter().map(CardResponse::from).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    pub card: CardResponse,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("INVALID_STATE_TRANSITION", message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("UNAVAILABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

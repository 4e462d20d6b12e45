//! HTTP handlers for portfolio and pipeline endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, Utc};

use crate::application::handlers::{
    DashboardRefresher, GetOwnerDashboardHandler, GetOwnerDashboardQuery, GetPipelineBoardHandler,
    GetPipelineBoardQuery, ListPropertiesHandler, ListPropertiesQuery, MoveApplicationCommand,
    MoveApplicationHandler, RefreshOutcome,
};
use crate::domain::applications::{DropTarget, PipelineCommand};
use crate::domain::foundation::{ApplicationId, OwnerId};
use crate::domain::portfolio::{OwnerDashboard, PropertyFilter};
use crate::ports::{ApplicationError, ApplicationRepository, PortfolioError, PortfolioReader};

use super::dto::{
    AsOfParams, ErrorResponse, MoveResponse, PipelineBoardResponse, PropertyListResponse,
    RefreshResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Portfolio API error that implements IntoResponse.
#[derive(Debug)]
pub enum PortfolioApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for PortfolioApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PortfolioApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            PortfolioApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Application", &msg))
            }
            PortfolioApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            PortfolioApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::unavailable(msg))
            }
            PortfolioApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<PortfolioError> for PortfolioApiError {
    fn from(error: PortfolioError) -> Self {
        match error {
            PortfolioError::InvalidInput(msg) => PortfolioApiError::BadRequest(msg),
            PortfolioError::Database(msg) => {
                tracing::error!(error = %msg, "Portfolio query failed");
                PortfolioApiError::Internal(format!("Database error: {}", msg))
            }
        }
    }
}

impl From<ApplicationError> for PortfolioApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::NotFound(id) => PortfolioApiError::NotFound(id.to_string()),
            ApplicationError::InvalidTransition(msg) => PortfolioApiError::Conflict(msg),
            ApplicationError::Database(msg) => {
                tracing::error!(error = %msg, "Application query failed");
                PortfolioApiError::Internal(format!("Database error: {}", msg))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing portfolio dependencies.
#[derive(Clone)]
pub struct PortfolioAppState {
    pub portfolio_reader: Arc<dyn PortfolioReader>,
    pub application_repository: Arc<dyn ApplicationRepository>,
    pub refresher: Arc<DashboardRefresher>,
}

impl PortfolioAppState {
    pub fn new(
        portfolio_reader: Arc<dyn PortfolioReader>,
        application_repository: Arc<dyn ApplicationRepository>,
    ) -> Self {
        let refresher = Arc::new(DashboardRefresher::new(GetOwnerDashboardHandler::new(
            portfolio_reader.clone(),
        )));
        Self {
            portfolio_reader,
            application_repository,
            refresher,
        }
    }

    pub fn list_properties_handler(&self) -> ListPropertiesHandler {
        ListPropertiesHandler::new(self.portfolio_reader.clone())
    }

    pub fn get_pipeline_board_handler(&self) -> GetPipelineBoardHandler {
        GetPipelineBoardHandler::new(self.application_repository.clone())
    }

    pub fn move_application_handler(&self) -> MoveApplicationHandler {
        MoveApplicationHandler::new(self.application_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Owner Context
// ════════════════════════════════════════════════════════════════════════════════

/// Owner identity taken from the `x-user-id` header set by the auth proxy.
#[derive(Debug, Clone)]
pub struct AuthenticatedOwner {
    pub owner_id: OwnerId,
}

/// Rejection type for AuthenticatedOwner extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedOwner
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner_id = parts
            .headers
            .get("x-user-id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| OwnerId::new(s.trim()).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedOwner { owner_id })
    }
}

fn evaluation_day(params: &AsOfParams) -> NaiveDate {
    params.as_of.unwrap_or_else(|| Utc::now().date_naive())
}

fn parse_application_id(raw: &str) -> Result<ApplicationId, PortfolioApiError> {
    raw.parse()
        .map_err(|_| PortfolioApiError::BadRequest("Invalid application ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Portfolio Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/portfolio/dashboard
///
/// Returns the cached dashboard, deriving it on first access.
pub async fn get_dashboard(
    State(state): State<PortfolioAppState>,
    Query(params): Query<AsOfParams>,
    owner: AuthenticatedOwner,
) -> Result<Json<OwnerDashboard>, PortfolioApiError> {
    let query = GetOwnerDashboardQuery {
        owner_id: owner.owner_id,
        as_of: evaluation_day(&params),
    };

    let dashboard = state
        .refresher
        .current(query)
        .await?
        .ok_or_else(|| PortfolioApiError::Unavailable("Dashboard is being prepared".to_string()))?;

    Ok(Json(dashboard.as_ref().clone()))
}

/// POST /api/portfolio/dashboard/refresh
///
/// Runs a new derivation pass. Answers 202 when one is already running.
pub async fn refresh_dashboard(
    State(state): State<PortfolioAppState>,
    Query(params): Query<AsOfParams>,
    owner: AuthenticatedOwner,
) -> Result<impl IntoResponse, PortfolioApiError> {
    let query = GetOwnerDashboardQuery {
        owner_id: owner.owner_id,
        as_of: evaluation_day(&params),
    };

    let result = state.refresher.refresh(query).await?;
    let status = match result.outcome {
        RefreshOutcome::Refreshed => StatusCode::OK,
        RefreshOutcome::InFlight => StatusCode::ACCEPTED,
    };
    let response = RefreshResponse {
        outcome: result.outcome,
        dashboard: result.dashboard.as_deref().cloned(),
    };

    Ok((status, Json(response)))
}

/// GET /api/portfolio/properties
///
/// Returns the filtered and sorted portfolio grid.
pub async fn list_properties(
    State(state): State<PortfolioAppState>,
    Query(filter): Query<PropertyFilter>,
    Query(params): Query<AsOfParams>,
    owner: AuthenticatedOwner,
) -> Result<Json<PropertyListResponse>, PortfolioApiError> {
    let query = ListPropertiesQuery {
        owner_id: owner.owner_id,
        filter,
        as_of: evaluation_day(&params),
    };

    let result = state.list_properties_handler().handle(query).await?;

    Ok(Json(PropertyListResponse {
        properties: result.listings,
        total: result.total,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Pipeline Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/portfolio/applications
pub async fn get_pipeline_board(
    State(state): State<PortfolioAppState>,
    owner: AuthenticatedOwner,
) -> Result<Json<PipelineBoardResponse>, PortfolioApiError> {
    let board = state
        .get_pipeline_board_handler()
        .handle(GetPipelineBoardQuery {
            owner_id: owner.owner_id,
        })
        .await?;

    Ok(Json(PipelineBoardResponse::from(&board)))
}

async fn run_move(
    state: &PortfolioAppState,
    owner: AuthenticatedOwner,
    raw_id: &str,
    command: PipelineCommand,
) -> Result<Json<MoveResponse>, PortfolioApiError> {
    let application_id = parse_application_id(raw_id)?;
    let cmd = MoveApplicationCommand {
        owner_id: owner.owner_id.clone(),
        application_id,
        command,
    };

    let result = state.move_application_handler().handle(cmd).await?;

    // Pending counts feed the dashboard.
    state.refresher.invalidate(&owner.owner_id).await;

    Ok(Json(MoveResponse {
        outcome: result.outcome,
        card: result.card.into(),
    }))
}

/// POST /api/applications/:id/move
///
/// Body is `{"column": "<status>"}` or `{"card": "<application id>"}`.
pub async fn move_application(
    State(state): State<PortfolioAppState>,
    Path(id): Path<String>,
    owner: AuthenticatedOwner,
    Json(target): Json<DropTarget>,
) -> Result<Json<MoveResponse>, PortfolioApiError> {
    run_move(&state, owner, &id, PipelineCommand::Drop(target)).await
}

/// POST /api/applications/:id/approve
pub async fn approve_application(
    State(state): State<PortfolioAppState>,
    Path(id): Path<String>,
    owner: AuthenticatedOwner,
) -> Result<Json<MoveResponse>, PortfolioApiError> {
    run_move(&state, owner, &id, PipelineCommand::Approve).await
}

/// POST /api/applications/:id/reject
pub async fn reject_application(
    State(state): State<PortfolioAppState>,
    Path(id): Path<String>,
    owner: AuthenticatedOwner,
) -> Result<Json<MoveResponse>, PortfolioApiError> {
    run_move(&state, owner, &id, PipelineCommand::Reject).await
}

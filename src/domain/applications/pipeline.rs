//! Application pipeline board.
//!
//! Cards only change column through an explicit [`PipelineCommand`]. Dropping
//! a card onto another card moves it into that card's column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::status::ApplicationStatus;
use crate::domain::foundation::{ApplicationId, PropertyId, StateMachine, ValidationError};

/// A tenant application as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCard {
    pub id: ApplicationId,
    pub property_id: PropertyId,
    pub applicant_name: String,
    pub status: ApplicationStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ApplicationCard {
    pub fn new(property_id: PropertyId, applicant_name: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::new(),
            property_id,
            applicant_name: applicant_name.into(),
            status: ApplicationStatus::Pending,
            submitted_at: None,
        }
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Approve/reject buttons are only offered on undecided cards.
    pub fn quick_actions(&self) -> QuickActions {
        let open = !self.status.is_terminal();
        QuickActions {
            can_approve: open,
            can_reject: open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActions {
    pub can_approve: bool,
    pub can_reject: bool,
}

/// Where a dragged card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    Column(ApplicationStatus),
    Card(ApplicationId),
}

/// A user action on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineCommand {
    Drop(DropTarget),
    Approve,
    Reject,
}

/// Result of applying a command to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum MoveOutcome {
    Moved {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    /// Dropped back into its own column.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Application not found: {0}")]
    CardNotFound(ApplicationId),

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),
}

/// Plans the move of a card currently in `current` to `target`.
pub fn plan_move(
    current: ApplicationStatus,
    target: ApplicationStatus,
) -> Result<MoveOutcome, PipelineError> {
    if current == target {
        return Ok(MoveOutcome::Unchanged);
    }
    let to = current.transition_to(target)?;
    Ok(MoveOutcome::Moved { from: current, to })
}

/// One column of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineColumn {
    pub status: ApplicationStatus,
    pub cards: Vec<ApplicationCard>,
}

/// All applications of a portfolio, arranged by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineBoard {
    cards: Vec<ApplicationCard>,
}

impl PipelineBoard {
    pub fn new(cards: Vec<ApplicationCard>) -> Self {
        Self { cards }
    }

    pub fn card(&self, id: &ApplicationId) -> Option<&ApplicationCard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Columns in fixed order; cards keep their relative order.
    pub fn columns(&self) -> Vec<PipelineColumn> {
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| PipelineColumn {
                status,
                cards: self
                    .cards
                    .iter()
                    .filter(|card| card.status == status)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.status == ApplicationStatus::Pending)
            .count()
    }

    /// Resolves the column a command would send a card to.
    pub fn resolve_target(&self, command: PipelineCommand) -> Result<ApplicationStatus, PipelineError> {
        match command {
            PipelineCommand::Approve => Ok(ApplicationStatus::Approved),
            PipelineCommand::Reject => Ok(ApplicationStatus::Rejected),
            PipelineCommand::Drop(DropTarget::Column(status)) => Ok(status),
            PipelineCommand::Drop(DropTarget::Card(other)) => self
                .card(&other)
                .map(|card| card.status)
                .ok_or(PipelineError::CardNotFound(other)),
        }
    }

    /// Applies `command` to the card `id`.
    ///
    /// Approve and reject always fail on a decided card, even one already in
    /// the requested column.
    pub fn apply(
        &mut self,
        id: ApplicationId,
        command: PipelineCommand,
    ) -> Result<MoveOutcome, PipelineError> {
        let target = self.resolve_target(command)?;
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or(PipelineError::CardNotFound(id))?;

        let quick_action = matches!(command, PipelineCommand::Approve | PipelineCommand::Reject);
        if quick_action && card.status.is_decided() {
            return Err(ValidationError::invalid_transition(card.status, target).into());
        }

        let outcome = plan_move(card.status, target)?;
        if let MoveOutcome::Moved { to, .. } = outcome {
            card.status = to;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    fn board() -> (PipelineBoard, Vec<ApplicationId>) {
        let property = PropertyId::new();
        let cards = vec![
            ApplicationCard::new(property, "Ada"),
            ApplicationCard::new(property, "Ben").with_status(Reviewing),
            ApplicationCard::new(property, "Cleo").with_status(Approved),
            ApplicationCard::new(property, "Dev"),
        ];
        let ids = cards.iter().map(|c| c.id).collect();
        (PipelineBoard::new(cards), ids)
    }

    #[test]
    fn columns_follow_pipeline_order() {
        let (board, _) = board();
        let columns = board.columns();

        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec![Pending, Reviewing, Approved, Rejected]);
        let pending: Vec<_> = columns[0].cards.iter().map(|c| c.applicant_name.as_str()).collect();
        assert_eq!(pending, vec!["Ada", "Dev"]);
        assert!(columns[3].cards.is_empty());
    }

    #[test]
    fn drop_on_column_moves_card() {
        let (mut board, ids) = board();
        let outcome = board.apply(ids[0], PipelineCommand::Drop(DropTarget::Column(Reviewing)));

        assert_eq!(outcome, Ok(MoveOutcome::Moved { from: Pending, to: Reviewing }));
        assert_eq!(board.card(&ids[0]).map(|c| c.status), Some(Reviewing));
    }

    #[test]
    fn drop_on_card_infers_that_cards_column() {
        let (mut board, ids) = board();
        let outcome = board.apply(ids[3], PipelineCommand::Drop(DropTarget::Card(ids[1])));

        assert_eq!(outcome, Ok(MoveOutcome::Moved { from: Pending, to: Reviewing }));
    }

    #[test]
    fn drop_on_own_column_is_unchanged() {
        let (mut board, ids) = board();
        let outcome = board.apply(ids[0], PipelineCommand::Drop(DropTarget::Card(ids[3])));
        assert_eq!(outcome, Ok(MoveOutcome::Unchanged));
        assert_eq!(board.pending_count(), 2);
    }

    #[test]
    fn approve_and_reject_commands_decide_the_card() {
        let (mut board, ids) = board();
        assert_eq!(
            board.apply(ids[1], PipelineCommand::Approve),
            Ok(MoveOutcome::Moved { from: Reviewing, to: Approved })
        );
        assert_eq!(
            board.apply(ids[0], PipelineCommand::Reject),
            Ok(MoveOutcome::Moved { from: Pending, to: Rejected })
        );
    }

    #[test]
    fn decided_card_cannot_move() {
        let (mut board, ids) = board();
        let result = board.apply(ids[2], PipelineCommand::Drop(DropTarget::Column(Pending)));

        assert!(matches!(result, Err(PipelineError::InvalidTransition(_))));
        assert_eq!(board.card(&ids[2]).map(|c| c.status), Some(Approved));
    }

    #[test]
    fn quick_actions_on_decided_card_fail_in_either_direction() {
        let (mut board, ids) = board();

        let again = board.apply(ids[2], PipelineCommand::Approve);
        let flip = board.apply(ids[2], PipelineCommand::Reject);

        assert!(matches!(again, Err(PipelineError::InvalidTransition(_))));
        assert!(matches!(flip, Err(PipelineError::InvalidTransition(_))));
        assert_eq!(board.card(&ids[2]).map(|c| c.status), Some(Approved));
    }

    #[test]
    fn decided_card_dropped_on_own_column_is_unchanged() {
        let (mut board, ids) = board();
        let outcome = board.apply(ids[2], PipelineCommand::Drop(DropTarget::Column(Approved)));
        assert_eq!(outcome, Ok(MoveOutcome::Unchanged));
    }

    #[test]
    fn unknown_cards_are_reported() {
        let (mut board, ids) = board();
        let ghost = ApplicationId::new();

        assert_eq!(
            board.apply(ghost, PipelineCommand::Approve),
            Err(PipelineError::CardNotFound(ghost))
        );
        assert_eq!(
            board.apply(ids[0], PipelineCommand::Drop(DropTarget::Card(ghost))),
            Err(PipelineError::CardNotFound(ghost))
        );
    }

    #[test]
    fn quick_actions_hidden_on_decided_cards() {
        let (board, ids) = board();
        let open = board.card(&ids[0]).unwrap().quick_actions();
        let decided = board.card(&ids[2]).unwrap().quick_actions();

        assert!(open.can_approve && open.can_reject);
        assert!(!decided.can_approve && !decided.can_reject);
    }

    #[test]
    fn reading_the_board_does_not_change_it() {
        let (board, _) = board();
        let before = board.clone();
        let _ = board.columns();
        let _ = board.pending_count();
        assert_eq!(board, before);
    }

    #[test]
    fn drop_target_deserializes_from_tagged_json() {
        let target: DropTarget = serde_json::from_str(r#"{"column":"approved"}"#).unwrap();
        assert_eq!(target, DropTarget::Column(Approved));
    }
}

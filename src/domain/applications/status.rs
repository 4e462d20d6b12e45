//! ApplicationStatus enum for the tenant application pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Pipeline stage of a tenant application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Pipeline columns, left to right.
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    /// Approved and rejected applications are decided.
    pub fn is_decided(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

impl StateMachine for ApplicationStatus {
    /// Undecided applications may move to any other column.
    fn can_transition_to(&self, target: &Self) -> bool {
        !self.is_decided() && self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewing => "Reviewing",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(ApplicationStatus::default(), Pending);
    }

    #[test]
    fn pending_can_move_to_reviewing() {
        assert_eq!(Pending.transition_to(Reviewing), Ok(Reviewing));
    }

    #[test]
    fn reviewing_can_move_back_to_pending() {
        assert!(Reviewing.can_transition_to(&Pending));
    }

    #[test]
    fn undecided_applications_can_be_decided() {
        for from in [Pending, Reviewing] {
            assert!(from.can_transition_to(&Approved));
            assert!(from.can_transition_to(&Rejected));
        }
    }

    #[test]
    fn decided_applications_are_terminal() {
        assert!(Approved.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(Approved.transition_to(Pending).is_err());
        assert!(Rejected.transition_to(Approved).is_err());
    }

    #[test]
    fn staying_in_place_is_not_a_transition() {
        assert!(!Pending.can_transition_to(&Pending));
    }

    #[test]
    fn valid_transitions_list_other_columns() {
        assert_eq!(Reviewing.valid_transitions(), vec![Pending, Approved, Rejected]);
        assert!(Approved.valid_transitions().is_empty());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(serde_json::to_string(&Reviewing).unwrap(), "\"reviewing\"");
        let status: ApplicationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, Rejected);
    }
}

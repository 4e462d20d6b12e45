//! State machine trait for status enums.
//!
//! Gives status enums a uniform way to validate and perform transitions.
//! Transitions only ever happen through an explicit call to
//! [`StateMachine::transition_to`]; reading a status never changes it.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ApplicationStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         !self.is_decided() && self != target
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         Self::ALL.into_iter().filter(|s| self.can_transition_to(s)).collect()
///     }
/// }
///
/// let next = ApplicationStatus::Pending.transition_to(ApplicationStatus::Reviewing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Rentwise domain.

mod errors;
mod ids;
mod percentage;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{ApplicationId, OwnerId, PropertyId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;

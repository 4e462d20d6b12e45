//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine, percentage)
//! - `portfolio` - Dashboard derivation and portfolio grid filtering
//! - `applications` - Tenant application pipeline board

pub mod applications;
pub mod foundation;
pub mod portfolio;

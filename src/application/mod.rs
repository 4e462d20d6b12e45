//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Query handlers derive read models; command handlers move applications.

pub mod handlers;

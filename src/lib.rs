//! Rentwise - Portfolio state derivation for rental property owners
//!
//! Turns raw portfolio records (properties, tenancies, rent payments,
//! maintenance aggregates, tenant applications) into the owner dashboard,
//! the filtered portfolio grid and the application pipeline board.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

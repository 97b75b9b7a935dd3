//! Kanban board: ordered columns holding ordered tasks.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Form validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The string-keyed request boundary in [`actions`]

pub mod actions;
pub mod adapters;
pub mod domain;
pub mod ports;
pub mod seed;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;

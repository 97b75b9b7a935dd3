//! Kanban board: ordered columns of ordered tasks over `PostgreSQL`.
//!
//! This crate provides the board's domain model, validation, persistence
//! adapters, and a caching client.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`board`]: Columns, tasks, ordering, and the request boundary
//! - [`client`]: Query cache and the client that maintains it
//! - [`config`]: TOML and environment configuration
//! - [`telemetry`]: Log subscriber installation

pub mod board;
pub mod client;
pub mod config;
pub mod telemetry;

//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-memory store for tests and ephemeral sessions
//! - JSON files on the local filesystem for durable storage
//! - Local watch-channel identity provider
//! - Demo data provider for seeding sample ledgers

pub mod demo;
pub mod identity;
pub mod json_file;
pub mod memory;

//! Common library for the users service
//!
//! This crate provides shared infrastructure used by the service binaries,
//! including MongoDB connectivity, index bootstrap and error handling.

pub mod database;
pub mod error;


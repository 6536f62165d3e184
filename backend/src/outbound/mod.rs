//! Outbound adapters implementing the directory and parameter ports.
//!
//! - **memory**: process-local stores for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel

pub mod memory;
pub mod persistence;

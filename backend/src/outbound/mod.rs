//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: process-local store, the default backend and test double
//! - **persistence**: PostgreSQL repositories using Diesel
//!
//! Adapters translate between domain records and storage representations.
//! They contain no business logic.

pub mod memory;
pub mod persistence;

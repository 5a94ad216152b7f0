//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories, health probe and migrations
//!   using Diesel ORM.
//! - **memory**: the same ports over process memory, used when no database
//!   is configured and by tests.
//! - **security**: bcrypt password hashing.
//!
//! Adapters convert between domain types and infrastructure representations.
//! They contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;

//! In-memory adapters for running without PostgreSQL.
//!
//! [`InMemoryStore`] implements every driven port over one mutex-guarded
//! state, mirroring the relational rules the SQL schema enforces: unique
//! email, name and document, organization references that must resolve, and
//! `ON DELETE SET NULL` when an organization goes away. Checks and writes
//! happen inside the same critical section.

mod store;

pub use store::InMemoryStore;

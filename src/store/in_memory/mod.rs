//! In-memory persistent store for testing and development.
//!
//! [`InMemoryDatabase`] is the shared data (clone-friendly via `Arc`).
//! [`InMemoryStore`] is one connection to it: it owns its staged changes and
//! its open transaction, like a database session would.

mod database;
mod session;
mod table;

pub use database::InMemoryDatabase;
pub use session::InMemoryStore;

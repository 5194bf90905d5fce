//! SQLite persistence for bookstall.
//!
//! # Responsibility
//! - Open and configure SQLite connections (foreign keys ON, busy timeout).
//! - Apply schema migrations before any repository code runs.
//! - Provide seller/book repositories and the async [`Store`] session facade.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Every returned connection has all migrations applied.
//! - Books always reference an existing seller row (`foreign_keys=ON`).

use thiserror::Error;

pub mod book_repo;
pub mod migrations;
mod open;
pub mod seller_repo;
mod store;

pub use book_repo::{BookRecord, BookUpdate, NewBook};
pub use open::{open_db, open_db_in_memory};
pub use seller_repo::{NewSeller, SellerProfile, SellerRecord};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

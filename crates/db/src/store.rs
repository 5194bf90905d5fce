//! Async session facade over the SQLite connection.
//!
//! Each method takes the connection lock for the duration of one operation,
//! giving every request a scoped store session. Requests suspend while the
//! session is busy; there is no shared state beyond the connection itself.

use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::book_repo::{self, BookRecord, BookUpdate, NewBook};
use crate::seller_repo::{self, NewSeller, SellerProfile, SellerRecord};
use crate::DbResult;

/// Cloneable handle to the catalog database.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wraps a bootstrapped connection (see [`crate::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub async fn create_seller(&self, new: NewSeller) -> DbResult<SellerRecord> {
        let conn = self.conn.lock().await;
        seller_repo::create_seller(&conn, &new)
    }

    pub async fn list_sellers(&self) -> DbResult<Vec<SellerRecord>> {
        let conn = self.conn.lock().await;
        seller_repo::list_sellers(&conn)
    }

    pub async fn get_seller(&self, id: i64) -> DbResult<Option<SellerRecord>> {
        let conn = self.conn.lock().await;
        seller_repo::get_seller(&conn, id)
    }

    pub async fn find_sellers_by_email(&self, e_mail: &str) -> DbResult<Vec<SellerRecord>> {
        let conn = self.conn.lock().await;
        seller_repo::find_sellers_by_email(&conn, e_mail)
    }

    pub async fn update_seller(
        &self,
        id: i64,
        profile: SellerProfile,
    ) -> DbResult<Option<SellerRecord>> {
        let conn = self.conn.lock().await;
        seller_repo::update_seller(&conn, id, &profile)
    }

    /// Deletes a seller and all owned books atomically.
    pub async fn delete_seller(&self, id: i64) -> DbResult<()> {
        let mut conn = self.conn.lock().await;
        seller_repo::delete_seller_cascade(&mut conn, id)
    }

    pub async fn seller_exists(&self, id: i64) -> DbResult<bool> {
        let conn = self.conn.lock().await;
        seller_repo::seller_exists(&conn, id)
    }

    pub async fn create_book(&self, new: NewBook) -> DbResult<BookRecord> {
        let conn = self.conn.lock().await;
        book_repo::create_book(&conn, &new)
    }

    pub async fn list_books(&self) -> DbResult<Vec<BookRecord>> {
        let conn = self.conn.lock().await;
        book_repo::list_books(&conn)
    }

    pub async fn list_books_by_seller(&self, saller_id: i64) -> DbResult<Vec<BookRecord>> {
        let conn = self.conn.lock().await;
        book_repo::list_books_by_seller(&conn, saller_id)
    }

    pub async fn get_book(&self, id: i64) -> DbResult<Option<BookRecord>> {
        let conn = self.conn.lock().await;
        book_repo::get_book(&conn, id)
    }

    pub async fn update_book(&self, id: i64, update: BookUpdate) -> DbResult<Option<BookRecord>> {
        let conn = self.conn.lock().await;
        book_repo::update_book(&conn, id, &update)
    }

    pub async fn delete_book(&self, id: i64) -> DbResult<()> {
        let conn = self.conn.lock().await;
        book_repo::delete_book(&conn, id)
    }
}

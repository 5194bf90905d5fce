//! Book repository.
//!
//! # Invariants
//! - `saller_id` is written once at creation and never touched by updates.
//! - `delete_book` is idempotent: deleting an absent id succeeds.

use rusqlite::{params, Connection, OptionalExtension};

use crate::DbResult;

/// Read model for a book row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub count_pages: i64,
    pub saller_id: i64,
}

/// Insert model. The owner is fixed here for the lifetime of the row.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub count_pages: i64,
    pub saller_id: i64,
}

/// Full-field replacement of the mutable columns. Deliberately has no
/// `saller_id`: ownership reassignment is unsupported.
#[derive(Debug, Clone)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub count_pages: i64,
}

pub fn create_book(conn: &Connection, new: &NewBook) -> DbResult<BookRecord> {
    conn.execute(
        "INSERT INTO books (title, author, year, count_pages, saller_id)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![new.title, new.author, new.year, new.count_pages, new.saller_id],
    )?;
    let id = conn.last_insert_rowid();
    Ok(BookRecord {
        id,
        title: new.title.clone(),
        author: new.author.clone(),
        year: new.year,
        count_pages: new.count_pages,
        saller_id: new.saller_id,
    })
}

pub fn list_books(conn: &Connection) -> DbResult<Vec<BookRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, year, count_pages, saller_id
         FROM books
         ORDER BY id ASC;",
    )?;
    let rows = stmt.query_map([], row_to_book)?;
    let mut books = Vec::new();
    for row in rows {
        books.push(row?);
    }
    Ok(books)
}

pub fn list_books_by_seller(conn: &Connection, saller_id: i64) -> DbResult<Vec<BookRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, year, count_pages, saller_id
         FROM books
         WHERE saller_id = ?1
         ORDER BY id ASC;",
    )?;
    let rows = stmt.query_map([saller_id], row_to_book)?;
    let mut books = Vec::new();
    for row in rows {
        books.push(row?);
    }
    Ok(books)
}

pub fn get_book(conn: &Connection, id: i64) -> DbResult<Option<BookRecord>> {
    let book = conn
        .query_row(
            "SELECT id, title, author, year, count_pages, saller_id
             FROM books
             WHERE id = ?1;",
            [id],
            row_to_book,
        )
        .optional()?;
    Ok(book)
}

/// Replaces the mutable fields of a book, preserving its owner. Returns the
/// updated row, or `None` when the id does not exist.
pub fn update_book(conn: &Connection, id: i64, update: &BookUpdate) -> DbResult<Option<BookRecord>> {
    let changed = conn.execute(
        "UPDATE books
         SET title = ?2, author = ?3, year = ?4, count_pages = ?5
         WHERE id = ?1;",
        params![id, update.title, update.author, update.year, update.count_pages],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_book(conn, id)
}

/// Deletes a book by id. Absent ids are a successful no-op.
pub fn delete_book(conn: &Connection, id: i64) -> DbResult<()> {
    conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
    Ok(())
}

fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        count_pages: row.get("count_pages")?,
        saller_id: row.get("saller_id")?,
    })
}

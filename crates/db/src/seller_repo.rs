//! Seller repository: credential rows and cascade deletion.
//!
//! # Invariants
//! - `e_mail` carries no uniqueness constraint; lookups by e_mail return all
//!   matching rows ordered by id ascending.
//! - `delete_seller_cascade` removes owned books and the seller row in one
//!   transaction; partial deletion never survives a failure.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::DbResult;

/// Read model for a seller row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    /// Argon2id PHC string. Never leaves the persistence/auth boundary.
    pub password_hash: String,
}

/// Insert model for registration.
#[derive(Debug, Clone)]
pub struct NewSeller {
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    pub password_hash: String,
}

/// Full-field profile replacement. Password is immutable post-creation.
#[derive(Debug, Clone)]
pub struct SellerProfile {
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
}

pub fn create_seller(conn: &Connection, new: &NewSeller) -> DbResult<SellerRecord> {
    conn.execute(
        "INSERT INTO sellers (first_name, last_name, e_mail, password_hash)
         VALUES (?1, ?2, ?3, ?4);",
        params![new.first_name, new.last_name, new.e_mail, new.password_hash],
    )?;
    let id = conn.last_insert_rowid();
    Ok(SellerRecord {
        id,
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        e_mail: new.e_mail.clone(),
        password_hash: new.password_hash.clone(),
    })
}

pub fn list_sellers(conn: &Connection) -> DbResult<Vec<SellerRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, e_mail, password_hash
         FROM sellers
         ORDER BY id ASC;",
    )?;
    let rows = stmt.query_map([], row_to_seller)?;
    let mut sellers = Vec::new();
    for row in rows {
        sellers.push(row?);
    }
    Ok(sellers)
}

pub fn get_seller(conn: &Connection, id: i64) -> DbResult<Option<SellerRecord>> {
    let seller = conn
        .query_row(
            "SELECT id, first_name, last_name, e_mail, password_hash
             FROM sellers
             WHERE id = ?1;",
            [id],
            row_to_seller,
        )
        .optional()?;
    Ok(seller)
}

/// Returns all sellers with the given e_mail, lowest id first.
///
/// Duplicate e_mails are permitted by the schema, so authentication scans the
/// candidates in deterministic order.
pub fn find_sellers_by_email(conn: &Connection, e_mail: &str) -> DbResult<Vec<SellerRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, e_mail, password_hash
         FROM sellers
         WHERE e_mail = ?1
         ORDER BY id ASC;",
    )?;
    let rows = stmt.query_map([e_mail], row_to_seller)?;
    let mut sellers = Vec::new();
    for row in rows {
        sellers.push(row?);
    }
    Ok(sellers)
}

/// Replaces the profile fields of a seller. Returns the updated row, or
/// `None` when the id does not exist.
pub fn update_seller(
    conn: &Connection,
    id: i64,
    profile: &SellerProfile,
) -> DbResult<Option<SellerRecord>> {
    let changed = conn.execute(
        "UPDATE sellers
         SET first_name = ?2, last_name = ?3, e_mail = ?4
         WHERE id = ?1;",
        params![id, profile.first_name, profile.last_name, profile.e_mail],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_seller(conn, id)
}

/// Deletes a seller and every book it owns in a single transaction.
///
/// Idempotent: deleting an absent id is a no-op that still commits cleanly.
pub fn delete_seller_cascade(conn: &mut Connection, id: i64) -> DbResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute("DELETE FROM books WHERE saller_id = ?1;", [id])?;
    tx.execute("DELETE FROM sellers WHERE id = ?1;", [id])?;
    tx.commit()?;
    Ok(())
}

pub fn seller_exists(conn: &Connection, id: i64) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sellers WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn row_to_seller(row: &rusqlite::Row<'_>) -> rusqlite::Result<SellerRecord> {
    Ok(SellerRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        e_mail: row.get("e_mail")?,
        password_hash: row.get("password_hash")?,
    })
}

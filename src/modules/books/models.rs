use serde::{Deserialize, Serialize};
use serde_json::json;

use bookstall_db::BookRecord;
use bookstall_http::error::AppError;

/// Inbound book payload. Carries no `id`; the store assigns one.
///
/// The wire spelling `saller_id` is historical and preserved for contract
/// fidelity.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingBook {
    pub title: String,
    pub author: String,
    #[serde(default = "default_year")]
    pub year: i64,
    pub count_pages: i64,
    pub saller_id: i64,
}

fn default_year() -> i64 {
    2024
}

impl IncomingBook {
    /// Field-level invariants, enforced before any store interaction.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.year < 1900 {
            return Err(AppError::validation(
                vec![json!({"field": "year", "error": "year is wrong"})],
                "year is wrong",
            ));
        }
        Ok(())
    }
}

/// Outbound book representation, id included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnedBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub count_pages: i64,
    pub saller_id: i64,
}

impl From<BookRecord> for ReturnedBook {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            year: record.year,
            count_pages: record.count_pages,
            saller_id: record.saller_id,
        }
    }
}

/// List envelope: `{"books": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnedAllBooks {
    pub books: Vec<ReturnedBook>,
}

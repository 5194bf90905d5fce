pub mod models;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use bookstall_auth::authorize_owner;
use bookstall_db::{BookUpdate, NewBook};
use bookstall_http::error::AppError;
use bookstall_kernel::{AppState, InitCtx, Module};

use models::{IncomingBook, ReturnedAllBooks, ReturnedBook};

/// Catalog entries owned by sellers. Creation and update are gated by the
/// ownership check; reads and deletion are deliberately open.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/", get(get_all_books).post(create_book))
            .route(
                "/{book_id}",
                get(get_book).put(update_book).delete(delete_book),
            )
            .with_state(state)
    }
}

/// Bearer token presented as a query parameter on mutating operations.
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: String,
}

/// `POST /books/?token=` — create a book under the caller's own account.
async fn create_book(
    State(state): State<AppState>,
    Query(auth): Query<TokenQuery>,
    Json(book): Json<IncomingBook>,
) -> Result<(StatusCode, Json<ReturnedBook>), AppError> {
    book.validate()?;

    let claims = state.tokens.verify(&auth.token)?;
    authorize_owner(&claims, book.saller_id).map_err(|_| {
        AppError::forbidden("you do not have access to create a book for this saller")
    })?;

    // Referential integrity is checked explicitly so a stale token for a
    // deleted seller surfaces as 404 instead of a constraint error.
    if !state.store.seller_exists(book.saller_id).await? {
        return Err(AppError::not_found("saller not found"));
    }

    let created = state
        .store
        .create_book(NewBook {
            title: book.title,
            author: book.author,
            year: book.year,
            count_pages: book.count_pages,
            saller_id: book.saller_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /books/` — list every book.
async fn get_all_books(State(state): State<AppState>) -> Result<Json<ReturnedAllBooks>, AppError> {
    let books = state.store.list_books().await?;
    Ok(Json(ReturnedAllBooks {
        books: books.into_iter().map(ReturnedBook::from).collect(),
    }))
}

/// `GET /books/{id}` — fetch one book; absent ids yield a JSON `null` body.
async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Json<Option<ReturnedBook>>, AppError> {
    let book = state.store.get_book(book_id).await?;
    Ok(Json(book.map(ReturnedBook::from)))
}

/// `PUT /books/{id}?token=` — full-field replace by the owning seller.
///
/// Ownership is checked against the *stored* owner, and `saller_id` is never
/// written: a payload attempting reassignment is silently preserved.
async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Query(auth): Query<TokenQuery>,
    Json(new_data): Json<IncomingBook>,
) -> Result<Json<ReturnedBook>, AppError> {
    let claims = state.tokens.verify(&auth.token)?;
    let existing = state
        .store
        .get_book(book_id)
        .await?
        .ok_or_else(|| AppError::not_found("book not found"))?;

    authorize_owner(&claims, existing.saller_id)
        .map_err(|_| AppError::forbidden("you do not have access to update this book"))?;

    new_data.validate()?;

    let updated = state
        .store
        .update_book(
            book_id,
            BookUpdate {
                title: new_data.title,
                author: new_data.author,
                year: new_data.year,
                count_pages: new_data.count_pages,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("book not found"))?;

    Ok(Json(updated.into()))
}

/// `DELETE /books/{id}` — idempotent; absent ids still return 204.
async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}

pub mod models;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use bookstall_auth::authorize_owner;
use bookstall_auth::password::{hash_password, verify_password};
use bookstall_db::{NewSeller, SellerProfile};
use bookstall_http::error::AppError;
use bookstall_kernel::{AppState, InitCtx, Module};

use models::{
    IncomingSeller, ReturnedAllSellers, ReturnedSeller, ReturnedSellerDetail, SellerProfileBody,
    TokenResponse,
};

/// Seller accounts: the authentication principal and book owner.
///
/// Registration, listing, profile update, and deletion are deliberately
/// ungated; only the self-lookup requires a token. The asymmetry mirrors the
/// service's documented contract.
pub struct SellersModule;

impl SellersModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for SellersModule {
    fn name(&self) -> &'static str {
        "saller"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "sellers module initialized"
        );
        Ok(())
    }

    fn routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/", get(get_all_sellers).post(create_seller))
            .route("/token", post(login_for_access_token))
            .route(
                "/{saller_id}",
                get(get_seller).put(update_seller).delete(delete_seller),
            )
            .with_state(state)
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: String,
}

/// Credentials presented as query parameters at login.
#[derive(Debug, Deserialize)]
struct LoginQuery {
    e_mail: String,
    password: String,
}

/// `POST /saller/token?e_mail=&password=` — issue a bearer token.
///
/// Duplicate e_mails are permitted by the schema; candidates are scanned in
/// id order and the first row whose hash verifies wins.
async fn login_for_access_token(
    State(state): State<AppState>,
    Query(credentials): Query<LoginQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    let candidates = state.store.find_sellers_by_email(&credentials.e_mail).await?;

    for seller in candidates {
        if verify_password(&credentials.password, &seller.password_hash).unwrap_or(false) {
            let token = state.tokens.issue(&seller.e_mail, seller.id)?;
            return Ok(Json(TokenResponse {
                access_token: token,
                token_type: "Bearer".to_string(),
            }));
        }
    }

    Err(AppError::unauthorized("incorrect email or password"))
}

/// `POST /saller/` — register a seller.
async fn create_seller(
    State(state): State<AppState>,
    Json(seller): Json<IncomingSeller>,
) -> Result<(StatusCode, Json<ReturnedSeller>), AppError> {
    let password_hash = hash_password(&seller.password)?;
    let created = state
        .store
        .create_seller(NewSeller {
            first_name: seller.first_name,
            last_name: seller.last_name,
            e_mail: seller.e_mail,
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /saller/` — list every seller.
async fn get_all_sellers(
    State(state): State<AppState>,
) -> Result<Json<ReturnedAllSellers>, AppError> {
    let sellers = state.store.list_sellers().await?;
    Ok(Json(ReturnedAllSellers {
        sallers: sellers.into_iter().map(ReturnedSeller::from).collect(),
    }))
}

/// `GET /saller/{id}?token=` — self-lookup: profile plus owned books.
async fn get_seller(
    State(state): State<AppState>,
    Path(saller_id): Path<i64>,
    Query(auth): Query<TokenQuery>,
) -> Result<Json<ReturnedSellerDetail>, AppError> {
    let claims = state.tokens.verify(&auth.token)?;
    authorize_owner(&claims, saller_id)
        .map_err(|_| AppError::forbidden("you do not have access to this saller's information"))?;

    let seller = state
        .store
        .get_seller(saller_id)
        .await?
        .ok_or_else(|| AppError::not_found("saller not found"))?;
    let books = state.store.list_books_by_seller(saller_id).await?;

    Ok(Json(ReturnedSellerDetail {
        id: seller.id,
        first_name: seller.first_name,
        last_name: seller.last_name,
        e_mail: seller.e_mail,
        books: books.into_iter().map(Into::into).collect(),
    }))
}

/// `PUT /saller/{id}` — full-field profile replace; echoes the new profile.
async fn update_seller(
    State(state): State<AppState>,
    Path(saller_id): Path<i64>,
    Json(new_data): Json<SellerProfileBody>,
) -> Result<Json<SellerProfileBody>, AppError> {
    let updated = state
        .store
        .update_seller(
            saller_id,
            SellerProfile {
                first_name: new_data.first_name,
                last_name: new_data.last_name,
                e_mail: new_data.e_mail,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("saller not found"))?;

    Ok(Json(SellerProfileBody {
        first_name: updated.first_name,
        last_name: updated.last_name,
        e_mail: updated.e_mail,
    }))
}

/// `DELETE /saller/{id}` — cascades over owned books in one transaction.
async fn delete_seller(
    State(state): State<AppState>,
    Path(saller_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_seller(saller_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the sellers module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(SellersModule::new())
}

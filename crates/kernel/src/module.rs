use async_trait::async_trait;
use axum::Router;

use bookstall_auth::TokenService;
use bookstall_db::Store;

/// Context provided to modules during initialization.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub store: &'a Store,
}

/// Shared handler state: the store session facade plus the token service.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: TokenService,
}

/// Core trait implemented by every bookstall module.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name; module routes are mounted under `/{name}`.
    fn name(&self) -> &'static str;

    /// Called during application startup, before the server binds.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    fn routes(&self, _state: AppState) -> Router {
        Router::new()
    }

    /// Start background tasks for this module.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources during shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

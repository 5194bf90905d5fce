use anyhow::Context;
use bookstall_kernel::{settings::Settings, AppState, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstall settings")?;
    bookstall_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.path,
        "bookstall bootstrap starting"
    );

    let conn = if settings.database.path == ":memory:" {
        bookstall_db::open_db_in_memory()?
    } else {
        bookstall_db::open_db(&settings.database.path)?
    };
    let store = bookstall_db::Store::new(conn);
    let tokens = bookstall_auth::TokenService::new(&settings.auth.token_config())?;

    let mut registry = ModuleRegistry::new();
    bookstall_app::modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let state = AppState { store, tokens };
    bookstall_http::start_server(&registry, state, &settings).await?;

    registry.stop_modules().await?;
    Ok(())
}

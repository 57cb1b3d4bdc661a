use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_access_log::{config::Config, db::connection::create_pool, routes, state::AppState};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_access_log=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let route_groups: Vec<&str> = config
        .access_log_route_groups
        .iter()
        .map(|group| group.as_str())
        .collect();
    tracing::info!(
        server_addr = %config.server_addr,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        access_log_enabled = config.access_log_enabled,
        access_log_max_body_bytes = config.access_log_max_body_bytes,
        access_log_route_groups = ?route_groups,
        "Loaded configuration from environment/.env"
    );

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let addr = config.server_addr;
    let app = routes::build_router(AppState::new(pool, config));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

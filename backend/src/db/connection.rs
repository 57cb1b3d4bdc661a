use sqlx::postgres::{PgPool, PgPoolOptions};

pub type DbPool = PgPool;

const MAX_CONNECTIONS: u32 = 10;

pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    Ok(pool)
}

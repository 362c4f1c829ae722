pub mod connection;
pub mod entities;
pub mod migration;
pub mod repository;

use sea_orm::DatabaseConnection;
use once_cell::sync::OnceCell;

use crate::config::DatabaseConfig;

pub use repository::SeaOrmRelevanceRepository;

static DATABASE: OnceCell<DatabaseConnection> = OnceCell::new();

/// 连接数据库并执行迁移
pub async fn open_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let conn = connection::connect(config).await?;

    // 运行迁移
    migration::run_migrations(&conn).await?;

    Ok(conn)
}

/// 初始化全局数据库连接
pub async fn init_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let conn = open_database(config).await?;

    DATABASE.set(conn.clone())
        .map_err(|_| anyhow::anyhow!("Database already initialized"))?;

    tracing::info!("Database initialized: {}", config.url);

    Ok(conn)
}

pub fn get_database() -> Option<&'static DatabaseConnection> {
    DATABASE.get()
}

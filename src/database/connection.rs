use sea_orm::{Database, DatabaseConnection, ConnectOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// 内存库连接的存活时间，连接关闭数据库就没了
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(&config.url);
    opt.connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    if config.is_in_memory() {
        // 内存库只能用一个连接，且不能被回收
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_LIFETIME)
            .max_lifetime(IN_MEMORY_LIFETIME);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs));
    }

    let conn = Database::connect(opt).await?;

    tracing::info!("Database connected: {}", config.url);

    Ok(conn)
}

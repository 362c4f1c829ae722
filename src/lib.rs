pub mod api;
pub mod config;
pub mod database;
pub mod relevance;

pub use crate::config::{AppConfig, DatabaseConfig};
pub use relevance::{
    keys, AssignRequest, IdMap, RelevanceError, RelevanceFilter, RelevanceManager, RelevanceRepository,
    UnitOfWork,
};

use tracing_subscriber::EnvFilter;

/// 初始化日志（只初始化一次）
pub fn init_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// 初始化应用
pub async fn init_application(config: AppConfig) -> anyhow::Result<()> {
    init_logging(&config.log_filter);

    if !config.database.is_in_memory() {
        if let Some(dir) = sqlite_parent_dir(&config.database.url) {
            // 创建目录
            tokio::fs::create_dir_all(&dir).await?;
        }
    }

    // 初始化数据库
    let conn = database::init_database(&config.database).await?;

    // 初始化关联管理器
    api::relevance_api::init_relevance_manager(conn)?;

    tracing::info!("Application initialized: {}", config.database.url);

    Ok(())
}

/// `sqlite:/path/to/file.db?mode=rwc` 中数据库文件所在目录
fn sqlite_parent_dir(url: &str) -> Option<std::path::PathBuf> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    let path = path.split('?').next()?;
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
}

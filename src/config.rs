use std::path::{Path, PathBuf};
use ::config::{Config, Environment, File};
use serde::Deserialize;

/// 应用配置
///
/// 配置文件（可选）之上叠加 `RELEVANCE_` 前缀的环境变量，
/// 嵌套字段用 `__` 分隔，如 `RELEVANCE_DATABASE__URL`。
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// 数据库连接配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            sqlx_logging: false,
        }
    }
}

impl AppConfig {
    /// 加载配置，`file` 为 None 时只读环境变量
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("RELEVANCE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 以 `root` 为应用根目录，数据库放在 `root/database/relevance.db`
    pub fn with_root(mut self, root: &Path) -> Self {
        self.database.url = DatabaseConfig::sqlite_file_url(&Self::database_dir(root).join("relevance.db"));
        self
    }

    pub fn database_dir(root: &Path) -> PathBuf {
        root.join("database")
    }
}

impl DatabaseConfig {
    pub fn sqlite_file_url(db_path: &Path) -> String {
        format!("sqlite:{}?mode=rwc", db_path.display())
    }

    /// 内存库每个连接都是独立的数据库
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::default();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "log_filter = \"debug\"\n[database]\nurl = \"sqlite:/tmp/x.db?mode=rwc\"\nmax_connections = 4"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.database.url, "sqlite:/tmp/x.db?mode=rwc");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.idle_timeout_secs, 300);
        assert!(!config.database.is_in_memory());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn with_root_points_at_database_dir() {
        let config = AppConfig::default().with_root(Path::new("/data/app"));
        assert_eq!(config.database.url, "sqlite:/data/app/database/relevance.db?mode=rwc");
    }
}

use std::path::Path;

use crate::config::AppConfig;

/// 初始化应用
///
/// 宿主启动时调用一次
pub async fn init_application(config: AppConfig) -> anyhow::Result<()> {
    crate::init_application(config).await
}

/// 以根目录初始化应用，数据库文件放在 `root/database` 下
pub async fn init_application_at(root_path: String) -> anyhow::Result<()> {
    let config = AppConfig::load(None)?.with_root(Path::new(&root_path));
    crate::init_application(config).await
}

/// 获取应用是否已初始化
pub fn is_initialized() -> bool {
    crate::database::get_database().is_some()
}

use std::sync::Arc;
use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;

use crate::database::SeaOrmRelevanceRepository;
use crate::relevance::{AssignRequest, IdMap, RelevanceManager};

static RELEVANCE_MANAGER: OnceCell<Arc<RelevanceManager>> = OnceCell::new();

fn get_relevance_manager() -> anyhow::Result<&'static Arc<RelevanceManager>> {
    RELEVANCE_MANAGER.get()
        .ok_or_else(|| anyhow::anyhow!("Relevance manager not initialized. Call init_application first."))
}

/// 初始化关联管理器（内部使用）
pub(crate) fn init_relevance_manager(conn: DatabaseConnection) -> anyhow::Result<()> {
    let repository = SeaOrmRelevanceRepository::new(conn);
    let manager = RelevanceManager::new(Arc::new(repository));
    RELEVANCE_MANAGER.set(Arc::new(manager))
        .map_err(|_| anyhow::anyhow!("Relevance manager already initialized"))?;
    Ok(())
}

/// 添加关联
pub async fn assign(key: String, first_id: String, second_ids: Vec<String>) -> anyhow::Result<()> {
    let manager = get_relevance_manager()?;
    manager.assign(&key, &first_id, &second_ids).await?;
    Ok(())
}

/// 按请求添加关联
pub async fn assign_request(request: AssignRequest) -> anyhow::Result<()> {
    let manager = get_relevance_manager()?;
    manager.assign_request(&request).await?;
    Ok(())
}

/// 批量添加关联，`pairs` 为 (first_id, second_id)
pub async fn assign_pairs(key: String, pairs: Vec<(String, String)>) -> anyhow::Result<()> {
    let manager = get_relevance_manager()?;
    let id_map: IdMap = pairs.into_iter().collect();
    manager.assign_map(&key, &id_map).await?;
    Ok(())
}

/// 取消关联，`second_ids` 为空时取消 first_id 的全部关联
pub async fn unassign(key: String, first_id: String, second_ids: Vec<String>) -> anyhow::Result<()> {
    let manager = get_relevance_manager()?;
    manager.unassign(&key, &first_id, &second_ids).await?;
    Ok(())
}

/// 删除 first_ids 的全部关联
pub async fn delete_by(key: String, first_ids: Vec<String>) -> anyhow::Result<()> {
    let manager = get_relevance_manager()?;
    manager.delete_by(&key, &first_ids).await?;
    Ok(())
}

/// 根据关联表的一列获取另一列
pub async fn get(key: String, return_second_ids: bool, ids: Vec<String>) -> anyhow::Result<Vec<String>> {
    let manager = get_relevance_manager()?;
    Ok(manager.get(&key, return_second_ids, &ids).await?)
}

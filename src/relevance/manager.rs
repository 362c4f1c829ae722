use std::sync::Arc;
use chrono::Utc;

use super::error::{RelevanceError, Result};
use super::repository::{NewRelevance, RelevanceFilter, RelevanceRepository, UnitOfWork};
use super::types::{AssignRequest, IdMap};

/// 关联管理器
///
/// 维护 (key, first_id, second_id) 形式的多对多关联，比如用户-角色、角色-模块。
pub struct RelevanceManager {
    repository: Arc<dyn RelevanceRepository>,
}

impl RelevanceManager {
    pub fn new(repository: Arc<dyn RelevanceRepository>) -> Self {
        Self { repository }
    }

    /// 添加关联，不会删除 first_id 已有的关联
    ///
    /// 需要替换时先调用 [`Self::unassign`]。
    pub async fn assign<S: AsRef<str>>(&self, key: &str, first_id: &str, second_ids: &[S]) -> Result<()> {
        self.assign_map(key, &IdMap::single(first_id, second_ids)).await
    }

    /// 按请求添加关联
    pub async fn assign_request(&self, request: &AssignRequest) -> Result<()> {
        self.assign_map(&request.key, &IdMap::from(request)).await
    }

    /// 添加关联，每个 (first_id, second_id) 生成一条记录，一次批量插入后提交
    pub async fn assign_map(&self, key: &str, id_map: &IdMap) -> Result<()> {
        ensure_key(key)?;

        let now = Utc::now().naive_utc();
        let records: Vec<NewRelevance> = id_map
            .pairs()
            .map(|(first_id, second_id)| NewRelevance {
                key: key.to_string(),
                first_id: first_id.to_string(),
                second_id: second_id.to_string(),
                operate_time: now,
            })
            .collect();
        let count = records.len();

        let mut work = UnitOfWork::new();
        work.batch_add(records);
        work.save(self.repository.as_ref()).await?;

        tracing::debug!("Relevance assigned: key={} records={}", key, count);
        Ok(())
    }

    /// 取消关联
    ///
    /// `second_ids` 为空时删除 (key, first_id) 的全部关联，否则只删除指定的关联。
    pub async fn unassign<S: AsRef<str>>(&self, key: &str, first_id: &str, second_ids: &[S]) -> Result<()> {
        if second_ids.is_empty() {
            self.delete_by(key, &[first_id]).await
        } else {
            self.delete_pairs(key, &IdMap::single(first_id, second_ids)).await
        }
    }

    /// 逐对删除关联，所有删除在同一个工作单元里提交
    async fn delete_pairs(&self, key: &str, id_map: &IdMap) -> Result<()> {
        ensure_key(key)?;

        let mut work = UnitOfWork::new();
        for group in id_map.groups() {
            for second_id in &group.second_ids {
                work.delete(RelevanceFilter::pair(key, &group.first_id, second_id));
            }
        }
        work.save(self.repository.as_ref()).await?;

        tracing::debug!("Relevance unassigned: key={} pairs={}", key, id_map.len());
        Ok(())
    }

    /// 删除 key 下 first_id 属于 `first_ids` 的全部关联
    pub async fn delete_by<S: AsRef<str>>(&self, key: &str, first_ids: &[S]) -> Result<()> {
        if first_ids.is_empty() {
            return Ok(());
        }

        let filter = RelevanceFilter::key(key).first_ids_in(first_ids);
        let deleted = self.repository.delete(&filter).await?;

        tracing::debug!("Relevance deleted: key={} first_ids={} rows={}", key, first_ids.len(), deleted);
        Ok(())
    }

    /// 根据关联表的一列获取另一列的值
    ///
    /// `return_second_ids` 为 true 时 `ids` 是 first_id，返回 second_id；否则反过来。
    /// 结果保持存储顺序，不去重。
    pub async fn get<S: AsRef<str>>(&self, key: &str, return_second_ids: bool, ids: &[S]) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let filter = if return_second_ids {
            RelevanceFilter::key(key).first_ids_in(ids)
        } else {
            RelevanceFilter::key(key).second_ids_in(ids)
        };
        let records = self.repository.find(&filter).await?;

        Ok(records
            .into_iter()
            .map(|r| if return_second_ids { r.second_id } else { r.first_id })
            .collect())
    }
}

/// 只拦截写入：空 key 的记录不存在，删除和查询直接交给仓储
fn ensure_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(RelevanceError::EmptyKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::relevance;
    use crate::relevance::repository::{MockRelevanceRepository, StagedWrite};
    use crate::relevance::types::keys;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn record(id: i32, key: &str, first_id: &str, second_id: &str) -> relevance::Model {
        relevance::Model {
            id,
            key: key.to_string(),
            first_id: first_id.to_string(),
            second_id: second_id.to_string(),
            operate_time: Utc::now().naive_utc(),
        }
    }

    fn manager(repo: MockRelevanceRepository) -> RelevanceManager {
        RelevanceManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn assign_commits_one_batch_with_shared_key_and_first_id() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit()
            .times(1)
            .withf(|work| match work.writes() {
                [StagedWrite::Insert(records)] => {
                    records.len() == 3
                        && records.iter().all(|r| r.key == "T" && r.first_id == "X")
                        && records.iter().map(|r| r.second_id.as_str()).eq(["A", "B", "C"])
                        && records.iter().all(|r| r.operate_time == records[0].operate_time)
                }
                _ => false,
            })
            .returning(|_| Ok(()));
        repo.expect_delete().never();

        manager(repo).assign("T", "X", &["A", "B", "C"]).await.unwrap();
    }

    #[tokio::test]
    async fn assign_with_no_second_ids_writes_nothing() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit().never();

        manager(repo).assign::<&str>("T", "X", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn assign_map_emits_pairs_in_group_order() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit()
            .times(1)
            .withf(|work| match work.writes() {
                [StagedWrite::Insert(records)] => records
                    .iter()
                    .map(|r| (r.first_id.as_str(), r.second_id.as_str()))
                    .eq([("u1", "r1"), ("u1", "r3"), ("u2", "r2")]),
                _ => false,
            })
            .returning(|_| Ok(()));

        let map: IdMap = [("u1", "r1"), ("u2", "r2"), ("u1", "r3")].into_iter().collect();
        manager(repo).assign_map(keys::USER_ROLE, &map).await.unwrap();
    }

    #[tokio::test]
    async fn assign_request_uses_request_fields() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit()
            .times(1)
            .withf(|work| match work.writes() {
                [StagedWrite::Insert(records)] => {
                    records.len() == 2 && records.iter().all(|r| r.key == keys::USER_RESOURCE && r.first_id == "u1")
                }
                _ => false,
            })
            .returning(|_| Ok(()));

        let request = AssignRequest {
            key: keys::USER_RESOURCE.to_string(),
            first_id: "u1".to_string(),
            sec_ids: vec!["res1".to_string(), "res2".to_string()],
        };
        manager(repo).assign_request(&request).await.unwrap();
    }

    #[tokio::test]
    async fn commit_failure_is_propagated() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit()
            .returning(|_| Err(DbErr::Custom("connection lost".into()).into()));

        let err = manager(repo).assign("T", "X", &["A"]).await.unwrap_err();
        match err {
            RelevanceError::Database(DbErr::Custom(msg)) => assert_eq!(msg, "connection lost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unassign_without_second_ids_deletes_by_first_id() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_delete()
            .times(1)
            .with(eq(RelevanceFilter::key("T").first_ids_in(&["X"])))
            .returning(|_| Ok(3));
        repo.expect_commit().never();

        manager(repo).unassign::<&str>("T", "X", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn unassign_with_second_ids_stages_one_delete_per_pair() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_delete().never();
        repo.expect_commit()
            .times(1)
            .withf(|work| {
                work.writes()
                    == [
                        StagedWrite::Delete(RelevanceFilter::pair("T", "X", "A")),
                        StagedWrite::Delete(RelevanceFilter::pair("T", "X", "B")),
                    ]
            })
            .returning(|_| Ok(()));

        manager(repo).unassign("T", "X", &["A", "B"]).await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_uses_a_single_membership_filter() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_delete()
            .times(1)
            .with(eq(RelevanceFilter::key("T").first_ids_in(&["X", "Y"])))
            .returning(|_| Ok(4));

        manager(repo).delete_by("T", &["X", "Y"]).await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_with_no_first_ids_is_a_no_op() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_delete().never();

        manager(repo).delete_by::<&str>("T", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn get_projects_second_ids_without_dedup() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_find()
            .with(eq(RelevanceFilter::key("T").first_ids_in(&["X", "Y"])))
            .returning(|_| {
                Ok(vec![
                    record(1, "T", "X", "A"),
                    record(2, "T", "Y", "A"),
                    record(3, "T", "X", "B"),
                ])
            });

        let ids = manager(repo).get("T", true, &["X", "Y"]).await.unwrap();
        assert_eq!(ids, vec!["A", "A", "B"]);
    }

    #[tokio::test]
    async fn get_reverse_projects_first_ids() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_find()
            .with(eq(RelevanceFilter::key("T").second_ids_in(&["A"])))
            .returning(|_| Ok(vec![record(1, "T", "X", "A")]));

        let ids = manager(repo).get("T", false, &["A"]).await.unwrap();
        assert_eq!(ids, vec!["X"]);
    }

    #[tokio::test]
    async fn empty_key_is_rejected_on_writes() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_commit().never();
        let manager = manager(repo);

        assert!(matches!(manager.assign("", "X", &["A"]).await, Err(RelevanceError::EmptyKey)));
        assert!(matches!(manager.unassign("", "X", &["A"]).await, Err(RelevanceError::EmptyKey)));
    }

    #[tokio::test]
    async fn empty_key_reads_and_deletes_go_to_storage() {
        let mut repo = MockRelevanceRepository::new();
        repo.expect_find()
            .times(1)
            .with(eq(RelevanceFilter::key("").first_ids_in(&["X"])))
            .returning(|_| Ok(vec![]));
        repo.expect_delete()
            .times(2)
            .with(eq(RelevanceFilter::key("").first_ids_in(&["X"])))
            .returning(|_| Ok(0));
        let manager = manager(repo);

        assert!(manager.get("", true, &["X"]).await.unwrap().is_empty());
        manager.delete_by("", &["X"]).await.unwrap();
        manager.unassign::<&str>("", "X", &[]).await.unwrap();
    }
}

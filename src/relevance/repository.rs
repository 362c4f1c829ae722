use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::database::entities::relevance;
use super::error::Result;

/// 关联记录查询条件
///
/// `key` 必须相等；`first_ids` / `second_ids` 为 `Some` 时按成员关系过滤，
/// 空列表不匹配任何记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceFilter {
    pub key: String,
    pub first_ids: Option<Vec<String>>,
    pub second_ids: Option<Vec<String>>,
}

impl RelevanceFilter {
    pub fn key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            first_ids: None,
            second_ids: None,
        }
    }

    pub fn first_ids_in<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        self.first_ids = Some(ids.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    pub fn second_ids_in<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        self.second_ids = Some(ids.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// 精确匹配 (key, first_id, second_id)
    pub fn pair(key: &str, first_id: &str, second_id: &str) -> Self {
        Self::key(key).first_ids_in(&[first_id]).second_ids_in(&[second_id])
    }
}

/// 待插入的关联记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelevance {
    pub key: String,
    pub first_id: String,
    pub second_id: String,
    pub operate_time: NaiveDateTime,
}

/// 工作单元中暂存的写操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedWrite {
    Insert(Vec<NewRelevance>),
    Delete(RelevanceFilter),
}

/// 工作单元
///
/// 先暂存写操作，`save` 时交给仓储在同一个事务里按顺序执行。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitOfWork {
    writes: Vec<StagedWrite>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_add(&mut self, records: Vec<NewRelevance>) {
        if !records.is_empty() {
            self.writes.push(StagedWrite::Insert(records));
        }
    }

    pub fn delete(&mut self, filter: RelevanceFilter) {
        self.writes.push(StagedWrite::Delete(filter));
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[StagedWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<StagedWrite> {
        self.writes
    }

    /// 提交
    pub async fn save(self, repository: &dyn RelevanceRepository) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        repository.commit(self).await
    }
}

/// 关联记录仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelevanceRepository: Send + Sync {
    /// 按存储顺序返回匹配的记录
    async fn find(&self, filter: &RelevanceFilter) -> Result<Vec<relevance::Model>>;

    /// 删除匹配的记录，返回删除条数
    async fn delete(&self, filter: &RelevanceFilter) -> Result<u64>;

    /// 在一个事务内执行工作单元的全部写操作
    async fn commit(&self, work: UnitOfWork) -> Result<()>;
}

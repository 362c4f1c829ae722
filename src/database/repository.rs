use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::database::entities::relevance;
use crate::relevance::{NewRelevance, RelevanceFilter, RelevanceRepository, Result, StagedWrite, UnitOfWork};

/// 基于 sea-orm 的关联仓储
#[derive(Clone)]
pub struct SeaOrmRelevanceRepository {
    conn: DatabaseConnection,
}

impl SeaOrmRelevanceRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl RelevanceRepository for SeaOrmRelevanceRepository {
    async fn find(&self, filter: &RelevanceFilter) -> Result<Vec<relevance::Model>> {
        let records = relevance::Entity::find()
            .filter(condition(filter))
            .order_by_asc(relevance::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(records)
    }

    async fn delete(&self, filter: &RelevanceFilter) -> Result<u64> {
        delete_matching(&self.conn, filter).await
    }

    async fn commit(&self, work: UnitOfWork) -> Result<()> {
        let txn = self.conn.begin().await?;

        for write in work.into_writes() {
            match write {
                StagedWrite::Insert(records) => {
                    if records.is_empty() {
                        continue;
                    }
                    relevance::Entity::insert_many(records.into_iter().map(active_model))
                        .exec(&txn)
                        .await?;
                }
                StagedWrite::Delete(filter) => {
                    delete_matching(&txn, &filter).await?;
                }
            }
        }

        // 出错时 txn 被丢弃即回滚
        txn.commit().await?;
        Ok(())
    }
}

async fn delete_matching<C: ConnectionTrait>(conn: &C, filter: &RelevanceFilter) -> Result<u64> {
    let result = relevance::Entity::delete_many()
        .filter(condition(filter))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

fn condition(filter: &RelevanceFilter) -> Condition {
    let mut cond = Condition::all().add(relevance::Column::Key.eq(filter.key.as_str()));
    if let Some(ids) = &filter.first_ids {
        cond = cond.add(relevance::Column::FirstId.is_in(ids.iter().cloned()));
    }
    if let Some(ids) = &filter.second_ids {
        cond = cond.add(relevance::Column::SecondId.is_in(ids.iter().cloned()));
    }
    cond
}

fn active_model(record: NewRelevance) -> relevance::ActiveModel {
    relevance::ActiveModel {
        id: NotSet,
        key: Set(record.key),
        first_id: Set(record.first_id),
        second_id: Set(record.second_id),
        operate_time: Set(record.operate_time),
    }
}

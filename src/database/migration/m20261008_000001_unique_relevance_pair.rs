use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX_NAME: &str = "idx_relevance_key_first_second";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 同一关联类型下 (first_id, second_id) 只能出现一次
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Relevance::Table)
                    .col(Relevance::Key)
                    .col(Relevance::FirstId)
                    .col(Relevance::SecondId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(Relevance::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Relevance {
    Table,
    Key,
    FirstId,
    SecondId,
}

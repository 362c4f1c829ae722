use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Relevance 表
        manager.create_table(
            Table::create()
                .table(Relevance::Table)
                .if_not_exists()
                .col(ColumnDef::new(Relevance::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Relevance::Key).string().not_null())
                .col(ColumnDef::new(Relevance::FirstId).string().not_null())
                .col(ColumnDef::new(Relevance::SecondId).string().not_null())
                .col(ColumnDef::new(Relevance::OperateTime).date_time().not_null())
                .to_owned()
        ).await?;

        // 反向查询 (key, second_id)
        manager.create_index(
            Index::create()
                .name("idx_relevance_key_second_id")
                .table(Relevance::Table)
                .col(Relevance::Key)
                .col(Relevance::SecondId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Relevance::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Relevance {
    Table,
    Id,
    Key,
    FirstId,
    SecondId,
    OperateTime,
}

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_relevance;
mod m20261008_000001_unique_relevance_pair;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_relevance::Migration),
            Box::new(m20261008_000001_unique_relevance_pair::Migration),
        ]
    }
}

pub async fn run_migrations(conn: &sea_orm::DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(conn, None).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

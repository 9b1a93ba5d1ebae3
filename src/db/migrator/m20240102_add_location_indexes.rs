use crate::models::ResourceKind;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn resource_tables() -> impl Iterator<Item = &'static str> {
    ResourceKind::ALL.into_iter().filter_map(ResourceKind::table_name)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for table in resource_tables() {
            conn.execute_unprepared(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_location_id ON {table}(location_id)"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for table in resource_tables() {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS idx_{table}_location_id"))
                .await?;
        }

        Ok(())
    }
}

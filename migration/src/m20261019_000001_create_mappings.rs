use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // code 是主键，唯一性由数据库保证
        manager
            .create_table(
                Table::create()
                    .table(Mapping::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Mapping::Code)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Mapping::Target).text().not_null())
                    .col(
                        ColumnDef::new(Mapping::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 过期清理按创建时间扫描
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mappings_created_at")
                    .table(Mapping::Table)
                    .col(Mapping::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_mappings_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Mapping::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Mapping {
    #[sea_orm(iden = "mappings")]
    Table,
    Code,
    Target,
    CreatedAt,
}

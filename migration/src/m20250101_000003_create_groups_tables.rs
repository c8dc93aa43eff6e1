use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Name,
    Code,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GroupMembers {
    Table,
    GroupId,
    UserId,
    JoinedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Groups::Table)
                .if_not_exists()
                .col(ColumnDef::new(Groups::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Groups::Name).string().not_null())
                .col(ColumnDef::new(Groups::Code).string().not_null().unique_key())
                .col(ColumnDef::new(Groups::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Groups::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_groups_created_by")
                        .from(Groups::Table, Groups::CreatedBy)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(GroupMembers::Table)
                .if_not_exists()
                .col(ColumnDef::new(GroupMembers::GroupId).uuid().not_null())
                .col(ColumnDef::new(GroupMembers::UserId).uuid().not_null())
                .col(ColumnDef::new(GroupMembers::JoinedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .primary_key(
                    Index::create()
                        .name("pk_group_members")
                        .col(GroupMembers::GroupId)
                        .col(GroupMembers::UserId)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_group_members_group")
                        .from(GroupMembers::Table, GroupMembers::GroupId)
                        .to(Groups::Table, Groups::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_group_members_user")
                        .from(GroupMembers::Table, GroupMembers::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_group_members_group")
                .table(GroupMembers::Table)
                .col(GroupMembers::GroupId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_group_members_user")
                .table(GroupMembers::Table)
                .col(GroupMembers::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(GroupMembers::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Groups::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

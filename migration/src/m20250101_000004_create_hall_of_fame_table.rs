use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum HallOfFame {
    Table,
    Id,
    PeriodType,
    PeriodStart,
    PeriodEnd,
    UserId,
    UserName,
    TotalAmount,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(HallOfFame::Table)
                .if_not_exists()
                .col(ColumnDef::new(HallOfFame::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(HallOfFame::PeriodType).string().not_null())
                .col(ColumnDef::new(HallOfFame::PeriodStart).date().not_null())
                .col(ColumnDef::new(HallOfFame::PeriodEnd).date().not_null())
                .col(ColumnDef::new(HallOfFame::UserId).uuid().not_null())
                .col(ColumnDef::new(HallOfFame::UserName).string().not_null())
                .col(ColumnDef::new(HallOfFame::TotalAmount).big_integer().not_null())
                .col(ColumnDef::new(HallOfFame::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_hall_of_fame_user")
                        .from(HallOfFame::Table, HallOfFame::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // one winner per period; the recorder relies on this when two readers race
        m.create_index(
            Index::create()
                .name("uq_hall_of_fame_period")
                .table(HallOfFame::Table)
                .col(HallOfFame::PeriodType)
                .col(HallOfFame::PeriodStart)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(HallOfFame::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

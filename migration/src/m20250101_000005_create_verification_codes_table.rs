use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum VerificationCodes {
    Table,
    Id,
    Email,
    Code,
    Purpose,
    ExpiresAt,
    Used,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(VerificationCodes::Table)
                .if_not_exists()
                .col(ColumnDef::new(VerificationCodes::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(VerificationCodes::Email).string().not_null())
                .col(ColumnDef::new(VerificationCodes::Code).string().not_null())
                .col(ColumnDef::new(VerificationCodes::Purpose).string().not_null())
                .col(ColumnDef::new(VerificationCodes::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(VerificationCodes::Used).boolean().not_null().default(false))
                .col(ColumnDef::new(VerificationCodes::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_verification_codes_email_purpose")
                .table(VerificationCodes::Table)
                .col(VerificationCodes::Email)
                .col(VerificationCodes::Purpose)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(VerificationCodes::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

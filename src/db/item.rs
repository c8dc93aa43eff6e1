use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, period::PeriodWindow};
use chrono::{DateTime, Utc};
use entity::item::{ActiveModel as ItemActive, Column, Entity as Item, Model as ItemModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn create_item(
        &self,
        user_id: Uuid,
        name: String,
        price: i64,
        created_at: DateTime<Utc>,
    ) -> Result<ItemModel, AppError> {
        Ok(ItemActive {
            user_id: Set(user_id),
            name: Set(name),
            price: Set(price),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    /// Newest first, optionally limited to one period.
    pub async fn list_items_for_user(
        &self,
        user_id: Uuid,
        window: Option<PeriodWindow>,
    ) -> Result<Vec<ItemModel>, AppError> {
        let mut finder = Item::find().filter(Column::UserId.eq(user_id));
        if let Some(w) = window {
            finder = finder
                .filter(Column::CreatedAt.gte(w.start))
                .filter(Column::CreatedAt.lt(w.end));
        }
        Ok(finder
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn get_item(&self, id: i32) -> Result<ItemModel, AppError> {
        Ok(Item::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Item not found".into()))?)
    }

    /// Only the owner may delete an item.
    pub async fn delete_item(&self, id: i32, user_id: Uuid) -> Result<(), AppError> {
        let item = self.get_item(id).await?;
        if item.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        item.delete(&self.database_connection).await?;
        Ok(())
    }
}

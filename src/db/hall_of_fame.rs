use crate::db::postgres_service::PostgresService;
use crate::types::{
    error::AppError,
    period::{Period, PeriodWindow},
};
use chrono::{DateTime, FixedOffset, Utc};
use entity::hall_of_fame::{ActiveModel as FameActive, Column, Entity as Fame, Model as FameModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::info;

/// How many finished periods of each kind are looked at when filling gaps.
pub const BACKFILL_PERIODS: usize = 4;

impl PostgresService {
    pub async fn hall_of_fame_exists(&self, window: &PeriodWindow) -> Result<bool, AppError> {
        Ok(Fame::find()
            .filter(Column::PeriodType.eq(window.period.as_str()))
            .filter(Column::PeriodStart.eq(window.local_start_date()))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// Freezes the winner of a finished window. At most one row per `(period_type, period_start)`,
    /// enforced by `uq_hall_of_fame_period`. Returns `None` when the period was already recorded
    /// or nobody saved anything.
    pub async fn record_period_winner(&self, window: &PeriodWindow) -> Result<Option<FameModel>, AppError> {
        let Some(winner) = self.top_saver(window).await? else {
            return Ok(None);
        };

        let inserted = FameActive {
            period_type: Set(window.period.as_str().to_string()),
            period_start: Set(window.local_start_date()),
            period_end: Set(window.local_last_date()),
            user_id: Set(winner.id),
            user_name: Set(winner.name),
            total_amount: Set(winner.total),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await;

        match inserted.map_err(AppError::from) {
            Ok(row) => {
                info!(
                    "hall of fame: {} {} -> {} ({})",
                    row.period_type, row.period_start, row.user_name, row.total_amount
                );
                Ok(Some(row))
            }
            // recorded earlier, or a concurrent reader got there first
            Err(AppError::AlreadyExists) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Records the latest finished week and month, walking back over unrecorded ones.
    pub async fn record_completed_periods(
        &self,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Vec<FameModel>, AppError> {
        let mut recorded = Vec::new();
        for period in [Period::Week, Period::Month] {
            let mut window = PeriodWindow::current(period, now, offset);
            for _ in 0..BACKFILL_PERIODS {
                let Some(prev) = window.previous() else { break };
                window = prev;
                if self.hall_of_fame_exists(&window).await? {
                    break;
                }
                if let Some(row) = self.record_period_winner(&window).await? {
                    recorded.push(row);
                }
            }
        }
        Ok(recorded)
    }

    pub async fn list_hall_of_fame(&self, limit: u64) -> Result<Vec<FameModel>, AppError> {
        Ok(Fame::find()
            .order_by_desc(Column::PeriodStart)
            .order_by_asc(Column::PeriodType)
            .limit(limit)
            .all(&self.database_connection)
            .await?)
    }
}

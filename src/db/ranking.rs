use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, period::PeriodWindow, ranking::RankingEntry};
use sea_orm::FromQueryResult;

impl PostgresService {
    /// Everyone's net total inside the window. Users with nothing logged rank at 0.
    pub async fn rankings(&self, window: &PeriodWindow, limit: u64) -> Result<Vec<RankingEntry>, AppError> {
        let stmt = self.statement(
            r#"
            SELECT u.id,
                   u.nickname AS name,
                   COALESCE(SUM(i.price), 0)::BIGINT AS total,
                   COUNT(i.id)::BIGINT AS item_count
            FROM users u
            LEFT JOIN items i
                   ON i.user_id = u.id
                  AND i.created_at >= $1
                  AND i.created_at < $2
            GROUP BY u.id, u.nickname
            ORDER BY total DESC, u.nickname ASC, u.id ASC
            LIMIT $3
            "#,
            [window.start.into(), window.end.into(), (limit as i64).into()],
        );
        Ok(RankingEntry::find_by_statement(stmt)
            .all(&self.database_connection)
            .await?)
    }

    /// Leader of the window, if anyone actually saved something.
    pub async fn top_saver(&self, window: &PeriodWindow) -> Result<Option<RankingEntry>, AppError> {
        Ok(self
            .rankings(window, 1)
            .await?
            .into_iter()
            .next()
            .filter(|e| e.total > 0))
    }
}

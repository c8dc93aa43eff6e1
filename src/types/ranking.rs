use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RANKING_LIMIT: u64 = 100;

#[derive(Deserialize, Debug, Default)]
pub struct RankingQuery {
    pub period: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct RankingEntry {
    pub id: Uuid,
    pub name: String,
    pub total: i64,
    pub item_count: i64,
}

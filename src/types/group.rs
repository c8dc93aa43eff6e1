use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

pub const MAX_GROUP_NAME_LEN: usize = 30;

#[derive(Serialize, Deserialize, Debug)]
pub struct RGroupCreate {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RGroupJoin {
    pub code: String,
}

impl RGroupCreate {
    pub fn validate(&self) -> Result<String, AppError> {
        let name = self.name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_GROUP_NAME_LEN {
            return Err(AppError::Validation(format!(
                "group name must be 1 to {MAX_GROUP_NAME_LEN} characters"
            )));
        }
        Ok(name.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, FromQueryResult)]
pub struct GroupSummary {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromQueryResult)]
pub struct GroupMemberStanding {
    pub id: Uuid,
    pub name: String,
    pub weekly_total: i64,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GroupDetail {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub members: Vec<GroupMemberStanding>,
}

impl GroupDetail {
    pub fn new(group: entity::group::Model, members: Vec<GroupMemberStanding>) -> Self {
        Self {
            id: group.id,
            name: group.name,
            code: group.code,
            created_by: group.created_by,
            created_at: group.created_at,
            members,
        }
    }
}

/// What happened to the group after a member left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    Left,
    OwnershipPassed(Uuid),
    GroupDeleted,
}

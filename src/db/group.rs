use crate::db::postgres_service::PostgresService;
use crate::types::{
    error::AppError,
    group::{Departure, GroupMemberStanding, GroupSummary},
    period::PeriodWindow,
};
use crate::utils::token;
use chrono::Utc;
use entity::group::{ActiveModel as GroupActive, Column as GroupColumn, Entity as Group, Model as GroupModel};
use entity::group_member::{
    ActiveModel as MemberActive, Column as MemberColumn, Entity as Member,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, FromQueryResult, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

const CODE_ATTEMPTS: usize = 5;

impl PostgresService {
    /// Creates the group and enrolls its creator.
    pub async fn create_group(&self, creator: Uuid, name: String) -> Result<GroupModel, AppError> {
        let codes = std::iter::repeat_with(token::new_group_code).take(CODE_ATTEMPTS);
        self.create_group_with_codes(creator, name, codes).await
    }

    /// Tries each candidate join code in turn. The unique index on `groups.code`
    /// is the collision check, so a code taken between attempts just moves on.
    pub async fn create_group_with_codes<I>(
        &self,
        creator: Uuid,
        name: String,
        codes: I,
    ) -> Result<GroupModel, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        for code in codes {
            match self.insert_group(creator, name.clone(), code).await {
                Err(AppError::AlreadyExists) => continue,
                other => return other,
            }
        }
        Err(AppError::Internal("could not allocate a group code".into()))
    }

    async fn insert_group(&self, creator: Uuid, name: String, code: String) -> Result<GroupModel, AppError> {
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;
        let group = GroupActive {
            id: Set(token::new_id()),
            name: Set(name),
            code: Set(code),
            created_by: Set(creator),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;
        MemberActive {
            group_id: Set(group.id),
            user_id: Set(creator),
            joined_at: Set(now),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(group)
    }

    pub async fn get_group(&self, id: Uuid) -> Result<GroupModel, AppError> {
        Ok(Group::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?)
    }

    /// Codes are matched case-insensitively.
    pub async fn get_group_by_code(&self, code: &str) -> Result<GroupModel, AppError> {
        Ok(Group::find()
            .filter(GroupColumn::Code.eq(code.trim().to_ascii_uppercase()))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?)
    }

    pub async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(Member::find_by_id((group_id, user_id))
            .one(&self.database_connection)
            .await?
            .is_some())
    }

    pub async fn join_group(&self, code: &str, user_id: Uuid) -> Result<GroupModel, AppError> {
        let group = self.get_group_by_code(code).await?;
        if self.is_group_member(group.id, user_id).await? {
            return Err(AppError::Conflict("already a member".into()));
        }
        MemberActive {
            group_id: Set(group.id),
            user_id: Set(user_id),
            joined_at: Set(Utc::now()),
        }
        .insert(&self.database_connection)
        .await?;
        Ok(group)
    }

    pub async fn list_groups_for_user(&self, user_id: Uuid) -> Result<Vec<GroupSummary>, AppError> {
        let stmt = self.statement(
            r#"
            SELECT g.id,
                   g.name,
                   g.code,
                   g.created_by,
                   g.created_at,
                   (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.id)::BIGINT AS member_count
            FROM groups g
            JOIN group_members gm ON gm.group_id = g.id
            WHERE gm.user_id = $1
            ORDER BY gm.joined_at ASC, g.id ASC
            "#,
            [user_id.into()],
        );
        Ok(GroupSummary::find_by_statement(stmt)
            .all(&self.database_connection)
            .await?)
    }

    /// Members ranked by their net total inside `window`.
    pub async fn group_standings(
        &self,
        group_id: Uuid,
        window: &PeriodWindow,
    ) -> Result<Vec<GroupMemberStanding>, AppError> {
        let stmt = self.statement(
            r#"
            SELECT u.id,
                   u.nickname AS name,
                   COALESCE(SUM(i.price), 0)::BIGINT AS weekly_total,
                   gm.joined_at
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            LEFT JOIN items i
                   ON i.user_id = u.id
                  AND i.created_at >= $2
                  AND i.created_at < $3
            WHERE gm.group_id = $1
            GROUP BY u.id, u.nickname, gm.joined_at
            ORDER BY weekly_total DESC, gm.joined_at ASC
            "#,
            [group_id.into(), window.start.into(), window.end.into()],
        );
        Ok(GroupMemberStanding::find_by_statement(stmt)
            .all(&self.database_connection)
            .await?)
    }

    /// `actor` leaves, or the creator removes `target`.
    /// An emptied group is deleted; a departing creator hands the group to the longest-standing member.
    pub async fn remove_group_member(
        &self,
        group_id: Uuid,
        actor: Uuid,
        target: Uuid,
    ) -> Result<Departure, AppError> {
        let txn = self.database_connection.begin().await?;

        let group = Group::find_by_id(group_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?;
        if actor != target && actor != group.created_by {
            return Err(AppError::Forbidden);
        }

        let membership = Member::find_by_id((group_id, target))
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Not a member".into()))?;
        membership.delete(&txn).await?;

        let next_owner = Member::find()
            .filter(MemberColumn::GroupId.eq(group_id))
            .order_by_asc(MemberColumn::JoinedAt)
            .order_by_asc(MemberColumn::UserId)
            .one(&txn)
            .await?;

        let outcome = match next_owner {
            None => {
                group.delete(&txn).await?;
                Departure::GroupDeleted
            }
            Some(next) if target == group.created_by => {
                let mut am: GroupActive = group.into();
                am.created_by = Set(next.user_id);
                am.update(&txn).await?;
                Departure::OwnershipPassed(next.user_id)
            }
            Some(_) => Departure::Left,
        };

        txn.commit().await?;
        info!("group {group_id}: member {target} removed by {actor} ({outcome:?})");
        Ok(outcome)
    }

    /// Creator only. Memberships go with the group.
    pub async fn delete_group(&self, group_id: Uuid, actor: Uuid) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let group = Group::find_by_id(group_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?;
        if group.created_by != actor {
            return Err(AppError::Forbidden);
        }
        Member::delete_many()
            .filter(MemberColumn::GroupId.eq(group_id))
            .exec(&txn)
            .await?;
        group.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

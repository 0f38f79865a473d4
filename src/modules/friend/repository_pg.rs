use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{model::FriendProfile, repository::FriendRepository, schema::FriendEntity},
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
        SELECT CASE
            WHEN user_id = $1 THEN friend_id
            ELSE user_id
        END
        FROM friends
        WHERE user_id = $1
           OR friend_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendProfile>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendProfile>(
            r#"
        SELECT
            u.id,
            u.username,
            u.display_name,
            u.avatar_url
        FROM friends f
        JOIN users u
            ON u.id = CASE
                WHEN f.user_id = $1 THEN f.friend_id
                ELSE f.user_id
            END
        WHERE f.user_id = $1
           OR f.friend_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendEntity>(
            r#"
        SELECT * FROM friends
        WHERE (user_id = $1 AND friend_id = $2)
           OR (user_id = $2 AND friend_id = $1)
        "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn create_friendship(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let result = sqlx::query(
            r#"
        DELETE FROM friends
        WHERE (user_id = $1 AND friend_id = $2)
           OR (user_id = $2 AND friend_id = $1)
        "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

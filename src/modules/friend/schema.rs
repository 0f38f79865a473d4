use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One directed row per friendship; both orientations mean the same edge.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendEntity {
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

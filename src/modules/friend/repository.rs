use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::FriendProfile;
use crate::modules::friend::schema::FriendEntity;

#[async_trait::async_trait]
pub trait FriendRepository {
    /// Ids of everyone sharing an edge with `user_id`, whichever side of the
    /// row they were stored on. Unknown ids yield an empty list. Duplicate
    /// edges are not collapsed; callers use the result as a membership set.
    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;

    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendProfile>, error::SystemError>;

    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendEntity>, error::SystemError>;

    async fn create_friendship(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<(), error::SystemError>;

    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{model::FriendProfile, repository::FriendRepository},
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct FriendService<F, U>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
}

impl<F, U> FriendService<F, U>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<F>, user_repo: Arc<U>) -> Self {
        FriendService { friend_repo, user_repo }
    }

    #[allow(dead_code)]
    pub async fn is_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<bool, error::SystemError> {
        let friendship = self.friend_repo.find_friendship(&user_id, &friend_id).await?;
        Ok(friendship.is_some())
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendProfile>, error::SystemError> {
        let friends = self.friend_repo.find_friends(&user_id).await?;
        Ok(friends)
    }

    pub async fn add_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<FriendProfile, error::SystemError> {
        if user_id == friend_id {
            return Err(error::SystemError::bad_request("Cannot add yourself as a friend"));
        }

        let friend = self
            .user_repo
            .find_by_id(&friend_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if self.friend_repo.find_friendship(&user_id, &friend_id).await?.is_some() {
            return Err(error::SystemError::bad_request("Users are already friends"));
        }

        self.friend_repo.create_friendship(&user_id, &friend_id).await?;

        Ok(FriendProfile::from(friend))
    }

    pub async fn remove_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let removed = self.friend_repo.delete_friendship(&user_id, &friend_id).await?;
        if !removed {
            return Err(error::SystemError::not_found("Friendship not found"));
        }
        Ok(())
    }
}

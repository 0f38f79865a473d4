use uuid::Uuid;

use crate::{
    api::error,
    modules::user::model::{InsertUser, UpdateProfileModel},
    modules::user::schema::UserEntity,
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError>;

    async fn update_profile(
        &self,
        id: &Uuid,
        changes: &UpdateProfileModel,
    ) -> Result<Option<UserEntity>, error::SystemError>;
}

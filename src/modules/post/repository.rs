use uuid::Uuid;

use crate::api::error;
use crate::modules::post::model::{CommentWithAuthor, NewComment, NewPost, UpdatePost};
use crate::modules::post::schema::{CommentEntity, PostEntity};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError>;

    async fn find_by_id(&self, post_id: i64) -> Result<Option<PostEntity>, error::SystemError>;

    /// Returns false when the post does not exist.
    async fn update(
        &self,
        post_id: i64,
        changes: &UpdatePost,
    ) -> Result<bool, error::SystemError>;

    async fn delete(&self, post_id: i64) -> Result<bool, error::SystemError>;

    /// Single-statement increment, so concurrent likes never lose counts.
    async fn increment_likes(&self, post_id: i64) -> Result<bool, error::SystemError>;

    async fn exists(&self, post_id: i64) -> Result<bool, error::SystemError>;

    async fn is_author(
        &self,
        post_id: i64,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// One page of posts authored by any of `authors`, newest first with id
    /// as the tie-break so identical timestamps page deterministically.
    async fn find_by_authors(
        &self,
        authors: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn count_by_authors(&self, authors: &[Uuid]) -> Result<i64, error::SystemError>;
}

#[async_trait::async_trait]
pub trait CommentRepository {
    async fn create(&self, comment: &NewComment)
        -> Result<CommentWithAuthor, error::SystemError>;

    async fn find_by_id(
        &self,
        comment_id: i64,
    ) -> Result<Option<CommentEntity>, error::SystemError>;

    async fn delete(&self, comment_id: i64) -> Result<bool, error::SystemError>;

    /// All comments for the given posts with their authors attached, oldest
    /// first within a post.
    async fn find_for_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<CommentWithAuthor>, error::SystemError>;
}

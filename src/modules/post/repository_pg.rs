use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{CommentWithAuthor, NewComment, NewPost, UpdatePost},
        repository::{CommentRepository, PostRepository},
        schema::{CommentEntity, PostEntity},
    },
};

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
        let created = sqlx::query_as::<_, PostEntity>(
            r#"
        INSERT INTO posts (user_id, feeling, text, likes, photo, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
        )
        .bind(post.user_id)
        .bind(post.feeling)
        .bind(&post.text)
        .bind(post.likes)
        .bind(&post.photo)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, post_id: i64) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn update(
        &self,
        post_id: i64,
        changes: &UpdatePost,
    ) -> Result<bool, error::SystemError> {
        let result =
            sqlx::query("UPDATE posts SET feeling = $2, text = $3, photo = $4 WHERE id = $1")
                .bind(post_id)
                .bind(changes.feeling)
                .bind(&changes.text)
                .bind(&changes.photo)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: i64) -> Result<bool, error::SystemError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_likes(&self, post_id: i64) -> Result<bool, error::SystemError> {
        let result = sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, post_id: i64) -> Result<bool, error::SystemError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn is_author(
        &self,
        post_id: i64,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let is_author = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(is_author)
    }

    async fn find_by_authors(
        &self,
        authors: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let posts = sqlx::query_as::<_, PostEntity>(
            r#"
        SELECT * FROM posts
        WHERE user_id = ANY($1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
        )
        .bind(authors)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_by_authors(&self, authors: &[Uuid]) -> Result<i64, error::SystemError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = ANY($1)")
                .bind(authors)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }
}

#[async_trait::async_trait]
impl CommentRepository for PostRepositoryPg {
    async fn create(
        &self,
        comment: &NewComment,
    ) -> Result<CommentWithAuthor, error::SystemError> {
        let created = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
        WITH inserted AS (
            INSERT INTO comments (post_id, user_id, text)
            VALUES ($1, $2, $3)
            RETURNING *
        )
        SELECT
            i.id,
            i.post_id,
            i.user_id,
            i.text,
            i.created_at,
            u.username,
            u.display_name,
            u.avatar_url
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#,
        )
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(
        &self,
        comment_id: i64,
    ) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn delete(&self, comment_id: i64) -> Result<bool, error::SystemError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_for_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<CommentWithAuthor>, error::SystemError> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
        SELECT
            c.id,
            c.post_id,
            c.user_id,
            c.text,
            c.created_at,
            u.username,
            u.display_name,
            u.avatar_url
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = ANY($1)
        ORDER BY c.created_at ASC, c.id ASC
        "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::post::schema::{Feeling, PostEntity};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub feeling: Feeling,
    pub text: String,
    pub likes: i32,
    pub photo: Option<Vec<u8>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Edit overwrites all three fields; `photo: None` clears a stored photo.
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub feeling: Feeling,
    pub text: String,
    pub photo: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: Uuid,
    pub text: String,
}

/// A comment row joined with its author, as the feed needs it in one fetch.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: CommentAuthor,
}

impl From<CommentWithAuthor> for CommentModel {
    fn from(row: CommentWithAuthor) -> Self {
        CommentModel {
            id: row.id,
            post_id: row.post_id,
            text: row.text,
            created_at: row.created_at,
            author: CommentAuthor {
                id: row.user_id,
                username: row.username,
                display_name: row.display_name,
                avatar_url: row.avatar_url,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostModel {
    pub id: i64,
    pub user_id: Uuid,
    pub feeling: Feeling,
    pub text: String,
    pub likes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub comments: Vec<CommentModel>,
}

impl PostModel {
    pub fn from_entity(post: PostEntity, comments: Vec<CommentModel>) -> Self {
        PostModel {
            id: post.id,
            user_id: post.user_id,
            feeling: post.feeling,
            text: post.text,
            likes: post.likes,
            photo: post.photo,
            created_at: post.created_at,
            comments,
        }
    }
}

fn default_page_index() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    #[serde(default = "default_page_index")]
    #[validate(range(min = 1))]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentBody {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

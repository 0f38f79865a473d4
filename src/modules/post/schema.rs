use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "feeling", rename_all = "UPPERCASE")]
pub enum Feeling {
    Happy,
    Sad,
    Excited,
    Loved,
    Angry,
    Adventurous,
}

impl std::str::FromStr for Feeling {
    type Err = UnknownFeeling;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "happy" => Ok(Feeling::Happy),
            "sad" => Ok(Feeling::Sad),
            "excited" => Ok(Feeling::Excited),
            "loved" => Ok(Feeling::Loved),
            "angry" => Ok(Feeling::Angry),
            "adventurous" => Ok(Feeling::Adventurous),
            _ => Err(UnknownFeeling),
        }
    }
}

#[derive(Debug)]
pub struct UnknownFeeling;

#[derive(Debug, Clone, FromRow)]
pub struct PostEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub feeling: Feeling,
    pub text: String,
    pub likes: i32,
    pub photo: Option<Vec<u8>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

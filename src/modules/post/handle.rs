use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpRequest};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::friend::repository_pg::FriendRepositoryPg;
use crate::modules::photo::model::PhotoUpload;
use crate::modules::post::model::{CommentModel, CreateCommentBody, FeedQuery, PostModel};
use crate::modules::post::repository_pg::PostRepositoryPg;
use crate::modules::post::schema::Feeling;
use crate::modules::post::service::PostService;
use crate::utils::{PageRequest, PaginatedList, ValidatedJson, ValidatedQuery};

pub type PostSvc = PostService<PostRepositoryPg, PostRepositoryPg, FriendRepositoryPg>;

struct PostForm {
    feeling: Feeling,
    text: String,
    photo: Option<PhotoUpload>,
}

/// Pulls `feeling`, `text` and an optional `photo` file out of a multipart
/// form. Unknown fields are skipped.
async fn read_post_form(mut payload: Multipart) -> Result<PostForm, error::Error> {
    let mut feeling = None;
    let mut text = None;
    let mut photo = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| error::Error::bad_request("Malformed multipart payload"))?
    {
        let Some(content_disposition) = field.content_disposition() else {
            continue;
        };
        let name = content_disposition.get_name().unwrap_or("").to_string();
        let filename = content_disposition.get_filename().map(|s| s.to_string());
        let content_type = field.content_type().map(|m| m.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) =
            field.try_next().await.map_err(|_| error::Error::InternalServer)?
        {
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "feeling" => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| error::Error::bad_request("Field 'feeling' is not valid UTF-8"))?;
                feeling = Some(value.parse::<Feeling>().map_err(|_| {
                    error::Error::bad_request(format!("Unknown feeling '{value}'"))
                })?);
            }
            "text" => {
                text = Some(String::from_utf8(bytes).map_err(|_| {
                    error::Error::bad_request("Field 'text' is not valid UTF-8")
                })?);
            }
            "photo" => {
                photo = Some(PhotoUpload {
                    filename: filename.unwrap_or_default(),
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let feeling = feeling.ok_or_else(|| error::Error::bad_request("Missing 'feeling' field"))?;
    let text = text.ok_or_else(|| error::Error::bad_request("Missing 'text' field"))?;

    Ok(PostForm { feeling, text, photo })
}

#[get("/feed")]
pub async fn get_friend_feed(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<FeedQuery>,
    req: HttpRequest,
) -> Result<success::Success<PaginatedList<PostModel>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let page = PageRequest { page_index: query.0.page_index, page_size: query.0.page_size };
    let feed = post_service.friend_feed(user_id, page).await?;

    Ok(success::Success::ok(Some(feed)).message("Feed retrieved successfully"))
}

#[get("/mine")]
pub async fn get_own_feed(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<FeedQuery>,
    req: HttpRequest,
) -> Result<success::Success<PaginatedList<PostModel>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let page = PageRequest { page_index: query.0.page_index, page_size: query.0.page_size };
    let feed = post_service.own_feed(user_id, page).await?;

    Ok(success::Success::ok(Some(feed)).message("Timeline retrieved successfully"))
}

#[post("/")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<PostModel>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let form = read_post_form(payload).await?;

    let post = post_service.create(user_id, form.feeling, form.text, form.photo).await?;

    Ok(success::Success::created(Some(post)).message("Post created successfully"))
}

#[get("/{post_id}")]
pub async fn get_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<PostModel>, error::Error> {
    let post = post_service.post_by_id(*post_id).await?;
    Ok(success::Success::ok(Some(post)).message("Post retrieved successfully"))
}

#[put("/{post_id}")]
pub async fn edit_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let post_id = *post_id;

    if !post_service.exists(post_id).await? {
        return Err(error::Error::not_found("Post not found"));
    }
    if !post_service.user_is_authorized_to_edit(post_id, user_id).await? {
        return Err(error::Error::forbidden("You can only edit your own posts"));
    }

    let form = read_post_form(payload).await?;
    post_service.edit(post_id, form.feeling, form.text, form.photo).await?;

    Ok(success::Success::ok(None).message("Post updated successfully"))
}

#[delete("/{post_id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let post_id = *post_id;

    if !post_service.exists(post_id).await? {
        return Err(error::Error::not_found("Post not found"));
    }
    if !post_service.user_is_authorized_to_edit(post_id, user_id).await? {
        return Err(error::Error::forbidden("You can only delete your own posts"));
    }

    post_service.delete(post_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{post_id}/like")]
pub async fn like_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<()>, error::Error> {
    post_service.like(*post_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{post_id}/comments")]
pub async fn add_comment(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    body: ValidatedJson<CreateCommentBody>,
    req: HttpRequest,
) -> Result<success::Success<CommentModel>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let comment = post_service.add_comment(*post_id, user_id, body.0.text).await?;

    Ok(success::Success::created(Some(comment)).message("Comment added successfully"))
}

#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    post_service: web::Data<PostSvc>,
    comment_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.delete_comment(*comment_id, user_id).await?;
    Ok(success::Success::no_content())
}

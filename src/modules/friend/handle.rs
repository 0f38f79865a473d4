use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{model::FriendProfile, repository_pg::FriendRepositoryPg, service::FriendService},
        user::repository_pg::UserRepositoryPg,
    },
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[get("/")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendProfile>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[post("/{friend_id}")]
pub async fn add_friend(
    friend_service: web::Data<FriendSvc>,
    friend_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendProfile>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friend = friend_service.add_friend(user_id, *friend_id).await?;

    Ok(success::Success::created(Some(friend)).message("Friend added successfully"))
}

#[delete("/{friend_id}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    friend_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.remove_friend(user_id, *friend_id).await?;
    Ok(success::Success::no_content())
}

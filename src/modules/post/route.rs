use crate::modules::post::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(get_friend_feed)
            .service(get_own_feed)
            .service(create_post)
            .service(delete_comment)
            .service(get_post)
            .service(edit_post)
            .service(delete_post)
            .service(like_post)
            .service(add_comment),
    );
}

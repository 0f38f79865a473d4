#![allow(dead_code)]

async fn scratch_friend_feed(pool: sqlx::PgPool) {
    use crate::modules::friend::repository_pg::FriendRepositoryPg;
    use crate::modules::photo::service::PhotoService;
    use crate::modules::post::repository_pg::PostRepositoryPg;
    use crate::modules::post::service::PostService;
    use crate::utils::PageRequest;
    use std::sync::Arc;

    let post_repo = Arc::new(PostRepositoryPg::new(pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(pool));
    let service = PostService::with_dependencies(
        post_repo.clone(),
        post_repo,
        friend_repo,
        PhotoService::with_defaults(),
    );

    let user_id = uuid::Uuid::parse_str("0192aa3e-b90d-7cc3-8f30-9f1d6b7c2a11").unwrap();

    let feed = service
        .friend_feed(user_id, PageRequest { page_index: 1, page_size: 10 })
        .await
        .unwrap();

    println!("{} posts, {} pages", feed.total_items, feed.total_pages);

    assert_eq!(feed.page_index, 1);
}

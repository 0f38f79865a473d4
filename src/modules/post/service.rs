use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::repository::FriendRepository;
use crate::modules::photo::{model::PhotoUpload, service::PhotoService};
use crate::modules::post::model::{CommentModel, NewComment, NewPost, PostModel, UpdatePost};
use crate::modules::post::repository::{CommentRepository, PostRepository};
use crate::modules::post::schema::Feeling;
use crate::utils::{PageRequest, PaginatedList};

#[derive(Clone)]
pub struct PostService<P, C, F>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    F: FriendRepository + Send + Sync,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
    friend_repo: Arc<F>,
    photo_service: PhotoService,
}

impl<P, C, F> PostService<P, C, F>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    F: FriendRepository + Send + Sync,
{
    pub fn with_dependencies(
        post_repo: Arc<P>,
        comment_repo: Arc<C>,
        friend_repo: Arc<F>,
        photo_service: PhotoService,
    ) -> Self {
        PostService { post_repo, comment_repo, friend_repo, photo_service }
    }

    /// Feed of the user's own posts plus their friends' posts, newest first.
    pub async fn friend_feed(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PaginatedList<PostModel>, error::SystemError> {
        validate_feed_args(&user_id, &page)?;

        let mut authors = self.friend_repo.find_friend_ids(&user_id).await?;
        authors.push(user_id);

        self.assemble_page(&authors, page).await
    }

    /// The user's own timeline, display-only.
    pub async fn own_feed(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PaginatedList<PostModel>, error::SystemError> {
        validate_feed_args(&user_id, &page)?;

        self.assemble_page(&[user_id], page).await
    }

    pub async fn post_by_id(&self, post_id: i64) -> Result<PostModel, error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        let comments = self.comment_repo.find_for_posts(&[post_id]).await?;
        let comments = comments.into_iter().map(CommentModel::from).collect();

        Ok(PostModel::from_entity(post, comments))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        feeling: Feeling,
        text: String,
        photo: Option<PhotoUpload>,
    ) -> Result<PostModel, error::SystemError> {
        if user_id.is_nil() {
            return Err(error::SystemError::bad_request("User id must not be empty"));
        }

        let photo = match photo {
            Some(upload) => Some(self.photo_service.photo_as_bytes(upload)?),
            None => None,
        };

        let post = self
            .post_repo
            .create(&NewPost {
                user_id,
                feeling,
                text,
                likes: 0,
                photo,
                created_at: chrono::Utc::now(),
            })
            .await?;

        Ok(PostModel::from_entity(post, Vec::new()))
    }

    pub async fn edit(
        &self,
        post_id: i64,
        feeling: Feeling,
        text: String,
        photo: Option<PhotoUpload>,
    ) -> Result<(), error::SystemError> {
        let photo = match photo {
            Some(upload) => Some(self.photo_service.photo_as_bytes(upload)?),
            None => None,
        };

        let updated = self.post_repo.update(post_id, &UpdatePost { feeling, text, photo }).await?;
        if !updated {
            return Err(error::SystemError::not_found("Post not found"));
        }
        Ok(())
    }

    pub async fn delete(&self, post_id: i64) -> Result<(), error::SystemError> {
        let deleted = self.post_repo.delete(post_id).await?;
        if !deleted {
            return Err(error::SystemError::not_found("Post not found"));
        }
        Ok(())
    }

    /// Liking a missing post is deliberately silent, unlike edit/delete.
    pub async fn like(&self, post_id: i64) -> Result<(), error::SystemError> {
        self.post_repo.increment_likes(post_id).await?;
        Ok(())
    }

    pub async fn exists(&self, post_id: i64) -> Result<bool, error::SystemError> {
        self.post_repo.exists(post_id).await
    }

    pub async fn user_is_authorized_to_edit(
        &self,
        post_id: i64,
        user_id: Uuid,
    ) -> Result<bool, error::SystemError> {
        self.post_repo.is_author(post_id, &user_id).await
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        user_id: Uuid,
        text: String,
    ) -> Result<CommentModel, error::SystemError> {
        if !self.post_repo.exists(post_id).await? {
            return Err(error::SystemError::not_found("Post not found"));
        }

        let comment = self.comment_repo.create(&NewComment { post_id, user_id, text }).await?;
        Ok(CommentModel::from(comment))
    }

    pub async fn delete_comment(
        &self,
        comment_id: i64,
        user_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        if comment.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only delete your own comments"));
        }

        self.comment_repo.delete(comment_id).await?;
        Ok(())
    }

    /// Count, page, then attach comments with authors in one secondary fetch.
    async fn assemble_page(
        &self,
        authors: &[Uuid],
        page: PageRequest,
    ) -> Result<PaginatedList<PostModel>, error::SystemError> {
        let (total, posts) = tokio::try_join!(
            self.post_repo.count_by_authors(authors),
            self.post_repo.find_by_authors(authors, page.page_size, page.offset()),
        )?;

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let comments = self.comment_repo.find_for_posts(&post_ids).await?;

        let mut by_post: HashMap<i64, Vec<CommentModel>> = HashMap::new();
        for row in comments {
            by_post.entry(row.post_id).or_default().push(CommentModel::from(row));
        }

        let items = posts
            .into_iter()
            .map(|p| {
                let comments = by_post.remove(&p.id).unwrap_or_default();
                PostModel::from_entity(p, comments)
            })
            .collect();

        Ok(PaginatedList::new(items, page.page_index, page.page_size, total))
    }
}

fn validate_feed_args(user_id: &Uuid, page: &PageRequest) -> Result<(), error::SystemError> {
    if user_id.is_nil() {
        return Err(error::SystemError::bad_request("User id must not be empty"));
    }
    if page.page_index < 1 {
        return Err(error::SystemError::bad_request("Page index must be at least 1"));
    }
    if page.page_size < 1 {
        return Err(error::SystemError::bad_request("Page size must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::friend::model::FriendProfile;
    use crate::modules::friend::schema::FriendEntity;
    use crate::modules::post::model::CommentWithAuthor;
    use crate::modules::post::schema::{CommentEntity, PostEntity};
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemStore {
        posts: Mutex<Vec<PostEntity>>,
        comments: Mutex<Vec<CommentEntity>>,
        edges: Mutex<Vec<(Uuid, Uuid)>>,
        users: Mutex<HashMap<Uuid, String>>,
        next_post_id: AtomicI64,
        next_comment_id: AtomicI64,
    }

    impl MemStore {
        fn register_user(&self, username: &str) -> Uuid {
            let id = Uuid::now_v7();
            self.users.lock().unwrap().insert(id, username.to_string());
            id
        }

        fn befriend(&self, user_id: Uuid, friend_id: Uuid) {
            self.edges.lock().unwrap().push((user_id, friend_id));
        }

        fn insert_post(
            &self,
            user_id: Uuid,
            text: &str,
            created_at: chrono::DateTime<chrono::Utc>,
        ) -> i64 {
            let id = self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1;
            self.posts.lock().unwrap().push(PostEntity {
                id,
                user_id,
                feeling: Feeling::Happy,
                text: text.to_string(),
                likes: 0,
                photo: None,
                created_at,
            });
            id
        }

        fn likes_of(&self, post_id: i64) -> Option<i32> {
            self.posts.lock().unwrap().iter().find(|p| p.id == post_id).map(|p| p.likes)
        }
    }

    #[async_trait::async_trait]
    impl PostRepository for MemStore {
        async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
            let id = self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1;
            let entity = PostEntity {
                id,
                user_id: post.user_id,
                feeling: post.feeling,
                text: post.text.clone(),
                likes: post.likes,
                photo: post.photo.clone(),
                created_at: post.created_at,
            };
            self.posts.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn find_by_id(
            &self,
            post_id: i64,
        ) -> Result<Option<PostEntity>, error::SystemError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == post_id).cloned())
        }

        async fn update(
            &self,
            post_id: i64,
            changes: &UpdatePost,
        ) -> Result<bool, error::SystemError> {
            let mut posts = self.posts.lock().unwrap();
            match posts.iter_mut().find(|p| p.id == post_id) {
                Some(post) => {
                    post.feeling = changes.feeling;
                    post.text = changes.text.clone();
                    post.photo = changes.photo.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, post_id: i64) -> Result<bool, error::SystemError> {
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != post_id);
            Ok(posts.len() < before)
        }

        async fn increment_likes(&self, post_id: i64) -> Result<bool, error::SystemError> {
            let mut posts = self.posts.lock().unwrap();
            match posts.iter_mut().find(|p| p.id == post_id) {
                Some(post) => {
                    post.likes += 1;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn exists(&self, post_id: i64) -> Result<bool, error::SystemError> {
            Ok(self.posts.lock().unwrap().iter().any(|p| p.id == post_id))
        }

        async fn is_author(
            &self,
            post_id: i64,
            user_id: &Uuid,
        ) -> Result<bool, error::SystemError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .any(|p| p.id == post_id && p.user_id == *user_id))
        }

        async fn find_by_authors(
            &self,
            authors: &[Uuid],
            limit: i64,
            offset: i64,
        ) -> Result<Vec<PostEntity>, error::SystemError> {
            let mut posts: Vec<PostEntity> = self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| authors.contains(&p.user_id))
                .cloned()
                .collect();
            posts.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
            });
            Ok(posts.into_iter().skip(offset as usize).take(limit as usize).collect())
        }

        async fn count_by_authors(&self, authors: &[Uuid]) -> Result<i64, error::SystemError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| authors.contains(&p.user_id))
                .count() as i64)
        }
    }

    #[async_trait::async_trait]
    impl CommentRepository for MemStore {
        async fn create(
            &self,
            comment: &NewComment,
        ) -> Result<CommentWithAuthor, error::SystemError> {
            let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst) + 1;
            let entity = CommentEntity {
                id,
                post_id: comment.post_id,
                user_id: comment.user_id,
                text: comment.text.clone(),
                created_at: chrono::Utc::now(),
            };
            self.comments.lock().unwrap().push(entity.clone());

            let username = self
                .users
                .lock()
                .unwrap()
                .get(&comment.user_id)
                .cloned()
                .unwrap_or_default();
            Ok(CommentWithAuthor {
                id: entity.id,
                post_id: entity.post_id,
                user_id: entity.user_id,
                text: entity.text,
                created_at: entity.created_at,
                username: username.clone(),
                display_name: username,
                avatar_url: None,
            })
        }

        async fn find_by_id(
            &self,
            comment_id: i64,
        ) -> Result<Option<CommentEntity>, error::SystemError> {
            Ok(self.comments.lock().unwrap().iter().find(|c| c.id == comment_id).cloned())
        }

        async fn delete(&self, comment_id: i64) -> Result<bool, error::SystemError> {
            let mut comments = self.comments.lock().unwrap();
            let before = comments.len();
            comments.retain(|c| c.id != comment_id);
            Ok(comments.len() < before)
        }

        async fn find_for_posts(
            &self,
            post_ids: &[i64],
        ) -> Result<Vec<CommentWithAuthor>, error::SystemError> {
            let users = self.users.lock().unwrap();
            let mut rows: Vec<CommentWithAuthor> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| post_ids.contains(&c.post_id))
                .map(|c| {
                    let username = users.get(&c.user_id).cloned().unwrap_or_default();
                    CommentWithAuthor {
                        id: c.id,
                        post_id: c.post_id,
                        user_id: c.user_id,
                        text: c.text.clone(),
                        created_at: c.created_at,
                        username: username.clone(),
                        display_name: username,
                        avatar_url: None,
                    }
                })
                .collect();
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(rows)
        }
    }

    #[async_trait::async_trait]
    impl FriendRepository for MemStore {
        async fn find_friend_ids(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(self
                .edges
                .lock()
                .unwrap()
                .iter()
                .filter_map(|(a, b)| {
                    if a == user_id {
                        Some(*b)
                    } else if b == user_id {
                        Some(*a)
                    } else {
                        None
                    }
                })
                .collect())
        }

        async fn find_friends(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<FriendProfile>, error::SystemError> {
            let ids = self.find_friend_ids(user_id).await?;
            let users = self.users.lock().unwrap();
            Ok(ids
                .into_iter()
                .map(|id| {
                    let username = users.get(&id).cloned().unwrap_or_default();
                    FriendProfile {
                        id,
                        username: username.clone(),
                        display_name: username,
                        avatar_url: None,
                    }
                })
                .collect())
        }

        async fn find_friendship(
            &self,
            user_id_a: &Uuid,
            user_id_b: &Uuid,
        ) -> Result<Option<FriendEntity>, error::SystemError> {
            Ok(self
                .edges
                .lock()
                .unwrap()
                .iter()
                .find(|(a, b)| {
                    (a == user_id_a && b == user_id_b) || (a == user_id_b && b == user_id_a)
                })
                .map(|(a, b)| FriendEntity {
                    user_id: *a,
                    friend_id: *b,
                    created_at: chrono::Utc::now(),
                }))
        }

        async fn create_friendship(
            &self,
            user_id: &Uuid,
            friend_id: &Uuid,
        ) -> Result<(), error::SystemError> {
            self.edges.lock().unwrap().push((*user_id, *friend_id));
            Ok(())
        }

        async fn delete_friendship(
            &self,
            user_id_a: &Uuid,
            user_id_b: &Uuid,
        ) -> Result<bool, error::SystemError> {
            let mut edges = self.edges.lock().unwrap();
            let before = edges.len();
            edges.retain(|(a, b)| {
                !((a == user_id_a && b == user_id_b) || (a == user_id_b && b == user_id_a))
            });
            Ok(edges.len() < before)
        }
    }

    type TestService = PostService<MemStore, MemStore, MemStore>;

    fn service(store: &Arc<MemStore>) -> TestService {
        PostService::with_dependencies(
            store.clone(),
            store.clone(),
            store.clone(),
            PhotoService::with_defaults(),
        )
    }

    fn page(page_index: i64, page_size: i64) -> PageRequest {
        PageRequest { page_index, page_size }
    }

    fn ts(secs: i64) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[actix_web::test]
    async fn friend_feed_is_empty_for_user_with_no_friends_and_no_posts() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let loner = store.register_user("loner");

        let feed = service.friend_feed(loner, page(1, 10)).await.unwrap();

        assert!(feed.items.is_empty());
        assert_eq!(feed.total_items, 0);
        assert_eq!(feed.total_pages, 0);
    }

    #[actix_web::test]
    async fn friend_ids_are_symmetric() {
        let store = Arc::new(MemStore::default());
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        store.befriend(anna, boris);

        let of_anna = store.find_friend_ids(&anna).await.unwrap();
        let of_boris = store.find_friend_ids(&boris).await.unwrap();

        assert!(of_anna.contains(&boris));
        assert!(of_boris.contains(&anna));
    }

    #[actix_web::test]
    async fn feed_is_newest_first_with_id_as_tie_break() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");

        let older = store.insert_post(anna, "older", ts(100));
        let tied_low = store.insert_post(anna, "tied low", ts(200));
        let tied_high = store.insert_post(anna, "tied high", ts(200));

        let feed = service.own_feed(anna, page(1, 10)).await.unwrap();

        let order: Vec<i64> = feed.items.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![tied_high, tied_low, older]);
    }

    #[actix_web::test]
    async fn pages_partition_the_feed_without_overlap() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");

        for i in 0..5 {
            store.insert_post(anna, &format!("post {i}"), ts(100 + i));
        }

        let mut seen = Vec::new();
        let first = service.own_feed(anna, page(1, 2)).await.unwrap();
        assert_eq!(first.total_items, 5);
        assert_eq!(first.total_pages, 3);

        for index in 1..=first.total_pages {
            let p = service.own_feed(anna, page(index, 2)).await.unwrap();
            seen.extend(p.items.iter().map(|post| post.id));
        }

        let expected: Vec<i64> = {
            let all = service.own_feed(anna, page(1, 10)).await.unwrap();
            all.items.iter().map(|post| post.id).collect()
        };
        assert_eq!(seen, expected);
        assert_eq!(seen.len(), 5);
    }

    #[actix_web::test]
    async fn friend_feed_spans_self_and_friends_across_pages() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let user = store.register_user("user");
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        let stranger = store.register_user("stranger");
        store.befriend(user, anna);
        store.befriend(boris, user);

        let a1 = store.insert_post(anna, "anna 1", ts(100));
        let a2 = store.insert_post(anna, "anna 2", ts(400));
        let b1 = store.insert_post(boris, "boris 1", ts(300));
        let u1 = store.insert_post(user, "mine", ts(200));
        store.insert_post(stranger, "not visible", ts(500));

        let first = service.friend_feed(user, page(1, 2)).await.unwrap();
        let second = service.friend_feed(user, page(2, 2)).await.unwrap();

        assert_eq!(first.total_items, 4);
        assert_eq!(first.total_pages, 2);

        let first_ids: Vec<i64> = first.items.iter().map(|p| p.id).collect();
        let second_ids: Vec<i64> = second.items.iter().map(|p| p.id).collect();
        assert_eq!(first_ids, vec![a2, b1]);
        assert_eq!(second_ids, vec![u1, a1]);
    }

    #[actix_web::test]
    async fn like_keeps_incrementing_per_call() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let post_id = store.insert_post(anna, "likeable", ts(100));

        for _ in 0..3 {
            service.like(post_id).await.unwrap();
        }

        assert_eq!(store.likes_of(post_id), Some(3));
    }

    #[actix_web::test]
    async fn like_on_missing_post_changes_nothing() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let post_id = store.insert_post(anna, "only post", ts(100));

        service.like(9999).await.unwrap();

        assert_eq!(store.likes_of(post_id), Some(0));
        assert_eq!(store.posts.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn create_then_own_feed_returns_the_fresh_post() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");

        service.create(anna, Feeling::Happy, "hello".to_string(), None).await.unwrap();

        let feed = service.own_feed(anna, page(1, 10)).await.unwrap();
        assert_eq!(feed.items.len(), 1);
        let post = &feed.items[0];
        assert_eq!(post.text, "hello");
        assert_eq!(post.likes, 0);
        assert!(post.photo.is_none());
        assert_eq!(post.feeling, Feeling::Happy);
    }

    #[actix_web::test]
    async fn own_feed_excludes_friends_posts() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        store.befriend(anna, boris);
        store.insert_post(boris, "from boris", ts(100));
        let own = store.insert_post(anna, "from anna", ts(50));

        let feed = service.own_feed(anna, page(1, 10)).await.unwrap();

        let ids: Vec<i64> = feed.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![own]);
    }

    #[actix_web::test]
    async fn feed_rejects_invalid_arguments() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");

        let bad_index = service.friend_feed(anna, page(0, 10)).await;
        assert!(matches!(bad_index, Err(error::SystemError::BadRequest(_))));

        let bad_size = service.friend_feed(anna, page(1, 0)).await;
        assert!(matches!(bad_size, Err(error::SystemError::BadRequest(_))));

        let nil_user = service.friend_feed(Uuid::nil(), page(1, 10)).await;
        assert!(matches!(nil_user, Err(error::SystemError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn edit_and_delete_of_missing_post_are_not_found() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);

        let edit =
            service.edit(42, Feeling::Sad, "rewritten".to_string(), None).await;
        assert!(matches!(edit, Err(error::SystemError::NotFound(_))));

        let delete = service.delete(42).await;
        assert!(matches!(delete, Err(error::SystemError::NotFound(_))));
    }

    #[actix_web::test]
    async fn edit_overwrites_fields_and_clears_photo() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let post_id = store.insert_post(anna, "original", ts(100));
        {
            let mut posts = store.posts.lock().unwrap();
            posts.iter_mut().find(|p| p.id == post_id).unwrap().photo = Some(vec![1, 2, 3]);
        }

        service.edit(post_id, Feeling::Excited, "rewritten".to_string(), None).await.unwrap();

        let posts = store.posts.lock().unwrap();
        let post = posts.iter().find(|p| p.id == post_id).unwrap();
        assert_eq!(post.text, "rewritten");
        assert_eq!(post.feeling, Feeling::Excited);
        assert!(post.photo.is_none());
    }

    #[actix_web::test]
    async fn feed_attaches_comments_with_their_authors() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        store.befriend(anna, boris);
        let post_id = store.insert_post(anna, "commented", ts(100));

        service.add_comment(post_id, boris, "nice trip".to_string()).await.unwrap();

        let feed = service.friend_feed(anna, page(1, 10)).await.unwrap();
        let post = feed.items.iter().find(|p| p.id == post_id).unwrap();
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].text, "nice trip");
        assert_eq!(post.comments[0].author.id, boris);
        assert_eq!(post.comments[0].author.username, "boris");
    }

    #[actix_web::test]
    async fn comment_on_missing_post_is_not_found() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");

        let result = service.add_comment(7, anna, "into the void".to_string()).await;
        assert!(matches!(result, Err(error::SystemError::NotFound(_))));
    }

    #[actix_web::test]
    async fn only_the_author_may_delete_a_comment() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        let post_id = store.insert_post(anna, "commented", ts(100));
        let comment = service.add_comment(post_id, boris, "mine".to_string()).await.unwrap();

        let as_anna = service.delete_comment(comment.id, anna).await;
        assert!(matches!(as_anna, Err(error::SystemError::Forbidden(_))));

        service.delete_comment(comment.id, boris).await.unwrap();
        assert!(store.comments.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn authorization_predicate_matches_the_author_only() {
        let store = Arc::new(MemStore::default());
        let service = service(&store);
        let anna = store.register_user("anna");
        let boris = store.register_user("boris");
        let post_id = store.insert_post(anna, "owned", ts(100));

        assert!(service.user_is_authorized_to_edit(post_id, anna).await.unwrap());
        assert!(!service.user_is_authorized_to_edit(post_id, boris).await.unwrap());
        assert!(service.exists(post_id).await.unwrap());
        assert!(!service.exists(post_id + 1).await.unwrap());
    }
}

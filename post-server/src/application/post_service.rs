use std::sync::Arc;

use crate::application::dto::PostDto;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};

/// Post use-cases over an injected repository. Never recovers from a
/// failure itself; callers decide how store errors surface.
pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Builds a post owned by `owner_id` (id only, never looked up) and
    /// persists it. The returned DTO reflects the saved entity, so the
    /// store-assigned id is already present.
    pub(crate) async fn create_post(
        &self,
        owner_id: &str,
        draft: PostDraft,
    ) -> Result<PostDto, DomainError> {
        let saved = self.repo.save(Post::from_draft(owner_id, draft)).await?;
        Ok(PostDto::from_entity(saved))
    }

    /// Replaces title, description and medias of an existing post. Owner
    /// and creation timestamp are untouched.
    pub(crate) async fn update_post(
        &self,
        post_id: &str,
        draft: PostDraft,
    ) -> Result<PostDto, DomainError> {
        let mut post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(post_id.to_string()))?;

        post.apply_draft(draft);
        let saved = self.repo.save(post).await?;
        Ok(PostDto::from_entity(saved))
    }

    pub(crate) async fn delete_post(&self, post_id: &str) -> Result<(), DomainError> {
        self.repo.delete_by_id(post_id).await
    }

    pub(crate) async fn get_post_by_id(&self, post_id: &str) -> Result<PostDto, DomainError> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(post_id.to_string()))?;
        Ok(PostDto::from_entity(post))
    }

    pub(crate) async fn get_all_posts(&self) -> Result<Vec<PostDto>, DomainError> {
        let posts = self.repo.find_all().await?;
        Ok(posts.into_iter().map(PostDto::from_entity).collect())
    }

    pub(crate) async fn get_posts_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<PostDto>, DomainError> {
        let posts = self.repo.find_by_owner(owner_id).await?;
        Ok(posts.into_iter().map(PostDto::from_entity).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;

    use super::PostService;
    use crate::data::post_repository::PostRepository;
    use crate::domain::error::DomainError;
    use crate::domain::post::{MediaDraft, Post, PostDraft};

    #[derive(Clone, Default)]
    struct FakePostRepo {
        saved_input: Arc<Mutex<Option<Post>>>,
        post_for_find: Arc<Mutex<Option<Post>>>,
        find_all_result: Arc<Mutex<Vec<Post>>>,
        find_by_owner_call: Arc<Mutex<Option<String>>>,
        deleted_id: Arc<Mutex<Option<String>>>,
        store_failure: Arc<Mutex<bool>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self::default()
        }

        fn fail_if_requested(&self) -> Result<(), DomainError> {
            if *self.store_failure.lock().expect("store_failure mutex poisoned") {
                return Err(DomainError::Store("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn find_by_id(&self, _id: &str) -> Result<Option<Post>, DomainError> {
            self.fail_if_requested()?;
            Ok(self
                .post_for_find
                .lock()
                .expect("post_for_find mutex poisoned")
                .clone())
        }

        async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
            self.fail_if_requested()?;
            Ok(self
                .find_all_result
                .lock()
                .expect("find_all_result mutex poisoned")
                .clone())
        }

        async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, DomainError> {
            self.fail_if_requested()?;
            *self
                .find_by_owner_call
                .lock()
                .expect("find_by_owner_call mutex poisoned") = Some(owner_id.to_string());
            Ok(self
                .find_all_result
                .lock()
                .expect("find_all_result mutex poisoned")
                .clone())
        }

        async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
            self.fail_if_requested()?;
            if post.id.is_none() {
                post.id = Some(ObjectId::new());
            }
            *self
                .saved_input
                .lock()
                .expect("saved_input mutex poisoned") = Some(post.clone());
            Ok(post)
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
            self.fail_if_requested()?;
            *self.deleted_id.lock().expect("deleted_id mutex poisoned") = Some(id.to_string());
            Ok(())
        }
    }

    fn service(repo: FakePostRepo) -> PostService {
        PostService::new(Arc::new(repo))
    }

    fn draft(title: &str, description: &str) -> PostDraft {
        PostDraft {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            medias: vec![MediaDraft {
                url: "http://x/y.png".to_string(),
                media_type: "image".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn create_post_persists_and_returns_assigned_id() {
        let repo = FakePostRepo::new();
        let service = service(repo.clone());

        let dto = service
            .create_post("u1", draft("Hello", "World"))
            .await
            .expect("create must succeed");

        assert!(!dto.id.is_empty());
        assert_eq!(dto.posted_by.id, "u1");
        assert_eq!(dto.title, "Hello");
        assert_eq!(dto.description, "World");
        assert_eq!(dto.medias.len(), 1);
        assert_eq!(dto.medias[0].url, "http://x/y.png");

        let saved = repo
            .saved_input
            .lock()
            .expect("saved_input mutex poisoned")
            .clone()
            .expect("repo must receive the post");
        let owner = saved.posted_by.expect("owner must be set");
        assert_eq!(owner.id, "u1");
        assert!(owner.first_name.is_none());
        assert!(saved.posted_at.is_some());
    }

    #[tokio::test]
    async fn update_post_fails_not_found_when_missing() {
        let service = service(FakePostRepo::new());

        let err = service
            .update_post(&ObjectId::new().to_hex(), draft("t", "d"))
            .await
            .expect_err("post is missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_preserves_owner_and_posted_at() {
        let repo = FakePostRepo::new();
        let mut existing = Post::from_draft("u1", draft("old", "old"));
        existing.id = Some(ObjectId::new());
        let original_posted_at = existing.posted_at;
        *repo
            .post_for_find
            .lock()
            .expect("post_for_find mutex poisoned") = Some(existing.clone());

        let service = service(repo.clone());
        let dto = service
            .update_post(&existing.id.expect("id is set").to_hex(), draft("new", "new"))
            .await
            .expect("update must succeed");

        assert_eq!(dto.title, "new");
        assert_eq!(dto.posted_by.id, "u1");

        let saved = repo
            .saved_input
            .lock()
            .expect("saved_input mutex poisoned")
            .clone()
            .expect("repo must receive the updated post");
        assert_eq!(saved.posted_at, original_posted_at);
        assert_eq!(saved.id, existing.id);
    }

    #[tokio::test]
    async fn delete_post_is_unconditional() {
        let repo = FakePostRepo::new();
        let service = service(repo.clone());

        service
            .delete_post("missing-id")
            .await
            .expect("delete must succeed without an existence check");

        assert_eq!(
            repo.deleted_id
                .lock()
                .expect("deleted_id mutex poisoned")
                .as_deref(),
            Some("missing-id")
        );
    }

    #[tokio::test]
    async fn get_post_by_id_fails_not_found_when_missing() {
        let service = service(FakePostRepo::new());

        let err = service
            .get_post_by_id("42")
            .await
            .expect_err("post is missing");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "Post not found with ID: 42");
    }

    #[tokio::test]
    async fn get_all_posts_normalizes_every_entity() {
        let repo = FakePostRepo::new();
        *repo
            .find_all_result
            .lock()
            .expect("find_all_result mutex poisoned") = vec![
            Post::from_draft("u1", draft("a", "a")),
            // A degenerate record with nothing set still normalizes.
            Post {
                id: None,
                posted_by: None,
                posted_at: None,
                title: None,
                description: None,
                medias: None,
            },
        ];

        let service = service(repo);
        let dtos = service.get_all_posts().await.expect("list must succeed");

        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].title, "a");
        assert_eq!(dtos[1].title, "");
        assert_eq!(dtos[1].posted_by.id, "");
        assert!(dtos[1].medias.is_empty());
    }

    #[tokio::test]
    async fn get_posts_by_user_delegates_owner_filter() {
        let repo = FakePostRepo::new();
        let service = service(repo.clone());

        service
            .get_posts_by_user("u7")
            .await
            .expect("list must succeed");

        assert_eq!(
            repo.find_by_owner_call
                .lock()
                .expect("find_by_owner_call mutex poisoned")
                .as_deref(),
            Some("u7")
        );
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let repo = FakePostRepo::new();
        *repo
            .store_failure
            .lock()
            .expect("store_failure mutex poisoned") = true;

        let service = service(repo);
        let err = service
            .get_all_posts()
            .await
            .expect_err("store failure must propagate");
        assert!(matches!(err, DomainError::Store(_)));
    }
}

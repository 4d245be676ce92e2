use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// In-process store selected with `STORAGE_BACKEND=memory`. Insertion
/// order is the store's natural order for listings.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock_read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Post>>, DomainError> {
        self.posts
            .read()
            .map_err(|_| DomainError::Store("post store lock poisoned".to_string()))
    }

    fn lock_write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Post>>, DomainError> {
        self.posts
            .write()
            .map_err(|_| DomainError::Store("post store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let posts = self.lock_read()?;
        Ok(posts.iter().find(|post| post.id == Some(oid)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.lock_read()?.clone())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, DomainError> {
        let posts = self.lock_read()?;
        Ok(posts
            .iter()
            .filter(|post| {
                post.posted_by
                    .as_ref()
                    .is_some_and(|owner| owner.id == owner_id)
            })
            .cloned()
            .collect())
    }

    async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
        let mut posts = self.lock_write()?;
        match post.id {
            Some(oid) => {
                if let Some(existing) = posts.iter_mut().find(|stored| stored.id == Some(oid)) {
                    *existing = post.clone();
                } else {
                    posts.push(post.clone());
                }
            }
            None => {
                post.id = Some(ObjectId::new());
                posts.push(post.clone());
            }
        }
        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(());
        };
        let mut posts = self.lock_write()?;
        posts.retain(|post| post.id != Some(oid));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryPostRepository;
    use crate::data::post_repository::PostRepository;
    use crate::domain::post::{Post, PostDraft};

    fn sample(owner: &str, title: &str) -> Post {
        Post::from_draft(
            owner,
            PostDraft {
                title: Some(title.to_string()),
                description: None,
                medias: vec![],
            },
        )
    }

    #[tokio::test]
    async fn save_assigns_an_id_once() {
        let repo = InMemoryPostRepository::new();

        let saved = repo.save(sample("u1", "a")).await.expect("save");
        let id = saved.id.expect("id must be assigned");

        let resaved = repo.save(saved).await.expect("resave");
        assert_eq!(resaved.id, Some(id));
        assert_eq!(repo.find_all().await.expect("find_all").len(), 1);
    }

    #[tokio::test]
    async fn find_by_owner_filters_on_owner_id() {
        let repo = InMemoryPostRepository::new();
        repo.save(sample("u1", "a")).await.expect("save");
        repo.save(sample("u2", "b")).await.expect("save");
        repo.save(sample("u1", "c")).await.expect("save");

        let posts = repo.find_by_owner("u1").await.expect("find_by_owner");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title.as_deref(), Some("a"));
        assert_eq!(posts[1].title.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_an_error() {
        let repo = InMemoryPostRepository::new();
        repo.delete_by_id(&mongodb::bson::oid::ObjectId::new().to_hex())
            .await
            .expect("delete of missing id must succeed");
        repo.delete_by_id("not-an-object-id")
            .await
            .expect("unparseable id behaves like a missing record");
    }

    #[tokio::test]
    async fn find_by_id_with_unparseable_id_is_none() {
        let repo = InMemoryPostRepository::new();
        let found = repo.find_by_id("not-an-object-id").await.expect("find");
        assert!(found.is_none());
    }
}

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Persistence contract for posts. Ids are opaque strings on this
/// boundary; an id the backing store cannot interpret behaves like an
/// absent record rather than an error.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, DomainError>;
    /// Inserts when the post has no id yet, replaces otherwise. Returns
    /// the stored post with its assigned id.
    async fn save(&self, post: Post) -> Result<Post, DomainError>;
    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Database;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc, from_document, to_document};
use tracing::warn;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

const COLLECTION: &str = "posts";

#[derive(Debug, Clone)]
pub(crate) struct MongoPostRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoPostRepository {
    pub(crate) fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Drains a cursor, decoding each document independently. A document
    /// that fails to decode is dropped from the result and logged; one
    /// bad record must not take down the whole listing.
    async fn collect_posts(
        &self,
        mut cursor: mongodb::Cursor<Document>,
    ) -> Result<Vec<Post>, DomainError> {
        let mut posts = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(map_store_error)? {
            let id = document.get_object_id("_id").ok();
            match from_document::<Post>(document) {
                Ok(post) => posts.push(post),
                Err(err) => {
                    warn!(post_id = ?id, error = %err, "dropping undecodable post document");
                }
            }
        }
        Ok(posts)
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_store_error)?;

        document
            .map(|document| {
                from_document::<Post>(document)
                    .map_err(|err| DomainError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_store_error)?;
        self.collect_posts(cursor).await
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, DomainError> {
        let cursor = self
            .collection
            .find(doc! { "postedBy.id": owner_id })
            .await
            .map_err(map_store_error)?;
        self.collect_posts(cursor).await
    }

    async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
        let oid = match post.id {
            Some(oid) => oid,
            None => {
                // Id is assigned exactly once, here, at persistence time.
                let oid = ObjectId::new();
                post.id = Some(oid);
                oid
            }
        };

        let document =
            to_document(&post).map_err(|err| DomainError::Unexpected(err.to_string()))?;
        self.collection
            .replace_one(doc! { "_id": oid }, document)
            .upsert(true)
            .await
            .map_err(map_store_error)?;

        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(());
        };

        // Deleted count is deliberately ignored; deleting a missing id
        // succeeds.
        self.collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_store_error)?;
        Ok(())
    }
}

fn map_store_error(err: mongodb::error::Error) -> DomainError {
    DomainError::Store(err.to_string())
}

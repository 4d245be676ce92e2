use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::post::{Media, OwnerRef, Post};

/// Wire representation of a post. Never carries null: every optional
/// entity field is substituted with a safe default during normalization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) posted_by: PostedByDto,
    pub(crate) posted_at: DateTime<Utc>,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) medias: Vec<MediaDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostedByDto {
    pub(crate) id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) profile_image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct MediaDto {
    pub(crate) url: String,
    #[serde(rename = "type")]
    pub(crate) media_type: String,
}

impl PostDto {
    /// Normalizes a persisted entity into its null-free wire shape.
    /// Missing text becomes the empty string, a missing owner becomes an
    /// all-empty owner block, missing medias become an empty sequence and
    /// a missing timestamp falls back to the current time.
    pub(crate) fn from_entity(post: Post) -> Self {
        Self {
            id: post.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            posted_by: post.posted_by.map(PostedByDto::from_owner).unwrap_or_else(
                || PostedByDto {
                    id: String::new(),
                    first_name: String::new(),
                    last_name: String::new(),
                    profile_image_url: String::new(),
                },
            ),
            posted_at: post
                .posted_at
                .map(|at| at.to_chrono())
                .unwrap_or_else(Utc::now),
            title: post.title.unwrap_or_default(),
            description: post.description.unwrap_or_default(),
            medias: post
                .medias
                .unwrap_or_default()
                .into_iter()
                .map(MediaDto::from_media)
                .collect(),
        }
    }
}

impl PostedByDto {
    fn from_owner(owner: OwnerRef) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name.unwrap_or_default(),
            last_name: owner.last_name.unwrap_or_default(),
            profile_image_url: owner.profile_image_url.unwrap_or_default(),
        }
    }
}

impl MediaDto {
    fn from_media(media: Media) -> Self {
        Self {
            url: media.url.unwrap_or_default(),
            media_type: media.media_type.unwrap_or_default(),
        }
    }
}

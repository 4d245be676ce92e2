use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted post document. Field names mirror the stored BSON exactly;
/// everything the store may omit is optional here and only normalized at
/// the transfer-object boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    pub(crate) posted_by: Option<OwnerRef>,
    pub(crate) posted_at: Option<DateTime>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) medias: Option<Vec<Media>>,
}

/// Owner reference embedded in a post. Only `id` is guaranteed; the
/// display fields are denormalized copies and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerRef {
    pub(crate) id: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) profile_image_url: Option<String>,
}

impl OwnerRef {
    /// Minimal reference carrying only the owner id. The id is taken
    /// verbatim; there is no user registry to check it against.
    pub(crate) fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            profile_image_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Media {
    pub(crate) url: Option<String>,
    #[serde(rename = "type")]
    pub(crate) media_type: Option<String>,
}

/// Caller-supplied post content, shared by create and update.
#[derive(Debug, Clone)]
pub(crate) struct PostDraft {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) medias: Vec<MediaDraft>,
}

#[derive(Debug, Clone)]
pub(crate) struct MediaDraft {
    pub(crate) url: String,
    pub(crate) media_type: String,
}

impl Post {
    /// A fresh, not-yet-persisted post. `posted_at` is fixed here, at
    /// creation, and never touched again.
    pub(crate) fn from_draft(owner_id: &str, draft: PostDraft) -> Self {
        Self {
            id: None,
            posted_by: Some(OwnerRef::from_id(owner_id)),
            posted_at: Some(DateTime::now()),
            title: draft.title,
            description: draft.description,
            medias: Some(draft_medias(draft.medias)),
        }
    }

    /// Overwrites the mutable content fields. Identity, owner and
    /// creation timestamp are left as persisted.
    pub(crate) fn apply_draft(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.medias = Some(draft_medias(draft.medias));
    }
}

fn draft_medias(medias: Vec<MediaDraft>) -> Vec<Media> {
    medias
        .into_iter()
        .map(|media| Media {
            url: Some(media.url),
            media_type: Some(media.media_type),
        })
        .collect()
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::dto::PostDto;
use crate::domain::post::{MediaDraft, PostDraft};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateUpdatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) medias: Vec<CreateMediaDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateMediaDto {
    pub(crate) url: String,
    #[serde(rename = "type")]
    pub(crate) media_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostQuery {
    pub(crate) user_id: String,
}

impl CreateUpdatePostDto {
    fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title,
            description: self.description,
            medias: self
                .medias
                .into_iter()
                .map(|media| MediaDraft {
                    url: media.url,
                    media_type: media.media_type,
                })
                .collect(),
        }
    }
}

/// Fixed body the read routes answer with on any failure; the original
/// error never reaches the client on those paths.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ReadFailureDto {
    pub(crate) message: String,
    pub(crate) status: String,
}

fn read_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ReadFailureDto {
            message: message.to_string(),
            status: "500".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    params(
        ("userId" = String, Query, description = "Owner id, accepted verbatim")
    ),
    request_body = CreateUpdatePostDto,
    responses(
        (status = 200, description = "Post created", body = PostDto),
        (status = 500, description = "Server error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    Query(query): Query<CreatePostQuery>,
    Json(dto): Json<CreateUpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let created = state
        .post_service
        .create_post(&query.user_id, dto.into_draft())
        .await?;
    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = String, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted (also when the id never existed)"),
        (status = 500, description = "Server error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(&post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 500, description = "Any failure, post-not-found included", body = ReadFailureDto)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Response {
    match state.post_service.get_post_by_id(&post_id).await {
        Ok(post) => (StatusCode::OK, Json(post)).into_response(),
        Err(err) => {
            error!(%post_id, error = %err, "failed to fetch post");
            read_failure("Failed to fetch post due to a server error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts", body = [PostDto]),
        (status = 500, description = "Any failure", body = ReadFailureDto)
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> Response {
    match state.post_service.get_all_posts().await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to fetch all posts");
            read_failure("Failed to fetch posts due to a server error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts/user/{userId}",
    tag = "posts",
    params(
        ("userId" = String, Path, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Posts owned by the user", body = [PostDto]),
        (status = 500, description = "Any failure", body = ReadFailureDto)
    )
)]
pub(crate) async fn get_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.post_service.get_posts_by_user(&user_id).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(err) => {
            error!(%user_id, error = %err, "failed to fetch user's posts");
            read_failure("Failed to fetch user's posts due to a server error")
        }
    }
}

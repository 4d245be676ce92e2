use utoipa::OpenApi;

use crate::application::dto::{MediaDto, PostDto, PostedByDto};
use crate::presentation::handlers::posts::{CreateMediaDto, CreateUpdatePostDto, ReadFailureDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_posts_by_user
    ),
    components(
        schemas(
            CreateUpdatePostDto,
            CreateMediaDto,
            PostDto,
            PostedByDto,
            MediaDto,
            ReadFailureDto
        )
    ),
    tags(
        (name = "posts", description = "User post endpoints")
    )
)]
pub(crate) struct ApiDoc;

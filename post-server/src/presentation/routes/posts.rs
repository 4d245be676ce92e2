use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, get_posts_by_user, list_posts,
};

// update_post has no route; it is reachable only at the service layer.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/{post_id}", get(get_post).delete(delete_post))
        .route("/user/{user_id}", get(get_posts_by_user))
}

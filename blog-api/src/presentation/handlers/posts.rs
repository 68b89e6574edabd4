use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::post::{Post, PostSubmission};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::Identity;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    #[serde(rename = "postID")]
    pub(crate) post_id: String,
    #[serde(rename = "authorID")]
    pub(crate) author_id: String,
    pub(crate) date: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id,
            author_id: post.author_id,
            date: post.date,
            title: post.title,
            content: post.content,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/blog",
    tag = "blog",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Posts listed in store order", body = [PostDto]),
        (status = 400, description = "Store error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.blog_service.list_posts().await?;
    let posts = posts.into_iter().map(PostDto::from).collect();

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "blog",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Missing field or store error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a mentor")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<StatusCode> {
    // An unreadable body is handled like an empty one, so the response is
    // still the 400 naming the first missing field.
    let dto = body.map(|Json(dto)| dto).unwrap_or_default();

    let submission = PostSubmission {
        title: dto.title,
        content: dto.content,
    };
    state
        .blog_service
        .create_post(&identity.username, &identity.role, submission)
        .await?;

    Ok(StatusCode::CREATED)
}

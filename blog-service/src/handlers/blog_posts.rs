use crate::dtos::{
    BlogPostListResponse, BlogPostResponse, CreateBlogPostRequest, UpdateBlogPostRequest,
};
use crate::services::record_operation;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// A malformed identifier is a storage-level cast failure, not a client error.
fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Invalid blog post id '{}': {}", id, e))
    })
}

fn observed<T>(operation: &'static str, result: Result<T, AppError>) -> Result<T, AppError> {
    record_operation(operation, if result.is_ok() { "ok" } else { "error" });
    result
}

#[tracing::instrument(skip_all)]
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let posts = observed("list", state.store.list().await)?;

    Ok(Json(BlogPostListResponse {
        blogposts: posts.into_iter().map(BlogPostResponse::from).collect(),
    }))
}

#[tracing::instrument(skip_all, fields(blog_post_id = %id))]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_id(&id)?;

    let post = observed("get", state.store.get(object_id).await)?
        .ok_or_else(AppError::not_found)?;

    Ok(Json(BlogPostResponse::from(post)))
}

#[tracing::instrument(skip_all)]
pub async fn create_blog_post(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateBlogPostRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let post = request.into_post(Utc::now()).map_err(|field| {
        let message = format!("Missing `{}` in request body", field);
        tracing::warn!("{}", message);
        AppError::bad_request(message)
    })?;

    let post = observed("create", state.store.create(post).await)?;

    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(post))))
}

#[tracing::instrument(skip_all, fields(blog_post_id = %id))]
pub async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateBlogPostRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if !request.matches_path(&id) {
        let message = format!(
            "Request path id ({}) and request body id ({}) must match",
            id,
            request.id.as_deref().unwrap_or("undefined")
        );
        tracing::warn!("{}", message);
        return Err(AppError::bad_request(message));
    }

    let object_id = parse_id(&id)?;

    let found = observed(
        "update",
        state.store.update(object_id, request.into_update()).await,
    )?;
    if !found {
        return Err(AppError::not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Deleting an absent post still succeeds.
#[tracing::instrument(skip_all, fields(blog_post_id = %id))]
pub async fn delete_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_id(&id)?;

    let deleted = observed("delete", state.store.delete(object_id).await)?;
    if !deleted {
        tracing::info!("Blog post already absent");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> AppError {
    AppError::not_found()
}

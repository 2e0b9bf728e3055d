//! Blog CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::blogs::{Blog, NewBlog, UpdateBlog};

/// GET /api/blogs, newest first.
pub async fn handle_list_blogs(State(state): State<AppState>) -> Json<Vec<Blog>> {
    Json(state.blogs.list().await)
}

/// GET /api/blogs/:id
pub async fn handle_get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs.get(id).await?))
}

/// POST /api/blogs
pub async fn handle_create_blog(
    State(state): State<AppState>,
    Json(new): Json<NewBlog>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    if new.title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    let blog = state.blogs.create(new).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/blogs/:id
pub async fn handle_update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateBlog>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs.update(id, patch).await?))
}

/// PUT /api/blogs/:id/publish
pub async fn handle_publish_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs.publish(id).await?))
}

/// PUT /api/blogs/:id/unpublish
pub async fn handle_unpublish_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs.unpublish(id).await?))
}

/// DELETE /api/blogs/:id
pub async fn handle_delete_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.blogs.delete(id).await?;
    Ok(Json(json!({ "message": "Blog deleted" })))
}

//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::catalog::{self, CatalogQuery};
use crate::db;
use crate::errors::ApiError;
use crate::models::{NewCategory, NewProject, ProjectStatus};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
    pub max_photo_bytes: usize,
}

/// Build the application router.
pub fn router(state: Arc<ApiState>) -> Router {
    let photo_limit = state.max_photo_bytes;

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/projects/fetch-approved-projects",
            get(fetch_approved_projects),
        )
        .route("/api/projects/pending", get(fetch_pending_projects))
        .route("/api/projects", post(submit_project))
        .route("/api/projects/:id", get(get_project))
        .route("/api/projects/:id/approve", post(approve_project))
        .route(
            "/api/projects/:id/photos",
            post(upload_photo).layer(DefaultBodyLimit::max(photo_limit)),
        )
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/photos/:id", get(get_photo))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    #[serde(rename = "_id")]
    pub id: i64,
}

fn error_response(e: ApiError) -> Response {
    let status = e.status();
    if status.is_server_error() {
        error!("Request failed: {}", e);
    }
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/projects/fetch-approved-projects`
///
/// Returns approved projects, optionally filtered and sorted through
/// `search`, `category`, `minTarget` and `sort`.
pub async fn fetch_approved_projects(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    match db::list_projects_by_status(&state.pool, ProjectStatus::Approved).await {
        Ok(projects) => (StatusCode::OK, Json(catalog::apply(projects, &query))).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/projects/pending`
///
/// Submissions waiting for review in the admin panel.
pub async fn fetch_pending_projects(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::list_projects_by_status(&state.pool, ProjectStatus::Pending).await {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /api/projects`
///
/// Stores a new submission as `pending`.
pub async fn submit_project(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewProject>,
) -> impl IntoResponse {
    match db::insert_project(&state.pool, &payload.basic_info).await {
        Ok(id) => {
            info!("Project {} submitted for review", id);
            (StatusCode::CREATED, Json(CreatedResponse { id })).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// `GET /api/projects/:id`
pub async fn get_project(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match db::get_project(&state.pool, id).await {
        Ok(Some(project)) => (StatusCode::OK, Json(project)).into_response(),
        Ok(None) => error_response(ApiError::NotFound(format!("project {id}"))),
        Err(e) => error_response(e),
    }
}

/// `POST /api/projects/:id/approve`
pub async fn approve_project(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match db::set_project_status(&state.pool, id, ProjectStatus::Approved).await {
        Ok(true) => {
            info!("Project {} approved", id);
            (
                StatusCode::OK,
                Json(serde_json::json!({ "status": "approved" })),
            )
                .into_response()
        }
        Ok(false) => error_response(ApiError::NotFound(format!("project {id}"))),
        Err(e) => error_response(e),
    }
}

/// `POST /api/projects/:id/photos`
///
/// Raw image upload; the request's `Content-Type` is stored with the bytes.
pub async fn upload_photo(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.starts_with("image/") {
        return error_response(ApiError::InvalidRequest(
            "Content-Type must be an image type".to_string(),
        ));
    }
    if body.is_empty() {
        return error_response(ApiError::InvalidRequest("empty upload".to_string()));
    }

    match db::insert_photo(&state.pool, project_id, &content_type, &body).await {
        Ok(id) => (StatusCode::CREATED, Json(CreatedResponse { id })).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/categories`
pub async fn list_categories(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::list_categories(&state.pool).await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewCategory>,
) -> impl IntoResponse {
    match db::insert_category(&state.pool, &payload.category_name).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/photos/:id`
///
/// Serves the stored image bytes with their original content type.
pub async fn get_photo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match db::get_photo(&state.pool, id).await {
        Ok(Some(photo)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, photo.content_type)],
            photo.data,
        )
            .into_response(),
        Ok(None) => error_response(ApiError::NotFound(format!("photo {id}"))),
        Err(e) => error_response(e),
    }
}

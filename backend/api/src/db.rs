//! Database layer — migrations and catalog queries.

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::errors::{ApiError, Result};
use crate::models::{
    Category, NewBasicInfo, Photo, PhotoRef, ProjectDocument, ProjectRow, ProjectStatus,
};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    // Make sure the file is created if it doesn't exist yet.
    let options = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every connection to `:memory:` opens a private database, so an
    // in-memory pool must hold exactly one connection and never recycle it.
    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ─────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, category_name FROM categories ORDER BY category_name ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a category. Names are unique; a duplicate yields `ApiError::Conflict`.
pub async fn insert_category(pool: &SqlitePool, name: &str) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidRequest(
            "categoryName is required".to_string(),
        ));
    }

    let result = sqlx::query("INSERT INTO categories (category_name, created_at) VALUES (?1, ?2)")
        .bind(name)
        .bind(now())
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(Category {
            id: done.last_insert_rowid(),
            category_name: name.to_string(),
        }),
        Err(e) if is_unique_violation(&e) => Err(ApiError::Conflict(format!(
            "category '{name}' already exists"
        ))),
        Err(e) => Err(e.into()),
    }
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

/// Store a new submission. Projects always start out `pending`.
pub async fn insert_project(pool: &SqlitePool, info: &NewBasicInfo) -> Result<i64> {
    info.validate()?;

    let done = sqlx::query(
        r#"
        INSERT INTO projects
            (project_name, country, target_amount, campaign_duration, category, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(info.project_name.trim())
    .bind(info.country.trim())
    .bind(info.target_amount)
    .bind(info.campaign_duration)
    .bind(info.category.trim())
    .bind(ProjectStatus::Pending.as_str())
    .bind(now())
    .execute(pool)
    .await?;

    Ok(done.last_insert_rowid())
}

/// Move a project to `status`. Returns `false` when the id is unknown.
pub async fn set_project_status(pool: &SqlitePool, id: i64, status: ProjectStatus) -> Result<bool> {
    let done = sqlx::query("UPDATE projects SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}

/// Fetch every project in `status`, oldest first, with its photo references.
pub async fn list_projects_by_status(
    pool: &SqlitePool,
    status: ProjectStatus,
) -> Result<Vec<ProjectDocument>> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, project_name, country, target_amount, campaign_duration,
               category, status, created_at
        FROM   projects
        WHERE  status = ?1
        ORDER  BY id ASC
        "#,
    )
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    let photo_rows = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT ph.id, ph.project_id
        FROM   photos ph
        JOIN   projects p ON p.id = ph.project_id
        WHERE  p.status = ?1
        ORDER  BY ph.id ASC
        "#,
    )
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    let mut photos: HashMap<i64, Vec<PhotoRef>> = HashMap::new();
    for (photo_id, project_id) in photo_rows {
        photos
            .entry(project_id)
            .or_default()
            .push(PhotoRef { id: photo_id });
    }

    rows.into_iter()
        .map(|row| {
            let refs = photos.remove(&row.id).unwrap_or_default();
            ProjectDocument::from_row(row, refs)
        })
        .collect()
}

pub async fn get_project(pool: &SqlitePool, id: i64) -> Result<Option<ProjectDocument>> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, project_name, country, target_amount, campaign_duration,
               category, status, created_at
        FROM   projects
        WHERE  id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let refs = sqlx::query_as::<_, (i64,)>("SELECT id FROM photos WHERE project_id = ?1 ORDER BY id ASC")
        .bind(id)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(photo_id,)| PhotoRef { id: photo_id })
        .collect();

    ProjectDocument::from_row(row, refs).map(Some)
}

// ─────────────────────────────────────────────────────────
// Photos
// ─────────────────────────────────────────────────────────

/// Attach a photo to an existing project and return the photo id.
pub async fn insert_photo(
    pool: &SqlitePool,
    project_id: i64,
    content_type: &str,
    data: &[u8],
) -> Result<i64> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM projects WHERE id = ?1")
        .bind(project_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound(format!("project {project_id}")));
    }

    let done = sqlx::query(
        "INSERT INTO photos (project_id, content_type, data, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(project_id)
    .bind(content_type)
    .bind(data)
    .bind(now())
    .execute(pool)
    .await?;

    Ok(done.last_insert_rowid())
}

pub async fn get_photo(pool: &SqlitePool, id: i64) -> Result<Option<Photo>> {
    let photo = sqlx::query_as::<_, Photo>("SELECT content_type, data FROM photos WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(photo)
}

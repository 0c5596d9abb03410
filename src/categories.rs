use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use uuid::Uuid;

use crate::constants::*;
use crate::database::Db;
use crate::error::ApiError;
use crate::models::{ApiResponse, Category, CreateCategoryPayload};
use crate::server::AppState;
use crate::utils::{
    db_error, db_error_with_context, is_unique_violation, millis_to_datetime, now_millis,
    validate_required_text,
};

pub fn validate_category_name(name: Option<&str>) -> Result<String, ApiError> {
    match name {
        Some(name) if !name.trim().is_empty() => validate_required_text(name, "Category name"),
        _ => Err(ApiError::bad_request(ERR_CATEGORY_NAME_REQUIRED)),
    }
}

pub fn extract_category_from_row(row: libsql::Row) -> Result<Category, ApiError> {
    let id: String = row
        .get(0)
        .map_err(db_error_with_context("invalid category data"))?;
    let name: String = row
        .get(1)
        .map_err(db_error_with_context("invalid category data"))?;
    let created_at: i64 = row
        .get(2)
        .map_err(db_error_with_context("invalid category data"))?;

    Ok(Category {
        id,
        name,
        created_at: millis_to_datetime(created_at)?,
    })
}

pub async fn list_categories(db: &Db) -> Result<Vec<Category>, ApiError> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
            (),
        )
        .await
        .map_err(db_error_with_context("failed to query categories"))?;

    let mut categories = Vec::new();
    while let Some(row) = rows.next().await.map_err(db_error)? {
        categories.push(extract_category_from_row(row)?);
    }
    Ok(categories)
}

/// Inserts a category; `name` must already be trimmed and validated.
pub async fn insert_category(db: &Db, name: &str, created_at: i64) -> Result<Category, ApiError> {
    let category_id = Uuid::new_v4().to_string();

    let conn = db.write().await;
    conn.execute(
        "INSERT INTO categories (id, name, created_at) VALUES (?, ?, ?)",
        (category_id.as_str(), name, created_at),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(ERR_CATEGORY_EXISTS.to_string())
        } else {
            db_error_with_context("category creation failed")(e)
        }
    })?;

    Ok(Category {
        id: category_id,
        name: name.to_string(),
        created_at: millis_to_datetime(created_at)?,
    })
}

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = list_categories(&state.db).await?;
    Ok(Json(ApiResponse::new(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let Json(payload) = payload?;

    // Input validation and sanitization
    let category_name = validate_category_name(payload.name.as_deref())?;

    let category = insert_category(&state.db, &category_name, now_millis()).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "category created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(category))))
}

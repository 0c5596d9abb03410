use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::constants::*;
use crate::database::Db;
use crate::error::ApiError;
use crate::models::{
    ApiResponse, CategoryRef, CategorySummary, CreateExpensePayload, DeleteResponse, Expense,
    NewExpense,
};
use crate::server::AppState;
use crate::spending::category_totals;
use crate::utils::{
    db_error, db_error_with_context, millis_to_datetime, now_millis, parse_amount, parse_id,
    validate_category_exists, validate_required_text,
};

const SELECT_EXPENSES: &str = r#"
SELECT e.id, e.category_id, c.name, e.amount, e.description, e.created_at
FROM expenses e
JOIN categories c ON c.id = e.category_id
"#;

pub fn extract_expense_from_row(row: libsql::Row) -> Result<Expense, ApiError> {
    let id: String = row
        .get(0)
        .map_err(db_error_with_context("invalid expense id"))?;
    let category_id: String = row
        .get(1)
        .map_err(db_error_with_context("invalid expense category_id"))?;
    let category_name: String = row
        .get(2)
        .map_err(db_error_with_context("invalid category name"))?;
    let amount: f64 = row
        .get(3)
        .map_err(db_error_with_context("invalid expense amount"))?;
    let description: String = row
        .get(4)
        .map_err(db_error_with_context("invalid expense description"))?;
    let created_at: i64 = row
        .get(5)
        .map_err(db_error_with_context("invalid expense created_at"))?;

    Ok(Expense {
        id,
        category: CategoryRef {
            id: category_id,
            name: category_name,
        },
        amount,
        description,
        created_at: millis_to_datetime(created_at)?,
    })
}

/// Validates field presence and shape. Category existence is checked separately.
pub fn validate_expense_payload(payload: CreateExpensePayload) -> Result<NewExpense, ApiError> {
    let (Some(category_id), Some(amount), Some(description)) =
        (payload.category_id, payload.amount, payload.description)
    else {
        return Err(ApiError::bad_request(ERR_MISSING_EXPENSE_FIELDS));
    };
    if category_id.trim().is_empty() || amount.is_null() || description.trim().is_empty() {
        return Err(ApiError::bad_request(ERR_MISSING_EXPENSE_FIELDS));
    }

    let amount = parse_amount(&amount)?;
    let category_id =
        parse_id(&category_id).ok_or_else(|| ApiError::bad_request(ERR_INVALID_CATEGORY_ID))?;
    let description = validate_required_text(&description, "Description")?;

    Ok(NewExpense {
        category_id,
        amount,
        description,
    })
}

pub async fn list_expenses(db: &Db) -> Result<Vec<Expense>, ApiError> {
    let conn = db.read().await;
    let query = format!("{SELECT_EXPENSES} ORDER BY e.created_at DESC, e.rowid DESC");
    let mut rows = conn
        .query(&query, ())
        .await
        .map_err(db_error_with_context("failed to query expenses"))?;

    let mut expenses = Vec::new();
    while let Some(row) = rows.next().await.map_err(db_error)? {
        expenses.push(extract_expense_from_row(row)?);
    }
    Ok(expenses)
}

pub async fn get_expense(db: &Db, expense_id: &str) -> Result<Option<Expense>, ApiError> {
    let conn = db.read().await;
    let query = format!("{SELECT_EXPENSES} WHERE e.id = ?");
    let mut rows = conn
        .query(&query, [expense_id])
        .await
        .map_err(db_error_with_context("failed to query expense"))?;

    match rows.next().await.map_err(db_error)? {
        Some(row) => Ok(Some(extract_expense_from_row(row)?)),
        None => Ok(None),
    }
}

/// Checks that the category exists, then inserts the expense.
pub async fn insert_expense(
    db: &Db,
    expense: &NewExpense,
    created_at: i64,
) -> Result<Expense, ApiError> {
    validate_category_exists(db, &expense.category_id).await?;

    let expense_id = Uuid::new_v4().to_string();
    {
        let conn = db.write().await;
        conn.execute(
            "INSERT INTO expenses (id, category_id, amount, description, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                expense_id.as_str(),
                expense.category_id.as_str(),
                expense.amount,
                expense.description.as_str(),
                created_at,
            ),
        )
        .await
        .map_err(db_error_with_context("expense creation failed"))?;
    }

    get_expense(db, &expense_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("expense {} vanished after insert", expense_id)))
}

/// Returns `true` if a row was removed.
pub async fn delete_expense_by_id(db: &Db, expense_id: &str) -> Result<bool, ApiError> {
    let conn = db.write().await;
    let affected = conn
        .execute("DELETE FROM expenses WHERE id = ?", [expense_id])
        .await
        .map_err(db_error_with_context("expense deletion failed"))?;
    Ok(affected > 0)
}

pub async fn get_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let expenses = list_expenses(&state.db).await?;
    Ok(Json(ApiResponse::new(expenses)))
}

pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<CreateExpensePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Expense>>), ApiError> {
    let Json(payload) = payload?;
    let new_expense = validate_expense_payload(payload)?;

    let expense = insert_expense(&state.db, &new_expense, now_millis()).await?;
    tracing::info!(expense_id = %expense.id, amount = expense.amount, "expense created");

    // Detached: the response never waits on the budget check.
    let _ = state.budget.spawn_check(state.db.clone());

    Ok((StatusCode::CREATED, Json(ApiResponse::new(expense))))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let expense_id = parse_id(&id).ok_or_else(|| ApiError::bad_request(ERR_INVALID_EXPENSE_ID))?;

    if !delete_expense_by_id(&state.db, &expense_id).await? {
        return Err(ApiError::NotFound(ERR_EXPENSE_NOT_FOUND.to_string()));
    }
    tracing::info!(expense_id = %expense_id, "expense deleted");

    Ok(Json(ApiResponse::new(DeleteResponse {
        message: MSG_EXPENSE_DELETED.to_string(),
    })))
}

pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategorySummary>>>, ApiError> {
    let summary = category_totals(&state.db).await?;
    Ok(Json(ApiResponse::new(summary)))
}

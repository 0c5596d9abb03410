//! Read-only aggregation queries over the expense table.

use crate::database::Db;
use crate::error::ApiError;
use crate::models::CategorySummary;
use crate::utils::{db_error, db_error_with_context};

// Inner join drops expenses whose category no longer resolves.
const CATEGORY_TOTALS_QUERY: &str = r#"
SELECT e.category_id, c.name, SUM(e.amount) AS total_spent
FROM expenses e
JOIN categories c ON c.id = e.category_id
GROUP BY e.category_id, c.name
ORDER BY c.name ASC
"#;

const GRAND_TOTAL_QUERY: &str = "SELECT COALESCE(SUM(amount), 0.0) FROM expenses";

pub fn extract_summary_from_row(row: libsql::Row) -> Result<CategorySummary, ApiError> {
    let category_id: String = row
        .get(0)
        .map_err(db_error_with_context("invalid summary data"))?;
    let category_name: String = row
        .get(1)
        .map_err(db_error_with_context("invalid summary data"))?;
    let total_spent: f64 = row
        .get(2)
        .map_err(db_error_with_context("invalid summary data"))?;

    Ok(CategorySummary {
        category_id,
        category_name,
        total_spent,
    })
}

/// Total spend per category, one entry per category with at least one expense.
pub async fn category_totals(db: &Db) -> Result<Vec<CategorySummary>, ApiError> {
    let conn = db.read().await;
    let mut rows = conn
        .query(CATEGORY_TOTALS_QUERY, ())
        .await
        .map_err(db_error_with_context("failed to aggregate expenses"))?;

    let mut summary = Vec::new();
    while let Some(row) = rows.next().await.map_err(db_error)? {
        summary.push(extract_summary_from_row(row)?);
    }
    Ok(summary)
}

/// Sum of every expense amount; `0.0` when there are none.
pub async fn grand_total(db: &Db) -> Result<f64, ApiError> {
    let conn = db.read().await;
    let mut rows = conn
        .query(GRAND_TOTAL_QUERY, ())
        .await
        .map_err(db_error_with_context("failed to compute grand total"))?;

    match rows.next().await.map_err(db_error)? {
        Some(row) => row
            .get(0)
            .map_err(db_error_with_context("invalid grand total")),
        None => Ok(0.0),
    }
}

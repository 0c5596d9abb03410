use time::OffsetDateTime;
use uuid::Uuid;

use crate::constants::*;
use crate::database::Db;
use crate::error::ApiError;

pub fn db_error(err: libsql::Error) -> ApiError {
    ApiError::Internal(format!("Database operation failed: {}", err))
}

pub fn db_error_with_context(context: &str) -> impl FnOnce(libsql::Error) -> ApiError + '_ {
    move |err| ApiError::Internal(format!("Database error: {}: {}", context, err))
}

pub fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn millis_to_datetime(millis: i64) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .map_err(|e| ApiError::Internal(format!("invalid stored timestamp {}: {}", millis, e)))
}

/// Trims `value` and checks it is non-empty.
pub fn validate_required_text(value: &str, field_name: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// Accepts a JSON number or a numeric string; anything else is rejected.
pub fn parse_amount(value: &serde_json::Value) -> Result<f64, ApiError> {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match amount {
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        _ => Err(ApiError::bad_request(ERR_INVALID_AMOUNT)),
    }
}

/// Returns the canonical (hyphenated, lowercase) form of a well-formed identifier.
pub fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim())
        .ok()
        .map(|id| id.hyphenated().to_string())
}

pub async fn validate_category_exists(db: &Db, category_id: &str) -> Result<(), ApiError> {
    let conn = db.read().await;
    let mut rows = conn
        .query("SELECT id FROM categories WHERE id = ?", [category_id])
        .await
        .map_err(db_error_with_context("failed to check category existence"))?;

    if rows.next().await.map_err(db_error)?.is_none() {
        return Err(ApiError::bad_request(ERR_CATEGORY_NOT_FOUND));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_required_text_trims() {
        assert_eq!(validate_required_text("  Food  ", "Name").unwrap(), "Food");
    }

    #[test]
    fn validate_required_text_rejects_blank() {
        let err = validate_required_text("   ", "Name").unwrap_err();
        assert_eq!(err, ApiError::bad_request("Name cannot be empty"));
    }

    #[test]
    fn validate_required_text_keeps_long_values() {
        let long = "a".repeat(5_000);
        assert_eq!(validate_required_text(&long, "Name").unwrap(), long);
    }

    #[test]
    fn parse_amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(12.5)).unwrap(), 12.5);
        assert_eq!(parse_amount(&json!(3)).unwrap(), 3.0);
        assert_eq!(parse_amount(&json!("7.25")).unwrap(), 7.25);
    }

    #[test]
    fn parse_amount_rejects_non_positive_and_non_numeric() {
        for value in [json!(0), json!(-5), json!("abc"), json!(true), json!(null), json!([1])] {
            assert_eq!(
                parse_amount(&value).unwrap_err(),
                ApiError::bad_request(ERR_INVALID_AMOUNT)
            );
        }
    }

    #[test]
    fn parse_id_normalizes_uuids() {
        let id = Uuid::new_v4();
        let upper = id.hyphenated().to_string().to_uppercase();
        assert_eq!(parse_id(&upper), Some(id.hyphenated().to_string()));
        assert_eq!(parse_id("not-an-id"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn millis_round_trip_through_datetime() {
        let millis = 1_700_000_000_123;
        let dt = millis_to_datetime(millis).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_700_000_000);
        assert_eq!(dt.millisecond(), 123);
    }
}

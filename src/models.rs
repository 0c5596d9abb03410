use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The category fields embedded in an expense response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "categoryId")]
    pub category: CategoryRef,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    pub total_spent: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateCategoryPayload {
    pub name: Option<String>,
}

/// Raw create-expense body. `amount` stays untyped so numeric strings can be accepted.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    pub category_id: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub description: Option<String>,
}

/// A create-expense request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category_id: String,
    pub amount: f64,
    pub description: String,
}

/// Success envelope: `{"ok": true, "data": ...}`.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse { ok: true, data }
    }
}

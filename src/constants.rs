// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DATABASE_FILE: &str = "expenses.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Email provider configuration
pub const DEFAULT_EMAIL_SENDER: &str = "no-reply@expensetracker.com";
pub const DEFAULT_ALERT_RECIPIENT: &str = "admin@example.com";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
pub const ALERT_SENDER_NAME: &str = "Expense Tracker Alert";
pub const ALERT_SUBJECT: &str = "\u{1F6A8} BUDGET ALERT: Spending Exceeded Limit!";

// Error messages
pub const ERR_INTERNAL: &str = "Internal server error";
pub const ERR_CATEGORY_NAME_REQUIRED: &str = "Category name is required";
pub const ERR_CATEGORY_EXISTS: &str = "Category already exists";
pub const ERR_CATEGORY_NOT_FOUND: &str = "Category does not exist";
pub const ERR_MISSING_EXPENSE_FIELDS: &str =
    "Missing required fields: categoryId, amount, and description";
pub const ERR_INVALID_AMOUNT: &str = "Amount must be a positive number";
pub const ERR_INVALID_CATEGORY_ID: &str = "Invalid category ID format";
pub const ERR_INVALID_EXPENSE_ID: &str = "Invalid expense ID format";
pub const ERR_EXPENSE_NOT_FOUND: &str = "Expense not found";
pub const MSG_EXPENSE_DELETED: &str = "Expense deleted successfully";

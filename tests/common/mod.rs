#![allow(dead_code)]

use expense_tracker_server::categories::insert_category;
use expense_tracker_server::config::{Config, EmailConfig};
use expense_tracker_server::database::{Db, init_db};
use expense_tracker_server::expenses::insert_expense;
use expense_tracker_server::models::NewExpense;
use expense_tracker_server::{AppState, spawn_with_listener};
use tempfile::{TempDir, tempdir};

// Nov 14, 2023 22:13:20 UTC, in milliseconds
pub const TEST_BASE_MILLIS: i64 = 1_700_000_000_000;

/// Fresh database in its own temporary directory. Keep the `TempDir` alive for the test.
pub async fn setup_test_environment() -> (Db, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize database at {}: {}", data_path, e));

    (db, temp_dir)
}

pub fn test_config(budget_limit: Option<f64>, email: EmailConfig) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: "0".to_string(),
        data_path: String::new(),
        budget_limit,
        email,
    }
}

/// Serves the API on an ephemeral port and returns its base URL.
pub async fn spawn_app(db: Db, config: &Config) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = spawn_with_listener(AppState::new(db, config), listener)
        .expect("Failed to spawn test server");
    format!("http://{}", addr)
}

pub async fn create_test_category(db: &Db, name: &str) -> String {
    insert_category(db, name, TEST_BASE_MILLIS)
        .await
        .unwrap_or_else(|e| panic!("Failed to insert test category '{}': {}", name, e))
        .id
}

pub async fn create_test_expense(
    db: &Db,
    category_id: &str,
    amount: f64,
    description: &str,
    created_at: i64,
) -> String {
    let expense = NewExpense {
        category_id: category_id.to_string(),
        amount,
        description: description.to_string(),
    };
    insert_expense(db, &expense, created_at)
        .await
        .unwrap_or_else(|e| panic!("Failed to insert test expense '{}': {}", description, e))
        .id
}

pub async fn count_expenses(db: &Db) -> u32 {
    let conn = db.read().await;
    let mut rows = conn
        .query("SELECT COUNT(*) FROM expenses", ())
        .await
        .expect("Failed to execute count query");

    if let Some(row) = rows.next().await.expect("Failed to read count row") {
        row.get(0).expect("Failed to get count value")
    } else {
        0
    }
}

pub async fn count_categories(db: &Db) -> u32 {
    let conn = db.read().await;
    let mut rows = conn
        .query("SELECT COUNT(*) FROM categories", ())
        .await
        .expect("Failed to execute count query");

    if let Some(row) = rows.next().await.expect("Failed to read count row") {
        row.get(0).expect("Failed to get count value")
    } else {
        0
    }
}

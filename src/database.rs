use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

use crate::constants::DATABASE_FILE;

const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id          TEXT    PRIMARY KEY,
    name        TEXT    UNIQUE NOT NULL,
    created_at  INTEGER NOT NULL
);
"#;

// category_id is checked at write time, not enforced as a foreign key
const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id           TEXT    PRIMARY KEY,
    category_id  TEXT    NOT NULL,
    amount       REAL    NOT NULL CHECK (amount > 0),
    description  TEXT    NOT NULL,
    created_at   INTEGER NOT NULL
);
"#;

const CREATE_EXPENSES_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_created_at ON expenses(created_at);";

const CREATE_EXPENSES_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_category_id ON expenses(category_id);";

pub type Db = Arc<RwLock<Connection>>;

/// Opens (or creates) `expenses.db` under `data_dir` and applies the schema.
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    apply_schema(&conn).await?;
    Ok(Arc::new(RwLock::new(conn)))
}

async fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_CATEGORIES_TABLE, ()).await?;
    conn.execute(CREATE_EXPENSES_TABLE, ()).await?;
    conn.execute(CREATE_EXPENSES_CREATED_AT_INDEX, ()).await?;
    conn.execute(CREATE_EXPENSES_CATEGORY_INDEX, ()).await?;
    Ok(())
}

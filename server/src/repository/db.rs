//! Database Connection and Setup
//!
//! Opens the SQLite database, runs migrations and seeds the item catalog.

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Item categories inserted into an empty catalog: (title, image file)
const SEED_ITEMS: [(&str, &str); 6] = [
    ("Lâmpadas", "lampadas.svg"),
    ("Pilhas e Baterias", "baterias.svg"),
    ("Papéis e Papelão", "papeis-papelao.svg"),
    ("Resíduos Eletrônicos", "eletronicos.svg"),
    ("Resíduos Orgânicos", "organicos.svg"),
    ("Óleo de Cozinha", "oleo.svg"),
];

/// Shared database connection
#[derive(Clone)]
pub struct DbState {
    pub conn: Arc<Mutex<Connection>>,
}

/// Open (or create) the database at `db_path` and bring the schema up to date
///
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open database {}: {}", db_path.display(), e))?;

    run_migrations(&conn)?;
    seed_items(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            image TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS points (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            image TEXT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            whatsapp TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            city TEXT NOT NULL,
            uf TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS point_items (
            point_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
            item_id INTEGER NOT NULL REFERENCES items(id),
            PRIMARY KEY (point_id, item_id)
        );

        CREATE INDEX IF NOT EXISTS idx_points_location ON points(uf, city);
        CREATE INDEX IF NOT EXISTS idx_point_items_item ON point_items(item_id);",
    )
    .map_err(|e| format!("Migration failed: {}", e))
}

/// Insert the default categories when the catalog is empty
fn seed_items(conn: &Connection) -> Result<(), String> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
        .map_err(|e| e.to_string())?;
    if count > 0 {
        return Ok(());
    }

    for (title, image) in SEED_ITEMS {
        conn.execute(
            "INSERT INTO items (title, image) VALUES (?, ?)",
            params![title, image],
        )
        .map_err(|e| format!("Failed to seed item {}: {}", title, e))?;
    }
    log::info!("Seeded {} item categories", SEED_ITEMS.len());
    Ok(())
}

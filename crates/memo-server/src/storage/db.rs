//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use memo_types::Memo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database: {}", database_url))?;

        // Run migrations (inline for simplicity)
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Memos table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS memos (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                title   TEXT NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a memo and return it with its assigned id.
    ///
    /// The insert runs in its own transaction; if the commit fails the
    /// transaction rolls back on drop and no row is persisted.
    pub async fn insert_memo(&self, title: &str, content: &str) -> Result<Memo> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let row: MemoRow = sqlx::query_as(
            r#"
            INSERT INTO memos (title, content)
            VALUES (?1, ?2)
            RETURNING id, title, content
            "#,
        )
        .bind(title)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.context("Failed to commit memo insert")?;

        Ok(row.into())
    }

    /// List every stored memo in insertion order (ascending id).
    pub async fn list_memos(&self) -> Result<Vec<Memo>> {
        let rows: Vec<MemoRow> = sqlx::query_as(
            r#"
            SELECT id, title, content
            FROM memos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct MemoRow {
    id: i64,
    title: String,
    content: String,
}

impl From<MemoRow> for Memo {
    fn from(r: MemoRow) -> Self {
        Memo {
            id: r.id,
            title: r.title,
            content: r.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("memos.db").to_string_lossy()
        );
        let db = Database::new(&url).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn insert_assigns_id_and_keeps_fields() {
        let (_dir, db) = test_db().await;

        let memo = db.insert_memo("Groceries", "Milk, eggs").await.unwrap();
        assert_eq!(memo.id, 1);
        assert_eq!(memo.title, "Groceries");
        assert_eq!(memo.content, "Milk, eggs");
    }

    #[tokio::test]
    async fn inserts_get_distinct_increasing_ids() {
        let (_dir, db) = test_db().await;

        let first = db.insert_memo("one", "a").await.unwrap();
        let second = db.insert_memo("two", "b").await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let (_dir, db) = test_db().await;

        db.insert_memo("first", "1").await.unwrap();
        db.insert_memo("second", "2").await.unwrap();
        db.insert_memo("third", "3").await.unwrap();

        let memos = db.list_memos().await.unwrap();
        let titles: Vec<&str> = memos.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert!(memos.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn list_on_empty_table_is_empty() {
        let (_dir, db) = test_db().await;

        let memos = db.list_memos().await.unwrap();
        assert!(memos.is_empty());
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("memos.db").to_string_lossy()
        );

        let db = Database::new(&url).await.unwrap();
        db.insert_memo("kept", "across reopen").await.unwrap();
        drop(db);

        // Reopening must not clobber existing rows
        let db = Database::new(&url).await.unwrap();
        let memos = db.list_memos().await.unwrap();
        assert_eq!(memos.len(), 1);
        assert_eq!(memos[0].title, "kept");
    }

    #[tokio::test]
    async fn long_titles_are_stored_untruncated() {
        let (_dir, db) = test_db().await;

        let title = "t".repeat(100);
        let memo = db.insert_memo(&title, "body").await.unwrap();
        assert_eq!(memo.title.chars().count(), 100);

        let memos = db.list_memos().await.unwrap();
        assert_eq!(memos[0].title, title);
    }
}

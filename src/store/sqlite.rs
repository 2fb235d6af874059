//! SQLite category store built on sqlx.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::{CategoryStore, StoreError};
use crate::models::{Category, CategoryId};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    )
"#;

type CategoryRow = (i64, String, String);

/// Category store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    pool: SqlitePool,
}

impl SqliteCategoryStore {
    /// Opens (creating if missing) the database at `database_url` and ensures
    /// the `categories` table exists.
    ///
    /// `sqlite::memory:` databases live per connection, so they are opened
    /// with a single connection that is never recycled.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let in_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .idle_timeout(if in_memory { None } else { Some(Duration::from_secs(30)) })
            .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("SQLite category store ready at {}", database_url);
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

fn into_category((id, name, description): CategoryRow) -> Category {
    Category::restore(id, name, description)
}

#[async_trait]
impl CategoryStore for SqliteCategoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, description FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(into_category).collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, description FROM categories WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(into_category))
    }

    async fn add(&self, category: &Category) -> Result<CategoryId, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?, ?)")
            .bind(category.name())
            .bind(category.description())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    async fn save_changes(&self, category: &Category) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE categories SET name = ?, description = ? WHERE id = ?")
            .bind(category.name())
            .bind(category.description())
            .bind(category.id())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::Conflict(format!(
                "category {} no longer exists",
                category.id()
            )));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_where(&self, id: CategoryId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteCategoryStore {
        SqliteCategoryStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_add_and_find() {
        let store = memory_store().await;

        let id = store.add(&Category::create("Tech", "desc").unwrap()).await.unwrap();

        let found = store.find_by_id(id).await.unwrap();
        assert_eq!(found, Some(Category::restore(id, "Tech", "desc")));
        assert!(store.find_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let store = memory_store().await;
        store.add(&Category::create("Tech", "").unwrap()).await.unwrap();
        store.add(&Category::create("Art", "").unwrap()).await.unwrap();

        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Tech", "Art"]);
    }

    #[tokio::test]
    async fn test_save_changes() {
        let store = memory_store().await;
        let id = store.add(&Category::create("Tech", "desc").unwrap()).await.unwrap();

        let mut category = store.find_by_id(id).await.unwrap().unwrap();
        category.update("Tech2", "desc2").unwrap();
        store.save_changes(&category).await.unwrap();

        assert_eq!(store.find_by_id(id).await.unwrap(), Some(category));

        let ghost = Category::restore(id + 100, "Ghost", "");
        assert!(matches!(
            store.save_changes(&ghost).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_where() {
        let store = memory_store().await;
        let id = store.add(&Category::create("Tech", "").unwrap()).await.unwrap();

        assert_eq!(store.delete_where(id).await.unwrap(), 1);
        assert_eq!(store.delete_where(id).await.unwrap(), 0);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}

//! PostgreSQL content store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::store::ContentStore;
use crate::db;
use crate::models::{ContentFilter, ContentItem, ContentSort, FieldChanges, NewContent};

const COLUMNS: &str = "id, type, title, body, body_format, status, author_id, created, changed";

/// Content store backed by the `content_item` table.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    /// Create a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(sort: ContentSort) -> &'static str {
    match sort {
        ContentSort::CreatedDesc => " ORDER BY created DESC, id DESC",
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn load(&self, id: i64) -> Result<Option<ContentItem>> {
        let item = sqlx::query_as::<_, ContentItem>(&format!(
            "SELECT {COLUMNS} FROM content_item WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch content item by id")?;

        Ok(item)
    }

    async fn create(&self, input: NewContent) -> Result<ContentItem> {
        let now = chrono::Utc::now().timestamp();
        let (body, body_format) = match input.body {
            Some(text) => (Some(text.value), text.format),
            None => (None, None),
        };

        let item = sqlx::query_as::<_, ContentItem>(&format!(
            r#"
            INSERT INTO content_item (type, title, body, body_format, status, author_id, created, changed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&input.bundle)
        .bind(&input.title)
        .bind(body)
        .bind(body_format)
        .bind(input.status)
        .bind(input.author_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert content item")?;

        Ok(item)
    }

    async fn update(&self, id: i64, changes: &FieldChanges) -> Result<Option<ContentItem>> {
        let now = chrono::Utc::now().timestamp();
        let body = changes.body.as_ref();

        // An empty change set still issues the UPDATE; every column keeps its value.
        let item = sqlx::query_as::<_, ContentItem>(&format!(
            r#"
            UPDATE content_item SET
                title = COALESCE($2, title),
                body = CASE WHEN $3 THEN $4 ELSE body END,
                body_format = CASE WHEN $3 THEN $5 ELSE body_format END,
                status = COALESCE($6, status),
                changed = CASE WHEN $7 THEN $8 ELSE changed END
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(body.is_some())
        .bind(body.map(|b| b.value.as_str()))
        .bind(body.and_then(|b| b.format.as_deref()))
        .bind(changes.status)
        .bind(!changes.is_empty())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .context("failed to update content item")?;

        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM content_item WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete content item")?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, filter: &ContentFilter, sort: ContentSort) -> Result<Vec<ContentItem>> {
        let mut query = format!("SELECT {COLUMNS} FROM content_item WHERE 1=1");
        let mut param_idx = 1;

        if filter.bundle.is_some() {
            query.push_str(&format!(" AND type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.published_only {
            query.push_str(" AND status = TRUE");
        }

        query.push_str(order_clause(sort));
        query.push_str(&format!(
            " LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1
        ));

        let mut query_builder = sqlx::query_as::<_, ContentItem>(&query);
        if let Some(bundle) = &filter.bundle {
            query_builder = query_builder.bind(bundle);
        }
        query_builder = query_builder.bind(filter.limit).bind(filter.offset);

        let items = query_builder
            .fetch_all(&self.pool)
            .await
            .context("failed to query content items")?;

        Ok(items)
    }

    async fn is_healthy(&self) -> bool {
        db::check_health(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

impl std::fmt::Debug for PgContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgContentStore")
            .field("pool", &"PgPool")
            .finish()
    }
}

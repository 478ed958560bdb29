//! Goods receipt (coming) service

use shared::{Coming, ComingInput, ComingList, DocumentKind, ListRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::increment::next_increment_id;

#[derive(Clone)]
pub struct ComingService {
    db: PgPool,
}

impl ComingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a goods receipt, numbering it `C-NNNNNNN`
    pub async fn create(&self, input: ComingInput) -> AppResult<Coming> {
        let mut tx = self.db.begin().await?;

        let increment_id = next_increment_id(&mut *tx, DocumentKind::Coming).await?;

        let coming = sqlx::query_as::<_, Coming>(
            r#"
            INSERT INTO coming (id, increment_id, branch_id)
            VALUES ($1, $2, $3)
            RETURNING id, increment_id, branch_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&increment_id)
        .bind(input.branch_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            coming_id = %coming.id,
            increment_id = %coming.increment_id,
            branch_id = %coming.branch_id,
            "Goods receipt opened"
        );
        Ok(coming)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Coming> {
        sqlx::query_as::<_, Coming>(
            "SELECT id, increment_id, branch_id, created_at, updated_at FROM coming WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("coming"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<ComingList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM coming WHERE $1::text IS NULL OR increment_id ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let cominges = sqlx::query_as::<_, Coming>(
            r#"
            SELECT id, increment_id, branch_id, created_at, updated_at
            FROM coming
            WHERE $1::text IS NULL OR increment_id ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(ComingList { count, cominges })
    }

    /// Move a receipt to another branch. The increment id never changes.
    pub async fn update(&self, id: Uuid, input: ComingInput) -> AppResult<Coming> {
        sqlx::query_as::<_, Coming>(
            r#"
            UPDATE coming
            SET branch_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, increment_id, branch_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.branch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)
    }

    /// Delete a receipt together with its picking-list entries.
    ///
    /// Stock already received stays on the ledger.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM coming WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

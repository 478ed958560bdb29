//! Branch management service

use shared::{Branch, BranchInput, BranchList, ListRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Branch service for managing market branches
#[derive(Clone)]
pub struct BranchService {
    db: PgPool,
}

impl BranchService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: BranchInput) -> AppResult<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branch (id, name, address, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, phone, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(branch_id = %branch.id, "Branch created");
        Ok(branch)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, name, address, phone, created_at, updated_at
            FROM branch
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("branch"))
    }

    /// List branches, searching name, address and phone
    pub async fn list(&self, req: &ListRequest) -> AppResult<BranchList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM branch
            WHERE $1::text IS NULL OR name ILIKE $1 OR address ILIKE $1 OR phone ILIKE $1
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let branches = sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, name, address, phone, created_at, updated_at
            FROM branch
            WHERE $1::text IS NULL OR name ILIKE $1 OR address ILIKE $1 OR phone ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(BranchList { count, branches })
    }

    pub async fn update(&self, id: Uuid, input: BranchInput) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branch
            SET name = $2, address = $3, phone = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, phone, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM branch WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

//! Product catalogue service

use shared::{ListRequest, Product, ProductInput, ProductList};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: ProductInput) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO product (id, name, price, branch_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, branch_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(input.price)
        .bind(input.branch_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, branch_id, created_at, updated_at
            FROM product
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("product"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<ProductList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product WHERE $1::text IS NULL OR name ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, branch_id, created_at, updated_at
            FROM product
            WHERE $1::text IS NULL OR name ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductList { count, products })
    }

    /// Update a product.
    ///
    /// Past sale line items keep the unit price they were sold at; only new
    /// line items pick up the changed price.
    pub async fn update(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE product
            SET name = $2, price = $3, branch_id = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, branch_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.branch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

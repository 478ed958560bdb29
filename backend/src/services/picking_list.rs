//! Picking list service
//!
//! A picking-list entry records one product received under a goods receipt.
//! Creating an entry restocks the receipt's branch in the same transaction.

use rust_decimal::Decimal;
use shared::{CreatePickingList, ListRequest, PickingList, PickingListList, Receipt, UpdatePickingList};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::remainder;

#[derive(Clone)]
pub struct PickingListService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct ComingRef {
    id: Uuid,
    branch_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct ProductRef {
    name: String,
    price: Decimal,
}

impl PickingListService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record received goods and add them to the branch ledger
    pub async fn create(&self, input: CreatePickingList) -> AppResult<PickingList> {
        let mut tx = self.db.begin().await?;

        let coming = sqlx::query_as::<_, ComingRef>(
            "SELECT id, branch_id FROM coming WHERE increment_id = $1",
        )
        .bind(&input.coming_increment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("coming"))?;

        let product = sqlx::query_as::<_, ProductRef>("SELECT name, price FROM product WHERE id = $1")
            .bind(input.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("product"))?;

        let receipt = Receipt::new(
            input.product_id,
            coming.branch_id,
            product.name,
            input.quantity,
            input.price,
            product.price,
        )?;

        let entry = sqlx::query_as::<_, PickingList>(
            r#"
            INSERT INTO picking_list (id, product_id, quantity, price, total_price,
                                      coming_id, coming_increment_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, quantity, price, total_price, coming_id,
                      coming_increment_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.price)
        .bind(receipt.total_cost())
        .bind(coming.id)
        .bind(&input.coming_increment_id)
        .fetch_one(&mut *tx)
        .await?;

        remainder::receive(&mut *tx, &receipt).await?;

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<PickingList> {
        sqlx::query_as::<_, PickingList>(
            r#"
            SELECT id, product_id, quantity, price, total_price, coming_id,
                   coming_increment_id, created_at, updated_at
            FROM picking_list
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("picking_list"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<PickingListList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM picking_list WHERE $1::text IS NULL OR coming_increment_id ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let picking_list = sqlx::query_as::<_, PickingList>(
            r#"
            SELECT id, product_id, quantity, price, total_price, coming_id,
                   coming_increment_id, created_at, updated_at
            FROM picking_list
            WHERE $1::text IS NULL OR coming_increment_id ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(PickingListList {
            count,
            picking_list,
        })
    }

    /// Correct a picking-list record.
    ///
    /// Only the record changes; ledger corrections go through the remainder
    /// endpoints.
    pub async fn update(&self, id: Uuid, input: UpdatePickingList) -> AppResult<PickingList> {
        let total_price = Decimal::from(input.quantity) * input.price;

        sqlx::query_as::<_, PickingList>(
            r#"
            UPDATE picking_list
            SET product_id = $2, quantity = $3, price = $4, total_price = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_id, quantity, price, total_price, coming_id,
                      coming_increment_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.price)
        .bind(total_price)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM picking_list WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

//! Sale service
//!
//! Sales are created empty and grow through their line items (see
//! `sale_product`). This service owns the sale header: numbering, payment
//! and voiding.

use rust_decimal::Decimal;
use shared::{fits_money_scale, DocumentKind, ListRequest, PaymentPolicy, Sale, SaleInput, SaleList};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::increment::next_increment_id;
use crate::services::remainder;

#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

impl SaleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open an empty sale numbered `S-NNNNNNN`
    pub async fn create(&self, input: SaleInput) -> AppResult<Sale> {
        let mut tx = self.db.begin().await?;

        let increment_id = next_increment_id(&mut *tx, DocumentKind::Sale).await?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sale (id, branch_id, client_id, increment_id, total_price, paid, debt)
            VALUES ($1, $2, $3, $4, 0, 0, 0)
            RETURNING id, branch_id, client_id, increment_id, total_price, paid, debt,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.branch_id)
        .bind(input.client_id)
        .bind(&increment_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = %sale.id,
            increment_id = %sale.increment_id,
            branch_id = %sale.branch_id,
            "Sale opened"
        );
        Ok(sale)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Sale> {
        sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, branch_id, client_id, increment_id, total_price, paid, debt,
                   created_at, updated_at
            FROM sale
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("sale"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<SaleList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sale WHERE $1::text IS NULL OR increment_id ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, branch_id, client_id, increment_id, total_price, paid, debt,
                   created_at, updated_at
            FROM sale
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

        Ok(SaleList { count, sales })
    }

    /// Change the branch or client of a sale.
    ///
    /// Totals are never written here. A sale that already has line items is
    /// tied to the ledger of its branch and cannot move.
    pub async fn update(&self, id: Uuid, input: SaleInput) -> AppResult<Sale> {
        let mut tx = self.db.begin().await?;

        let current_branch = sqlx::query_scalar::<_, Uuid>(
            "SELECT branch_id FROM sale WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NoRowsAffected)?;

        if current_branch != input.branch_id {
            let has_lines = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM sale_product WHERE sale_id = $1)",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            if has_lines {
                return Err(AppError::Validation(
                    "sale with line items cannot move to another branch".to_string(),
                ));
            }
        }

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sale
            SET branch_id = $2, client_id = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, branch_id, client_id, increment_id, total_price, paid, debt,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.branch_id)
        .bind(input.client_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(sale)
    }

    /// Void a sale, returning the stock of all its line items to the ledger
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let branch_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT branch_id FROM sale WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NoRowsAffected)?;

        // Lock ledger rows in product order.
        let lines = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT product_id, SUM(quantity)::BIGINT
            FROM sale_product
            WHERE sale_id = $1
            GROUP BY product_id
            ORDER BY product_id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        for (product_id, quantity) in lines {
            let quantity = i32::try_from(quantity)
                .map_err(|_| AppError::from(shared::LedgerError::QuantityOverflow))?;
            remainder::return_stock(&mut *tx, product_id, branch_id, quantity).await?;
        }

        // Line items go with the sale through the foreign key cascade.
        sqlx::query("DELETE FROM sale WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(sale_id = %id, "Sale voided and stock restored");
        Ok(())
    }

    /// Record a payment against the sale with the given increment id.
    ///
    /// The policy decides acceptance; an accepted payment replaces the
    /// previous `paid`/`debt` values. Amounts finer than a cent are refused
    /// so the stored split adds up to the total exactly.
    pub async fn make_pay(
        &self,
        increment_id: &str,
        amount: Decimal,
        policy: &dyn PaymentPolicy,
    ) -> AppResult<Sale> {
        if !fits_money_scale(&amount) {
            return Err(AppError::Validation(
                "money must have at most 2 decimal places".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let (id, total_price) = sqlx::query_as::<_, (Uuid, Decimal)>(
            "SELECT id, total_price FROM sale WHERE increment_id = $1 FOR UPDATE",
        )
        .bind(increment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("sale"))?;

        let settlement = policy.settle(total_price, amount)?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sale
            SET paid = $2, debt = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, branch_id, client_id, increment_id, total_price, paid, debt,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(settlement.paid)
        .bind(settlement.debt)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            increment_id = %increment_id,
            total_price = %total_price,
            paid = %settlement.paid,
            debt = %settlement.debt,
            "Payment recorded"
        );
        Ok(sale)
    }
}

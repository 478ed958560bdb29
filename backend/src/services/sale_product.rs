//! Sale line item service
//!
//! Every mutation of a line item touches three rows: the line itself, the
//! ledger row of its product at the sale's branch and the sale's running
//! total. All three are written in one transaction with the sale and ledger
//! rows locked, so concurrent sales of the same stock cannot oversell and
//! the sale total always equals the sum of its line totals.

use rust_decimal::Decimal;
use shared::{ledger, CreateSaleProduct, ListRequest, SaleProduct, SaleProductList, UpdateSaleProduct};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::remainder;

#[derive(Clone)]
pub struct SaleProductService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct SaleRef {
    branch_id: Uuid,
    increment_id: String,
}

#[derive(sqlx::FromRow)]
struct LineRef {
    product_id: Uuid,
    sale_id: Uuid,
    quantity: i32,
    price: Decimal,
    total_price: Decimal,
}

async fn lock_sale(conn: &mut PgConnection, sale_id: Uuid) -> AppResult<SaleRef> {
    sqlx::query_as::<_, SaleRef>("SELECT branch_id, increment_id FROM sale WHERE id = $1 FOR UPDATE")
        .bind(sale_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::NotFound("sale"))
}

/// Sale of a line item, read before any lock so the sale is always locked first
async fn line_sale_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Uuid> {
    sqlx::query_scalar::<_, Uuid>("SELECT sale_id FROM sale_product WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::NoRowsAffected)
}

async fn lock_line(conn: &mut PgConnection, id: Uuid) -> AppResult<LineRef> {
    sqlx::query_as::<_, LineRef>(
        r#"
        SELECT product_id, sale_id, quantity, price, total_price
        FROM sale_product
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::NoRowsAffected)
}

/// Add `delta` to a sale's running total, keeping `debt = total_price - paid`
async fn add_to_sale_total(conn: &mut PgConnection, sale_id: Uuid, delta: Decimal) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE sale
        SET total_price = total_price + $2,
            debt = total_price + $2 - paid,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(sale_id)
    .bind(delta)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

impl SaleProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sell `quantity` units of a product on a sale.
    ///
    /// Deducts the ledger row of the sale's branch, snapshots the product's
    /// current price on the line and adds the line total to the sale.
    pub async fn create(&self, input: CreateSaleProduct) -> AppResult<SaleProduct> {
        let mut tx = self.db.begin().await?;

        let sale = lock_sale(&mut *tx, input.sale_id).await?;

        let price = sqlx::query_scalar::<_, Decimal>("SELECT price FROM product WHERE id = $1")
            .bind(input.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("product"))?;

        let row = remainder::lock_row(&mut *tx, input.product_id, sale.branch_id)
            .await?
            .ok_or(AppError::InsufficientStock {
                available: 0,
                requested: input.quantity,
            })?;

        let deduction = ledger::deduct(row.quantity, input.quantity, price)?;

        let line = sqlx::query_as::<_, SaleProduct>(
            r#"
            INSERT INTO sale_product (id, product_id, sale_id, sale_increment_id,
                                      quantity, price, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, sale_id, sale_increment_id, quantity, price,
                      total_price, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.product_id)
        .bind(input.sale_id)
        .bind(&sale.increment_id)
        .bind(input.quantity)
        .bind(deduction.unit_price)
        .bind(deduction.total_price)
        .fetch_one(&mut *tx)
        .await?;

        remainder::set_quantity(&mut *tx, row.id, deduction.remaining).await?;
        add_to_sale_total(&mut *tx, input.sale_id, deduction.total_price).await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = %input.sale_id,
            product_id = %input.product_id,
            branch_id = %sale.branch_id,
            quantity = input.quantity,
            remaining = deduction.remaining,
            total_price = %deduction.total_price,
            "Stock deducted for sale"
        );
        Ok(line)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<SaleProduct> {
        sqlx::query_as::<_, SaleProduct>(
            r#"
            SELECT id, product_id, sale_id, sale_increment_id, quantity, price,
                   total_price, created_at, updated_at
            FROM sale_product
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("sale_product"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<SaleProductList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sale_product WHERE $1::text IS NULL OR sale_increment_id ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let sale_products = sqlx::query_as::<_, SaleProduct>(
            r#"
            SELECT id, product_id, sale_id, sale_increment_id, quantity, price,
                   total_price, created_at, updated_at
            FROM sale_product
            WHERE $1::text IS NULL OR sale_increment_id ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(SaleProductList {
            count,
            sale_products,
        })
    }

    /// Change the quantity of a line item.
    ///
    /// The ledger moves by the difference and the line keeps its original
    /// unit price.
    pub async fn update(&self, id: Uuid, input: UpdateSaleProduct) -> AppResult<SaleProduct> {
        let mut tx = self.db.begin().await?;

        let sale_id = line_sale_id(&mut *tx, id).await?;
        let sale = lock_sale(&mut *tx, sale_id).await?;
        let line = lock_line(&mut *tx, id).await?;

        let delta = input.quantity - line.quantity;
        if delta > 0 {
            let row = remainder::lock_row(&mut *tx, line.product_id, sale.branch_id)
                .await?
                .ok_or(AppError::InsufficientStock {
                    available: 0,
                    requested: delta,
                })?;
            let quantity = ledger::adjust(row.quantity, delta)?;
            remainder::set_quantity(&mut *tx, row.id, quantity).await?;
        } else if delta < 0 {
            remainder::return_stock(&mut *tx, line.product_id, sale.branch_id, -delta).await?;
        }

        let total_price = Decimal::from(input.quantity) * line.price;

        let updated = sqlx::query_as::<_, SaleProduct>(
            r#"
            UPDATE sale_product
            SET quantity = $2, total_price = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_id, sale_id, sale_increment_id, quantity, price,
                      total_price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.quantity)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        add_to_sale_total(&mut *tx, line.sale_id, total_price - line.total_price).await?;

        tx.commit().await?;

        tracing::info!(
            sale_product_id = %id,
            sale_id = %line.sale_id,
            delta,
            "Line item quantity changed"
        );
        Ok(updated)
    }

    /// Remove a line item, returning its stock to the ledger
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let sale_id = line_sale_id(&mut *tx, id).await?;
        let sale = lock_sale(&mut *tx, sale_id).await?;
        let line = lock_line(&mut *tx, id).await?;

        remainder::return_stock(&mut *tx, line.product_id, sale.branch_id, line.quantity).await?;

        sqlx::query("DELETE FROM sale_product WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        add_to_sale_total(&mut *tx, line.sale_id, -line.total_price).await?;

        tx.commit().await?;

        tracing::info!(
            sale_product_id = %id,
            sale_id = %line.sale_id,
            restored = line.quantity,
            "Line item removed and stock restored"
        );
        Ok(())
    }
}

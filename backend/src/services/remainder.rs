//! Stock ledger (remainder) service
//!
//! Besides manual CRUD for stock corrections, this module holds the ledger
//! statements shared by the sale and receipt paths. Those take a
//! `PgConnection` so they run inside the caller's transaction.

use shared::{ledger, ListRequest, Receipt, Remainder, RemainderInput, RemainderList};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Ledger quantity locked for the rest of the transaction
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LockedRow {
    pub id: Uuid,
    pub quantity: i32,
}

/// Lock the ledger row for a product at a branch, if there is one
pub async fn lock_row(
    conn: &mut PgConnection,
    product_id: Uuid,
    branch_id: Uuid,
) -> AppResult<Option<LockedRow>> {
    let row = sqlx::query_as::<_, LockedRow>(
        r#"
        SELECT id, quantity
        FROM remainder
        WHERE product_id = $1 AND branch_id = $2
        FOR UPDATE
        "#,
    )
    .bind(product_id)
    .bind(branch_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// Store a new quantity on a locked ledger row
pub async fn set_quantity(conn: &mut PgConnection, id: Uuid, quantity: i32) -> AppResult<()> {
    sqlx::query("UPDATE remainder SET quantity = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Add received goods to the ledger.
///
/// Creates the row for a new (product, branch) pair. For an existing row the
/// quantity grows and the sale price is refreshed, while the stored coming
/// price is left untouched.
pub async fn receive(conn: &mut PgConnection, receipt: &Receipt) -> AppResult<Remainder> {
    let row = sqlx::query_as::<_, Remainder>(
        r#"
        INSERT INTO remainder (id, product_id, branch_id, name, quantity, coming_price, sale_price)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (product_id, branch_id) DO UPDATE
        SET quantity = remainder.quantity + EXCLUDED.quantity,
            sale_price = EXCLUDED.sale_price,
            updated_at = NOW()
        RETURNING id, product_id, branch_id, name, quantity, coming_price, sale_price,
                  created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(receipt.product_id)
    .bind(receipt.branch_id)
    .bind(&receipt.name)
    .bind(receipt.quantity)
    .bind(receipt.coming_price)
    .bind(receipt.sale_price)
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(
        product_id = %receipt.product_id,
        branch_id = %receipt.branch_id,
        received = receipt.quantity,
        quantity = row.quantity,
        "Stock received"
    );
    Ok(row)
}

/// Return sold units to the ledger row of a product at a branch.
///
/// A row deleted by hand since the sale is opened again from the product,
/// without a coming price. Returns the new ledger quantity.
pub async fn return_stock(
    conn: &mut PgConnection,
    product_id: Uuid,
    branch_id: Uuid,
    quantity: i32,
) -> AppResult<i32> {
    if let Some(row) = lock_row(&mut *conn, product_id, branch_id).await? {
        let restored = ledger::restock(row.quantity, quantity)?;
        set_quantity(&mut *conn, row.id, restored).await?;
        return Ok(restored);
    }

    let quantity = ledger::restock(0, quantity)?;
    let restored = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO remainder (id, product_id, branch_id, name, quantity, coming_price, sale_price)
        SELECT $1, p.id, $3, p.name, $4, 0, p.price
        FROM product p
        WHERE p.id = $2
        ON CONFLICT (product_id, branch_id) DO UPDATE
        SET quantity = remainder.quantity + EXCLUDED.quantity,
            updated_at = NOW()
        RETURNING quantity
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(branch_id)
    .bind(quantity)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::NotFound("product"))?;

    tracing::warn!(
        product_id = %product_id,
        branch_id = %branch_id,
        quantity = restored,
        "Ledger row reopened to return stock"
    );
    Ok(restored)
}

#[derive(Clone)]
pub struct RemainderService {
    db: PgPool,
}

impl RemainderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a ledger row by hand. A second row for the same product and
    /// branch is refused by the unique key.
    pub async fn create(&self, input: RemainderInput) -> AppResult<Remainder> {
        let remainder = sqlx::query_as::<_, Remainder>(
            r#"
            INSERT INTO remainder (id, product_id, branch_id, name, quantity, coming_price, sale_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, branch_id, name, quantity, coming_price, sale_price,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.product_id)
        .bind(input.branch_id)
        .bind(&input.name)
        .bind(input.quantity)
        .bind(input.coming_price)
        .bind(input.sale_price)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            remainder_id = %remainder.id,
            quantity = remainder.quantity,
            "Ledger row created manually"
        );
        Ok(remainder)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Remainder> {
        sqlx::query_as::<_, Remainder>(
            r#"
            SELECT id, product_id, branch_id, name, quantity, coming_price, sale_price,
                   created_at, updated_at
            FROM remainder
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("remainder"))
    }

    pub async fn list(&self, req: &ListRequest) -> AppResult<RemainderList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM remainder WHERE $1::text IS NULL OR name ILIKE $1",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let remainders = sqlx::query_as::<_, Remainder>(
            r#"
            SELECT id, product_id, branch_id, name, quantity, coming_price, sale_price,
                   created_at, updated_at
            FROM remainder
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

        Ok(RemainderList { count, remainders })
    }

    /// Overwrite a ledger row as a manual stock correction
    pub async fn update(&self, id: Uuid, input: RemainderInput) -> AppResult<Remainder> {
        let remainder = sqlx::query_as::<_, Remainder>(
            r#"
            UPDATE remainder
            SET product_id = $2, branch_id = $3, name = $4, quantity = $5,
                coming_price = $6, sale_price = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_id, branch_id, name, quantity, coming_price, sale_price,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.product_id)
        .bind(input.branch_id)
        .bind(&input.name)
        .bind(input.quantity)
        .bind(input.coming_price)
        .bind(input.sale_price)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)?;

        tracing::info!(
            remainder_id = %remainder.id,
            quantity = remainder.quantity,
            "Ledger row corrected"
        );
        Ok(remainder)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM remainder WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

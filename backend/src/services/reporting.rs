//! Reporting service
//!
//! Read-only queries across entities: the client registration window and
//! the per-branch sales summary.

use rust_decimal::Decimal;
use shared::{BranchDoc, Client, ClientList, RegistrationWindow};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Clients whose registration day (UTC) lies strictly between `from` and `to`
    pub async fn registration(&self, window: RegistrationWindow) -> AppResult<ClientList> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, father_name, phone, birthday, gender,
                   branch_id, active, created_at, updated_at
            FROM client
            WHERE (created_at AT TIME ZONE 'UTC')::date > $1
              AND (created_at AT TIME ZONE 'UTC')::date < $2
            ORDER BY created_at
            "#,
        )
        .bind(window.from)
        .bind(window.to)
        .fetch_all(&self.db)
        .await?;

        Ok(ClientList {
            count: clients.len() as i64,
            clients,
        })
    }

    /// Sales summary for a branch.
    ///
    /// `total_sale_price` sums the totals of every sale of the branch and
    /// `total_sale_quantity` sums the quantities of every line item of those
    /// sales.
    pub async fn branch_doc(&self, branch_id: Uuid) -> AppResult<BranchDoc> {
        let (branch_id, branch_name, total_sale_price, total_sale_quantity) =
            sqlx::query_as::<_, (Uuid, String, Decimal, i64)>(
                r#"
                SELECT b.id,
                       b.name,
                       COALESCE((SELECT SUM(s.total_price)
                                 FROM sale s
                                 WHERE s.branch_id = b.id), 0) AS total_sale_price,
                       COALESCE((SELECT SUM(sp.quantity)
                                 FROM sale_product sp
                                 JOIN sale s ON s.id = sp.sale_id
                                 WHERE s.branch_id = b.id), 0)::BIGINT AS total_sale_quantity
                FROM branch b
                WHERE b.id = $1
                "#,
            )
            .bind(branch_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AppError::NotFound("branch"))?;

        Ok(BranchDoc {
            branch_id,
            branch_name,
            total_sale_price,
            total_sale_quantity,
        })
    }
}

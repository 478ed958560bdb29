//! Client management service

use shared::{Client, ClientInput, ClientList, ListRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

impl ClientService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: ClientInput) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO client (id, first_name, last_name, father_name, phone, birthday,
                                gender, branch_id, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, first_name, last_name, father_name, phone, birthday, gender,
                      branch_id, active, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.father_name)
        .bind(&input.phone)
        .bind(input.birthday)
        .bind(&input.gender)
        .bind(input.branch_id)
        .bind(input.active_or_default())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(client_id = %client.id, branch_id = %client.branch_id, "Client registered");
        Ok(client)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, father_name, phone, birthday, gender,
                   branch_id, active, created_at, updated_at
            FROM client
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("client"))
    }

    /// List clients, searching the name fields and phone
    pub async fn list(&self, req: &ListRequest) -> AppResult<ClientList> {
        let pattern = req.search_pattern();

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM client
            WHERE $1::text IS NULL
               OR first_name ILIKE $1 OR last_name ILIKE $1
               OR father_name ILIKE $1 OR phone ILIKE $1
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, father_name, phone, birthday, gender,
                   branch_id, active, created_at, updated_at
            FROM client
            WHERE $1::text IS NULL
               OR first_name ILIKE $1 OR last_name ILIKE $1
               OR father_name ILIKE $1 OR phone ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(req.limit)
        .bind(req.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(ClientList { count, clients })
    }

    pub async fn update(&self, id: Uuid, input: ClientInput) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE client
            SET first_name = $2, last_name = $3, father_name = $4, phone = $5,
                birthday = $6, gender = $7, branch_id = $8, active = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, father_name, phone, birthday, gender,
                      branch_id, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.father_name)
        .bind(&input.phone)
        .bind(input.birthday)
        .bind(&input.gender)
        .bind(input.branch_id)
        .bind(input.active_or_default())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NoRowsAffected)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }
}

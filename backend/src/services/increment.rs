//! Increment id allocation for numbered documents
//!
//! Must be called inside the transaction that inserts the numbered
//! document. The advisory lock is held until that transaction ends, so two
//! concurrent creations of the same kind can never read the same latest id.

use shared::DocumentKind;
use sqlx::PgConnection;

use crate::error::AppResult;

/// Allocate the next increment id for `kind` (e.g. `S-0000043`)
pub async fn next_increment_id(conn: &mut PgConnection, kind: DocumentKind) -> AppResult<String> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(kind.table())
        .execute(&mut *conn)
        .await?;

    // Longest first so that counters past seven digits sort after the rest.
    let sql = format!(
        "SELECT {column} FROM {table} ORDER BY char_length({column}) DESC, {column} DESC LIMIT 1",
        column = kind.column(),
        table = kind.table(),
    );
    let last = sqlx::query_scalar::<_, String>(&sql)
        .fetch_optional(&mut *conn)
        .await?;

    let increment_id = shared::next_increment_id(kind, last.as_deref())?;
    tracing::debug!(
        table = kind.table(),
        last = ?last,
        next = %increment_id,
        "Allocated increment id"
    );

    Ok(increment_id)
}

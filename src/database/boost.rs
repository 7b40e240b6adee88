use super::{models::ActiveBoostModel, timestamp};
use crate::game::BoostKind;
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection};

pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: i64,
    kind: BoostKind,
    percent: f64,
    source: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), SqlxError> {
    sqlx::query(
        "INSERT INTO active_boosts (user_id, kind, percent, source, expires_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(kind.db_name())
    .bind(percent)
    .bind(source)
    .bind(timestamp(expires_at))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Boosts still running at `at`
pub async fn active_at(
    conn: &mut SqliteConnection,
    user_id: i64,
    at: DateTime<Utc>,
) -> Result<Vec<ActiveBoostModel>, SqlxError> {
    sqlx::query_as::<_, ActiveBoostModel>(
        "SELECT id, user_id, kind, percent, source, expires_at FROM active_boosts
         WHERE user_id = ? AND expires_at > ? ORDER BY expires_at",
    )
    .bind(user_id)
    .bind(timestamp(at))
    .fetch_all(&mut *conn)
    .await
}

pub async fn purge_expired(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM active_boosts WHERE user_id = ? AND expires_at <= ?")
        .bind(user_id)
        .bind(timestamp(now))
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

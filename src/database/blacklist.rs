use super::{models::BlacklistEntryModel, timestamp};
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection};

/// Finds a blacklist entry by Discord ID, if it exists
pub async fn find_by_discord_id(
    conn: &mut SqliteConnection,
    discord_id: i64,
) -> Result<Option<BlacklistEntryModel>, SqlxError> {
    sqlx::query_as::<_, BlacklistEntryModel>(
        r#"
        SELECT id, discord_id, moderator_id, reason, expires_at, created_at
        FROM blacklist_entries
        WHERE discord_id = ?
        "#,
    )
    .bind(discord_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Like [`find_by_discord_id`], but drops the entry once it has expired
pub async fn find_active(
    conn: &mut SqliteConnection,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<Option<BlacklistEntryModel>, SqlxError> {
    match find_by_discord_id(conn, discord_id).await? {
        Some(entry) if entry.is_expired(now) => {
            delete_by_discord_id(conn, discord_id).await?;
            tracing::info!(discord_id, "blacklist entry expired");
            Ok(None)
        }
        other => Ok(other),
    }
}

/// Creates a new blacklist entry
pub async fn insert(
    conn: &mut SqliteConnection,
    discord_id: i64,
    moderator_id: i64,
    reason: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<BlacklistEntryModel, SqlxError> {
    let created_at = timestamp(Utc::now());
    let expires_at = expires_at.map(timestamp);

    let result = sqlx::query(
        r#"
        INSERT INTO blacklist_entries (discord_id, moderator_id, reason, expires_at, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(discord_id)
    .bind(moderator_id)
    .bind(reason.as_deref())
    .bind(expires_at.as_deref())
    .bind(&created_at)
    .execute(&mut *conn)
    .await?;

    Ok(BlacklistEntryModel {
        id: result.last_insert_rowid(),
        discord_id,
        moderator_id,
        reason,
        expires_at,
        created_at,
    })
}

/// Removes a user from the blacklist. Returns the number of affected rows
pub async fn delete_by_discord_id(
    conn: &mut SqliteConnection,
    discord_id: i64,
) -> Result<u64, SqlxError> {
    let result = sqlx::query(
        r#"
        DELETE FROM blacklist_entries
        WHERE discord_id = ?
        "#,
    )
    .bind(discord_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Lists the most recent blacklist entries
pub async fn list_recent(
    conn: &mut SqliteConnection,
    limit: i64,
    offset: i64,
) -> Result<Vec<BlacklistEntryModel>, SqlxError> {
    sqlx::query_as::<_, BlacklistEntryModel>(
        r#"
        SELECT id, discord_id, moderator_id, reason, expires_at, created_at
        FROM blacklist_entries
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use chrono::Duration;

    #[tokio::test]
    async fn expired_entries_are_dropped_on_lookup() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let now = Utc::now();

        insert(&mut conn, 10, 1, Some("spam".into()), Some(now - Duration::minutes(1)))
            .await
            .unwrap();
        insert(&mut conn, 11, 1, None, Some(now + Duration::hours(1)))
            .await
            .unwrap();
        insert(&mut conn, 12, 1, None, None).await.unwrap();

        assert!(find_active(&mut conn, 10, now).await.unwrap().is_none());
        assert!(find_by_discord_id(&mut conn, 10).await.unwrap().is_none());
        assert!(find_active(&mut conn, 11, now).await.unwrap().is_some());
        assert!(find_active(&mut conn, 12, now).await.unwrap().is_some());
        assert_eq!(list_recent(&mut conn, 10, 0).await.unwrap().len(), 2);
    }
}

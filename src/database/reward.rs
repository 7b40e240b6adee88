use super::{models::RewardStateModel, timestamp};
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection};

const STATE_COLUMNS: &str = "id, user_id, reward_type, last_claimed_at, next_reset_at, total_claims";

/// Claim state of one reward kind, if it was ever claimed
pub async fn get(
    conn: &mut SqliteConnection,
    user_id: i64,
    reward_type: &str,
) -> Result<Option<RewardStateModel>, SqlxError> {
    sqlx::query_as::<_, RewardStateModel>(&format!(
        "SELECT {STATE_COLUMNS} FROM reward_states WHERE user_id = ? AND reward_type = ?"
    ))
    .bind(user_id)
    .bind(reward_type)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn get_all(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<RewardStateModel>, SqlxError> {
    sqlx::query_as::<_, RewardStateModel>(&format!(
        "SELECT {STATE_COLUMNS} FROM reward_states WHERE user_id = ? ORDER BY reward_type"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Stamps a claim and bumps the claim counter, creating the row on first claim
pub async fn record_claim(
    conn: &mut SqliteConnection,
    user_id: i64,
    reward_type: &str,
    claimed_at: DateTime<Utc>,
    next_reset_at: DateTime<Utc>,
) -> Result<RewardStateModel, SqlxError> {
    sqlx::query_as::<_, RewardStateModel>(&format!(
        "INSERT INTO reward_states (user_id, reward_type, last_claimed_at, next_reset_at, total_claims)
         VALUES (?, ?, ?, ?, 1)
         ON CONFLICT(user_id, reward_type) DO UPDATE SET
            last_claimed_at = excluded.last_claimed_at,
            next_reset_at = excluded.next_reset_at,
            total_claims = reward_states.total_claims + 1
         RETURNING {STATE_COLUMNS}"
    ))
    .bind(user_id)
    .bind(reward_type)
    .bind(timestamp(claimed_at))
    .bind(timestamp(next_reset_at))
    .fetch_one(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{test_pool, user};
    use chrono::Duration;

    #[tokio::test]
    async fn claims_accumulate_per_kind() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let player = user::get_or_create(&mut conn, 5).await.unwrap();
        let now = Utc::now();

        assert!(get(&mut conn, player.id, "daily").await.unwrap().is_none());

        record_claim(&mut conn, player.id, "daily", now, now + Duration::days(1))
            .await
            .unwrap();
        let state = record_claim(&mut conn, player.id, "daily", now, now + Duration::days(2))
            .await
            .unwrap();
        assert_eq!(state.total_claims, 2);
        assert_eq!(state.next_reset_at, Some(timestamp(now + Duration::days(2))));

        record_claim(&mut conn, player.id, "weekly", now, now + Duration::days(7))
            .await
            .unwrap();
        let all = get_all(&mut conn, player.id).await.unwrap();
        assert_eq!(
            all.iter().map(|state| state.reward_type.as_str()).collect::<Vec<_>>(),
            ["daily", "weekly"]
        );
    }
}

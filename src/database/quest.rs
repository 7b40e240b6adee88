use super::models::QuestProgressModel;
use sqlx::{Error as SqlxError, SqliteConnection};

pub async fn get(
    conn: &mut SqliteConnection,
    user_id: i64,
    quest: &str,
    period: &str,
) -> Result<Option<QuestProgressModel>, SqlxError> {
    sqlx::query_as::<_, QuestProgressModel>(
        "SELECT quest, period, progress, claimed FROM quest_progress
         WHERE user_id = ? AND quest = ? AND period = ?",
    )
    .bind(user_id)
    .bind(quest)
    .bind(period)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn list_for_periods(
    conn: &mut SqliteConnection,
    user_id: i64,
    daily_period: &str,
    weekly_period: &str,
) -> Result<Vec<QuestProgressModel>, SqlxError> {
    sqlx::query_as::<_, QuestProgressModel>(
        "SELECT quest, period, progress, claimed FROM quest_progress
         WHERE user_id = ? AND period IN (?, ?)",
    )
    .bind(user_id)
    .bind(daily_period)
    .bind(weekly_period)
    .fetch_all(&mut *conn)
    .await
}

pub async fn advance(
    conn: &mut SqliteConnection,
    user_id: i64,
    quest: &str,
    period: &str,
    amount: i64,
) -> Result<(), SqlxError> {
    sqlx::query(
        "INSERT INTO quest_progress (user_id, quest, period, progress, claimed) VALUES (?, ?, ?, ?, 0)
         ON CONFLICT(user_id, quest, period) DO UPDATE SET progress = progress + excluded.progress",
    )
    .bind(user_id)
    .bind(quest)
    .bind(period)
    .bind(amount)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Marks a quest claimed; returns false when it already was
pub async fn mark_claimed(
    conn: &mut SqliteConnection,
    user_id: i64,
    quest: &str,
    period: &str,
) -> Result<bool, SqlxError> {
    let result = sqlx::query(
        "UPDATE quest_progress SET claimed = 1
         WHERE user_id = ? AND quest = ? AND period = ? AND claimed = 0",
    )
    .bind(user_id)
    .bind(quest)
    .bind(period)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

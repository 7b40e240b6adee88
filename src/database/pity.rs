use super::models::PityCounterModel;
use crate::game::gacha::PityCounters;
use sqlx::{Error as SqlxError, SqliteConnection};

pub async fn load(conn: &mut SqliteConnection, user_id: i64) -> Result<PityCounters, SqlxError> {
    let rows = sqlx::query_as::<_, PityCounterModel>(
        "SELECT track, count FROM pity_counters WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut counters = PityCounters::new();
    for row in rows {
        counters.set(&row.track, u32::try_from(row.count).unwrap_or(0));
    }
    Ok(counters)
}

pub async fn save(
    conn: &mut SqliteConnection,
    user_id: i64,
    counters: &PityCounters,
) -> Result<(), SqlxError> {
    for (track, count) in counters.iter() {
        sqlx::query(
            "INSERT INTO pity_counters (user_id, track, count) VALUES (?, ?, ?)
             ON CONFLICT(user_id, track) DO UPDATE SET count = excluded.count",
        )
        .bind(user_id)
        .bind(track)
        .bind(i64::from(count))
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

use super::{models::UserModel, timestamp};
use crate::game::farm::BASE_FARM_SLOTS;
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection};

const USER_COLUMNS: &str =
    "id, discord_id, coins, gems, total_rolls, farm_slots, last_collected_at, created_at";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ranking {
    Coins,
    Gems,
    Rolls,
}

/// Finds a user by discord id
pub async fn find_by_discord_id(
    conn: &mut SqliteConnection,
    discord_id: i64,
) -> Result<Option<UserModel>, SqlxError> {
    sqlx::query_as::<_, UserModel>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE discord_id = ?"
    ))
    .bind(discord_id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<UserModel, SqlxError> {
    sqlx::query_as::<_, UserModel>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}

/// Creates a new user row and returns the stored model
pub async fn create(conn: &mut SqliteConnection, discord_id: i64) -> Result<UserModel, SqlxError> {
    let created_at = timestamp(Utc::now());

    let result = sqlx::query(
        "INSERT INTO users (discord_id, coins, gems, total_rolls, farm_slots, created_at) \
        VALUES (?, 0, 0, 0, ?, ?)",
    )
    .bind(discord_id)
    .bind(BASE_FARM_SLOTS)
    .bind(&created_at)
    .execute(&mut *conn)
    .await?;

    Ok(UserModel {
        id: result.last_insert_rowid(),
        discord_id,
        coins: 0,
        gems: 0,
        total_rolls: 0,
        farm_slots: BASE_FARM_SLOTS,
        last_collected_at: None,
        created_at,
    })
}

/// Gets an existing user or creates a new one if it doesn't exist
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    discord_id: i64,
) -> Result<UserModel, SqlxError> {
    if let Some(existing) = find_by_discord_id(conn, discord_id).await? {
        Ok(existing)
    } else {
        create(conn, discord_id).await
    }
}

/// Applies balance deltas and returns the updated row.
///
/// The `CHECK` constraints reject a negative result; callers verify funds first.
pub async fn adjust_balance(
    conn: &mut SqliteConnection,
    user_id: i64,
    coins_delta: i64,
    gems_delta: i64,
) -> Result<UserModel, SqlxError> {
    sqlx::query("UPDATE users SET coins = coins + ?, gems = gems + ? WHERE id = ?")
        .bind(coins_delta)
        .bind(gems_delta)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    find_by_id(conn, user_id).await
}

pub async fn add_rolls(
    conn: &mut SqliteConnection,
    user_id: i64,
    rolls: i64,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE users SET total_rolls = total_rolls + ? WHERE id = ?")
        .bind(rolls)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_last_collected(
    conn: &mut SqliteConnection,
    user_id: i64,
    at: DateTime<Utc>,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE users SET last_collected_at = ? WHERE id = ?")
        .bind(timestamp(at))
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_farm_slots(
    conn: &mut SqliteConnection,
    user_id: i64,
    slots: i64,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE users SET farm_slots = ? WHERE id = ?")
        .bind(slots)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Highest ranked players first
pub async fn top(
    conn: &mut SqliteConnection,
    ranking: Ranking,
    limit: i64,
) -> Result<Vec<UserModel>, SqlxError> {
    let column = match ranking {
        Ranking::Coins => "coins",
        Ranking::Gems => "gems",
        Ranking::Rolls => "total_rolls",
    };

    sqlx::query_as::<_, UserModel>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY {column} DESC, id ASC LIMIT ?"
    ))
    .bind(limit.clamp(1, 50))
    .fetch_all(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = get_or_create(&mut conn, 42).await.unwrap();
        let second = get_or_create(&mut conn, 42).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.farm_slots, BASE_FARM_SLOTS);
    }

    #[tokio::test]
    async fn balance_cannot_go_negative() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let user = get_or_create(&mut conn, 1).await.unwrap();

        let user = adjust_balance(&mut conn, user.id, 100, 5).await.unwrap();
        assert_eq!((user.coins, user.gems), (100, 5));
        assert!(adjust_balance(&mut conn, user.id, -101, 0).await.is_err());
        assert_eq!(find_by_id(&mut conn, user.id).await.unwrap().coins, 100);
    }

    #[tokio::test]
    async fn ranking_orders_descending() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        for (discord_id, coins) in [(1, 10), (2, 30), (3, 20)] {
            let user = get_or_create(&mut conn, discord_id).await.unwrap();
            adjust_balance(&mut conn, user.id, coins, 0).await.unwrap();
        }

        let ranked: Vec<i64> = top(&mut conn, Ranking::Coins, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.discord_id)
            .collect();
        assert_eq!(ranked, vec![2, 3, 1]);
    }
}

use super::models::ItemStackModel;
use crate::game::item::Item;
use sqlx::{Error as SqlxError, SqliteConnection};

pub async fn quantity(
    conn: &mut SqliteConnection,
    user_id: i64,
    item: Item,
) -> Result<i64, SqlxError> {
    let owned: Option<i64> =
        sqlx::query_scalar("SELECT quantity FROM user_items WHERE user_id = ? AND item = ?")
            .bind(user_id)
            .bind(item.key())
            .fetch_optional(&mut *conn)
            .await?;
    Ok(owned.unwrap_or(0))
}

/// Adds (or with a negative delta, removes) items.
///
/// Removal never builds a candidate row, since SQLite checks `quantity >= 0`
/// on the insert values before resolving the conflict.
pub async fn adjust(
    conn: &mut SqliteConnection,
    user_id: i64,
    item: Item,
    delta: i64,
) -> Result<(), SqlxError> {
    if delta >= 0 {
        sqlx::query(
            "INSERT INTO user_items (user_id, item, quantity) VALUES (?, ?, ?)
             ON CONFLICT(user_id, item) DO UPDATE SET quantity = quantity + excluded.quantity",
        )
        .bind(user_id)
        .bind(item.key())
        .bind(delta)
        .execute(&mut *conn)
        .await?;
        return Ok(());
    }

    let updated = sqlx::query(
        "UPDATE user_items SET quantity = quantity + ? WHERE user_id = ? AND item = ?",
    )
    .bind(delta)
    .bind(user_id)
    .bind(item.key())
    .execute(&mut *conn)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(SqlxError::RowNotFound);
    }

    sqlx::query("DELETE FROM user_items WHERE user_id = ? AND item = ? AND quantity = 0")
        .bind(user_id)
        .bind(item.key())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn list(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<ItemStackModel>, SqlxError> {
    sqlx::query_as::<_, ItemStackModel>(
        "SELECT item, quantity FROM user_items WHERE user_id = ? AND quantity > 0 ORDER BY item",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{test_pool, user};

    #[tokio::test]
    async fn removing_items_updates_and_clears_the_stack() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let owner = user::get_or_create(&mut conn, 1).await.unwrap();

        adjust(&mut conn, owner.id, Item::CoinPotion, 2).await.unwrap();
        adjust(&mut conn, owner.id, Item::CoinPotion, -1).await.unwrap();
        assert_eq!(quantity(&mut conn, owner.id, Item::CoinPotion).await.unwrap(), 1);

        adjust(&mut conn, owner.id, Item::CoinPotion, -1).await.unwrap();
        assert_eq!(quantity(&mut conn, owner.id, Item::CoinPotion).await.unwrap(), 0);
        assert!(list(&mut conn, owner.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_more_than_owned_fails() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let owner = user::get_or_create(&mut conn, 2).await.unwrap();

        assert!(matches!(
            adjust(&mut conn, owner.id, Item::PetFood, -1).await,
            Err(SqlxError::RowNotFound)
        ));

        adjust(&mut conn, owner.id, Item::PetFood, 1).await.unwrap();
        assert!(adjust(&mut conn, owner.id, Item::PetFood, -2).await.is_err());
        assert_eq!(quantity(&mut conn, owner.id, Item::PetFood).await.unwrap(), 1);
    }
}

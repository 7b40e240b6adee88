use super::models::FumoStackModel;
use crate::game::{Rarity, Variant};
use sqlx::{Error as SqlxError, SqliteConnection};

const STACK_COLUMNS: &str = "id, user_id, name, rarity, variant, quantity, farming";

/// Adds copies to a stack, creating it when missing
pub async fn add(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    rarity: Rarity,
    variant: Variant,
    quantity: i64,
) -> Result<(), SqlxError> {
    sqlx::query(
        "INSERT INTO fumos (user_id, name, rarity, variant, quantity, farming)
         VALUES (?, ?, ?, ?, ?, 0)
         ON CONFLICT(user_id, name, variant) DO UPDATE SET quantity = quantity + excluded.quantity",
    )
    .bind(user_id)
    .bind(name)
    .bind(rarity.db_name())
    .bind(variant.db_name())
    .bind(quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn find(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    variant: Variant,
) -> Result<Option<FumoStackModel>, SqlxError> {
    sqlx::query_as::<_, FumoStackModel>(&format!(
        "SELECT {STACK_COLUMNS} FROM fumos WHERE user_id = ? AND name = ? AND variant = ?"
    ))
    .bind(user_id)
    .bind(name)
    .bind(variant.db_name())
    .fetch_optional(&mut *conn)
    .await
}

/// Every stack a user owns, rarest first
pub async fn list(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<FumoStackModel>, SqlxError> {
    let mut stacks = sqlx::query_as::<_, FumoStackModel>(&format!(
        "SELECT {STACK_COLUMNS} FROM fumos WHERE user_id = ? AND quantity > 0"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    stacks.sort_by(|a, b| {
        b.rarity()
            .cmp(&a.rarity())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| b.variant().cmp(&a.variant()))
    });
    Ok(stacks)
}

pub async fn farming(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<FumoStackModel>, SqlxError> {
    sqlx::query_as::<_, FumoStackModel>(&format!(
        "SELECT {STACK_COLUMNS} FROM fumos WHERE user_id = ? AND farming > 0 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Removes copies; the row disappears once empty
pub async fn remove(
    conn: &mut SqliteConnection,
    stack_id: i64,
    quantity: i64,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE fumos SET quantity = quantity - ? WHERE id = ?")
        .bind(quantity)
        .bind(stack_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM fumos WHERE id = ? AND quantity = 0")
        .bind(stack_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_farming(
    conn: &mut SqliteConnection,
    stack_id: i64,
    farming: i64,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE fumos SET farming = ? WHERE id = ?")
        .bind(farming)
        .bind(stack_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

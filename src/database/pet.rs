use super::{models::PetModel, timestamp};
use chrono::Utc;
use sqlx::{Error as SqlxError, SqliteConnection};

const PET_COLUMNS: &str = "id, user_id, species, level, equipped, hatched_at";

pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: i64,
    species: &str,
) -> Result<PetModel, SqlxError> {
    let hatched_at = timestamp(Utc::now());
    let result = sqlx::query(
        "INSERT INTO pets (user_id, species, level, equipped, hatched_at) VALUES (?, ?, 1, 0, ?)",
    )
    .bind(user_id)
    .bind(species)
    .bind(&hatched_at)
    .execute(&mut *conn)
    .await?;

    Ok(PetModel {
        id: result.last_insert_rowid(),
        user_id,
        species: species.to_string(),
        level: 1,
        equipped: false,
        hatched_at,
    })
}

pub async fn list(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<PetModel>, SqlxError> {
    sqlx::query_as::<_, PetModel>(&format!(
        "SELECT {PET_COLUMNS} FROM pets WHERE user_id = ? ORDER BY equipped DESC, level DESC, id"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn equipped(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<PetModel>, SqlxError> {
    sqlx::query_as::<_, PetModel>(&format!(
        "SELECT {PET_COLUMNS} FROM pets WHERE user_id = ? AND equipped = 1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Finds a pet owned by the user
pub async fn find(
    conn: &mut SqliteConnection,
    user_id: i64,
    pet_id: i64,
) -> Result<Option<PetModel>, SqlxError> {
    sqlx::query_as::<_, PetModel>(&format!(
        "SELECT {PET_COLUMNS} FROM pets WHERE id = ? AND user_id = ?"
    ))
    .bind(pet_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn set_equipped(
    conn: &mut SqliteConnection,
    pet_id: i64,
    equipped: bool,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE pets SET equipped = ? WHERE id = ?")
        .bind(equipped)
        .bind(pet_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_level(
    conn: &mut SqliteConnection,
    pet_id: i64,
    level: i64,
) -> Result<(), SqlxError> {
    sqlx::query("UPDATE pets SET level = ? WHERE id = ?")
        .bind(level)
        .bind(pet_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, pet_id: i64) -> Result<(), SqlxError> {
    sqlx::query("DELETE FROM pets WHERE id = ?")
        .bind(pet_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

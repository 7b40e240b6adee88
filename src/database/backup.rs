use sqlx::{Error as SqlxError, SqlitePool};
use std::path::Path;

/// Writes a consistent copy of the live database to `target`.
pub async fn vacuum_into(pool: &SqlitePool, target: &Path) -> Result<(), SqlxError> {
    sqlx::query("VACUUM INTO ?")
        .bind(target.to_string_lossy().into_owned())
        .execute(pool)
        .await?;
    Ok(())
}

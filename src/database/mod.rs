pub mod backup;
pub mod blacklist;
pub mod boost;
pub mod inventory;
pub mod item;
pub mod models;
pub mod pet;
pub mod pity;
pub mod quest;
pub mod reward;
pub mod transaction;
pub mod user;

use crate::env;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    Error as SqlxError,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use std::str::FromStr;

pub use models::{
    ActiveBoostModel, BlacklistEntryModel, CurrencyTransactionModel, FumoStackModel,
    ItemStackModel, PetModel, RewardStateModel, UserModel,
};

/// Connects to the database and runs migrations
pub async fn connect() -> Result<SqlitePool, SqlxError> {
    let database_url = env::database_url()
        .map(|opt| opt.unwrap_or_else(|| env::DEFAULT_DATABASE_URL.to_string()))
        .map_err(|err| SqlxError::Configuration(err.to_string().into()))?;

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(url = %database_url, "database ready");
    Ok(pool)
}

/// Fixed-width UTC timestamps so stored values also sort as text.
pub fn timestamp(moment: DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

use super::{models::CurrencyTransactionModel, timestamp};
use chrono::Utc;
use sqlx::{Error as SqlxError, SqliteConnection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Coins,
    Gems,
}

impl Currency {
    pub fn db_name(self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Gems => "gems",
        }
    }
}

/// Inserts a new entry into the currency ledger
pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: i64,
    amount: i64,
    balance_after: i64,
    currency: Currency,
    kind: &str,
    context: Option<String>,
) -> Result<CurrencyTransactionModel, SqlxError> {
    let created_at = timestamp(Utc::now());

    let result = sqlx::query(
        "INSERT INTO currency_transactions \
        (user_id, amount, balance_after, currency, kind, context, created_at) \
        VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(amount)
    .bind(balance_after)
    .bind(currency.db_name())
    .bind(kind)
    .bind(context.as_deref())
    .bind(&created_at)
    .execute(&mut *conn)
    .await?;

    Ok(CurrencyTransactionModel {
        id: result.last_insert_rowid(),
        user_id,
        amount,
        balance_after,
        currency: currency.db_name().to_string(),
        kind: kind.to_string(),
        context,
        created_at,
    })
}

/// Returns the most recent transactions for a user, newest first
pub async fn list_recent_by_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    limit: i64,
) -> Result<Vec<CurrencyTransactionModel>, SqlxError> {
    let capped_limit = limit.clamp(1, 200);
    sqlx::query_as::<_, CurrencyTransactionModel>(
        "SELECT id, user_id, amount, balance_after, currency, kind, context, created_at \
        FROM currency_transactions \
        WHERE user_id = ? \
        ORDER BY id DESC \
        LIMIT ?",
    )
    .bind(user_id)
    .bind(capped_limit)
    .fetch_all(&mut *conn)
    .await
}

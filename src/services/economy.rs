use crate::{
    Error,
    database::{
        UserModel,
        transaction::{self, Currency},
        user,
    },
    error::GameError,
    game::item::Price,
};
use sqlx::SqliteConnection;

/// Takes `price` from the user and writes the ledger entry.
pub async fn charge(
    conn: &mut SqliteConnection,
    user: &UserModel,
    price: Price,
    kind: &str,
    context: Option<String>,
) -> Result<UserModel, Error> {
    let (coins, gems, currency, available) = match price {
        Price::Coins(amount) => (amount, 0, Currency::Coins, user.coins),
        Price::Gems(amount) => (0, amount, Currency::Gems, user.gems),
    };
    let needed = price.amount();

    if available < needed {
        return Err(match currency {
            Currency::Coins => GameError::NotEnoughCoins { needed, available },
            Currency::Gems => GameError::NotEnoughGems { needed, available },
        }
        .into());
    }

    let updated = user::adjust_balance(conn, user.id, -coins, -gems).await?;
    let balance_after = match currency {
        Currency::Coins => updated.coins,
        Currency::Gems => updated.gems,
    };
    transaction::insert(conn, user.id, -needed, balance_after, currency, kind, context).await?;

    Ok(updated)
}

/// Pays coins and gems, one ledger entry per non-zero currency.
pub async fn credit(
    conn: &mut SqliteConnection,
    user_id: i64,
    coins: i64,
    gems: i64,
    kind: &str,
    context: Option<String>,
) -> Result<UserModel, Error> {
    let updated = user::adjust_balance(conn, user_id, coins, gems).await?;

    if coins != 0 {
        transaction::insert(
            conn,
            user_id,
            coins,
            updated.coins,
            Currency::Coins,
            kind,
            context.clone(),
        )
        .await?;
    }
    if gems != 0 {
        transaction::insert(conn, user_id, gems, updated.gems, Currency::Gems, kind, context)
            .await?;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn charge_refuses_without_funds() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let user = user::get_or_create(&mut conn, 5).await.unwrap();

        let err = charge(&mut conn, &user, Price::Gems(10), "test", None)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::NotEnoughGems {
                needed: 10,
                available: 0
            })
        );
    }

    #[tokio::test]
    async fn every_change_is_in_the_ledger() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let user = user::get_or_create(&mut conn, 6).await.unwrap();

        let user = credit(&mut conn, user.id, 500, 7, "gift", None).await.unwrap();
        let user = charge(&mut conn, &user, Price::Coins(200), "spend", None)
            .await
            .unwrap();
        assert_eq!((user.coins, user.gems), (300, 7));

        let ledger = transaction::list_recent_by_user(&mut conn, user.id, 10)
            .await
            .unwrap();
        let entries: Vec<(i64, i64, &str)> = ledger
            .iter()
            .map(|row| (row.amount, row.balance_after, row.currency.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![(-200, 300, "coins"), (7, 7, "gems"), (500, 500, "coins")]
        );
    }
}

use crate::{
    Error,
    database::{self, FumoStackModel, UserModel},
    error::GameError,
    game::{Rarity, Variant, catalog, quest::Objective},
    services::{economy, quests},
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(Clone, Debug, PartialEq)]
pub struct Sale {
    pub user: UserModel,
    pub sold: i64,
    pub coins: i64,
}

pub fn unit_price(stack: &FumoStackModel) -> i64 {
    stack.rarity().sell_price() * stack.variant().multiplier()
}

pub async fn list(pool: &SqlitePool, discord_id: i64) -> Result<Vec<FumoStackModel>, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    Ok(database::inventory::list(&mut conn, user.id).await?)
}

/// Sells spare copies of one stack.
pub async fn sell(
    pool: &SqlitePool,
    discord_id: i64,
    name: &str,
    variant: Variant,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<Sale, Error> {
    let def = catalog::find(name).ok_or_else(|| GameError::UnknownFumo(name.to_string()))?;

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let stack = database::inventory::find(&mut tx, user.id, def.name, variant).await?;
    let available = stack.as_ref().map(FumoStackModel::spare).unwrap_or(0);
    if amount <= 0 {
        return Err(GameError::InvalidAmount {
            min: 1,
            max: available.max(1),
        }
        .into());
    }
    let Some(stack) = stack.filter(|_| available >= amount) else {
        return Err(GameError::NotEnoughFumos {
            name: format!("{}{}", def.name, variant.tag()),
            available,
        }
        .into());
    };

    let coins = unit_price(&stack)
        .checked_mul(amount)
        .ok_or(GameError::InvalidAmount {
            min: 1,
            max: available,
        })?;
    database::inventory::remove(&mut tx, stack.id, amount).await?;
    let user = economy::credit(
        &mut tx,
        user.id,
        coins,
        0,
        "sell",
        Some(format!("{amount}x {}", stack.display_name())),
    )
    .await?;
    quests::record(&mut tx, user.id, Objective::Sell, amount, now).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, fumo = %stack.display_name(), amount, coins, "sold fumos");
    Ok(Sale {
        user,
        sold: amount,
        coins,
    })
}

/// Spare normal copies of a rarity, as (stacks, copies, coins).
pub async fn preview_rarity(
    pool: &SqlitePool,
    discord_id: i64,
    rarity: Rarity,
) -> Result<(usize, i64, i64), Error> {
    let stacks = list(pool, discord_id).await?;
    let sellable: Vec<&FumoStackModel> = stacks
        .iter()
        .filter(|stack| sellable_in_bulk(stack, rarity))
        .collect();
    Ok((
        sellable.len(),
        sellable.iter().map(|stack| stack.spare()).sum(),
        sellable
            .iter()
            .map(|stack| unit_price(stack).saturating_mul(stack.spare()))
            .sum(),
    ))
}

fn sellable_in_bulk(stack: &FumoStackModel, rarity: Rarity) -> bool {
    stack.rarity() == rarity && stack.variant() == Variant::Normal && stack.spare() > 0
}

/// Sells every spare normal copy of a rarity.
pub async fn sell_rarity(
    pool: &SqlitePool,
    discord_id: i64,
    rarity: Rarity,
    now: DateTime<Utc>,
) -> Result<Sale, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let stacks = database::inventory::list(&mut tx, user.id).await?;

    let mut sold = 0_i64;
    let mut coins = 0_i64;
    for stack in stacks.iter().filter(|stack| sellable_in_bulk(stack, rarity)) {
        let amount = stack.spare();
        database::inventory::remove(&mut tx, stack.id, amount).await?;
        sold += amount;
        coins = coins.saturating_add(unit_price(stack).saturating_mul(amount));
    }

    if sold == 0 {
        return Err(GameError::NotEnoughFumos {
            name: format!("{rarity} fumos"),
            available: 0,
        }
        .into());
    }

    let user = economy::credit(
        &mut tx,
        user.id,
        coins,
        0,
        "sell",
        Some(format!("{sold}x {rarity}")),
    )
    .await?;
    quests::record(&mut tx, user.id, Objective::Sell, sold, now).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, %rarity, sold, coins, "bulk sale");
    Ok(Sale { user, sold, coins })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    async fn seed(pool: &SqlitePool, discord_id: i64, stacks: &[(&str, Rarity, Variant, i64)]) {
        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, discord_id).await.unwrap();
        for (name, rarity, variant, quantity) in stacks {
            database::inventory::add(&mut conn, user.id, name, *rarity, *variant, *quantity)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn selling_pays_variant_prices() {
        let pool = test_pool().await;
        seed(&pool, 1, &[("Reimu", Rarity::Common, Variant::Shiny, 3)]).await;

        let sale = sell(&pool, 1, "reimu", Variant::Shiny, 2, Utc::now())
            .await
            .unwrap();
        assert_eq!(sale.coins, Rarity::Common.sell_price() * 2 * 2);
        assert_eq!(sale.user.coins, sale.coins);

        let stacks = list(&pool, 1).await.unwrap();
        assert_eq!(stacks[0].quantity, 1);
    }

    #[tokio::test]
    async fn farmed_copies_are_not_for_sale() {
        let pool = test_pool().await;
        seed(&pool, 2, &[("Reimu", Rarity::Common, Variant::Normal, 3)]).await;
        let stack = list(&pool, 2).await.unwrap().remove(0);
        let mut conn = pool.acquire().await.unwrap();
        database::inventory::set_farming(&mut conn, stack.id, 2).await.unwrap();
        drop(conn);

        let err = sell(&pool, 2, "Reimu", Variant::Normal, 2, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::NotEnoughFumos { available: 1, .. })
        ));
    }

    #[tokio::test]
    async fn bulk_sale_skips_variants() {
        let pool = test_pool().await;
        seed(
            &pool,
            3,
            &[
                ("Reimu", Rarity::Common, Variant::Normal, 4),
                ("Reimu", Rarity::Common, Variant::Golden, 1),
            ],
        )
        .await;

        let (stacks, copies, coins) = preview_rarity(&pool, 3, Rarity::Common).await.unwrap();
        assert_eq!((stacks, copies), (1, 4));

        let sale = sell_rarity(&pool, 3, Rarity::Common, Utc::now()).await.unwrap();
        assert_eq!((sale.sold, sale.coins), (4, coins));

        let left = list(&pool, 3).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].variant(), Variant::Golden);

        let err = sell_rarity(&pool, 3, Rarity::Common, Utc::now())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<GameError>().is_some());
    }
}

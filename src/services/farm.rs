use crate::{
    Error,
    database::{self, FumoStackModel, UserModel},
    error::GameError,
    game::{
        Factors, Variant, catalog,
        farm::{self, FarmedStack, Harvest, Rate},
        quest::Objective,
    },
    services::{boosts::BoostSources, economy, quests},
};
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone, Debug)]
pub struct FarmStatus {
    pub user: UserModel,
    pub stacks: Vec<FumoStackModel>,
    pub farming: i64,
    pub capacity: i64,
    pub rate: Rate,
    pub factors: Factors,
    pub pending: Harvest,
}

#[derive(Clone, Debug)]
pub struct Collected {
    pub user: UserModel,
    pub harvest: Harvest,
}

fn farmed(stacks: &[FumoStackModel]) -> Vec<FarmedStack> {
    stacks
        .iter()
        .map(|stack| FarmedStack {
            rarity: stack.rarity(),
            variant: stack.variant(),
            count: stack.farming,
        })
        .collect()
}

/// Current capacity including pet slots.
pub(crate) async fn capacity_of(
    conn: &mut SqliteConnection,
    user: &UserModel,
    now: DateTime<Utc>,
) -> Result<i64, Error> {
    let sources = BoostSources::load(conn, user.id, now).await?;
    Ok(farm::capacity(user.farm_slots, sources.extra_slots()))
}

pub(crate) async fn farming_count(conn: &mut SqliteConnection, user_id: i64) -> Result<i64, Error> {
    Ok(database::inventory::farming(conn, user_id)
        .await?
        .iter()
        .map(|stack| stack.farming)
        .sum())
}

/// Pays whatever accrued since the last collection and restarts the clock at `now`.
///
/// Every action that changes the farm rate calls this first.
pub(crate) async fn collect_in(
    conn: &mut SqliteConnection,
    user: &UserModel,
    now: DateTime<Utc>,
) -> Result<Collected, Error> {
    let Some(since) = user.last_collected_datetime() else {
        database::user::set_last_collected(conn, user.id, now).await?;
        let user = database::user::find_by_id(conn, user.id).await?;
        return Ok(Collected {
            user,
            harvest: Harvest::default(),
        });
    };

    let stacks = database::inventory::farming(conn, user.id).await?;
    let rate = Rate::of(&farmed(&stacks));
    let sources = BoostSources::load(conn, user.id, since).await?;
    let harvest = farm::harvest(rate, since, now, |at| sources.factors_at(at));

    database::user::set_last_collected(conn, user.id, now).await?;
    let user = if harvest.coins > 0 || harvest.gems > 0 {
        economy::credit(
            conn,
            user.id,
            harvest.coins,
            harvest.gems,
            "farm_collect",
            Some(format!("{} minutes", harvest.minutes)),
        )
        .await?
    } else {
        database::user::find_by_id(conn, user.id).await?
    };
    database::boost::purge_expired(conn, user.id, now).await?;

    Ok(Collected { user, harvest })
}

pub async fn status(
    pool: &SqlitePool,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<FarmStatus, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    let stacks = database::inventory::farming(&mut conn, user.id).await?;
    let rate = Rate::of(&farmed(&stacks));

    let current = BoostSources::load(&mut conn, user.id, now).await?;
    let pending = match user.last_collected_datetime() {
        Some(since) => {
            let sources = BoostSources::load(&mut conn, user.id, since).await?;
            farm::harvest(rate, since, now, |at| sources.factors_at(at))
        }
        None => Harvest::default(),
    };

    Ok(FarmStatus {
        capacity: farm::capacity(user.farm_slots, current.extra_slots()),
        farming: stacks.iter().map(|stack| stack.farming).sum(),
        factors: current.factors_at(now),
        user,
        stacks,
        rate,
        pending,
    })
}

pub async fn collect(
    pool: &SqlitePool,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<Collected, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let collected = collect_in(&mut tx, &user, now).await?;
    quests::record(&mut tx, user.id, Objective::Collect, 1, now).await?;
    tx.commit().await?;

    tracing::debug!(
        discord_id,
        coins = collected.harvest.coins,
        gems = collected.harvest.gems,
        "farm collected"
    );
    Ok(collected)
}

async fn owned_stack(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    variant: Variant,
) -> Result<FumoStackModel, Error> {
    let def = catalog::find(name).ok_or_else(|| GameError::UnknownFumo(name.to_string()))?;
    let stack = database::inventory::find(conn, user_id, def.name, variant).await?;
    stack.ok_or_else(|| {
        GameError::NotEnoughFumos {
            name: format!("{}{}", def.name, variant.tag()),
            available: 0,
        }
        .into()
    })
}

/// Places spare copies in the farm.
pub async fn add(
    pool: &SqlitePool,
    discord_id: i64,
    name: &str,
    variant: Variant,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<FumoStackModel, Error> {
    if amount <= 0 {
        return Err(GameError::InvalidAmount {
            min: 1,
            max: farm::MAX_FARM_SLOTS,
        }
        .into());
    }

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let stack = owned_stack(&mut tx, user.id, name, variant).await?;
    if stack.spare() < amount {
        return Err(GameError::NotEnoughFumos {
            name: stack.display_name(),
            available: stack.spare(),
        }
        .into());
    }

    let capacity = capacity_of(&mut tx, &user, now).await?;
    let farming = farming_count(&mut tx, user.id).await?;
    if farming + amount > capacity {
        return Err(GameError::FarmFull { capacity }.into());
    }

    collect_in(&mut tx, &user, now).await?;
    database::inventory::set_farming(&mut tx, stack.id, stack.farming + amount).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, fumo = %stack.display_name(), amount, "added to farm");
    Ok(FumoStackModel {
        farming: stack.farming + amount,
        ..stack
    })
}

/// Takes copies out of the farm.
pub async fn remove(
    pool: &SqlitePool,
    discord_id: i64,
    name: &str,
    variant: Variant,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<FumoStackModel, Error> {
    if amount <= 0 {
        return Err(GameError::InvalidAmount {
            min: 1,
            max: farm::MAX_FARM_SLOTS,
        }
        .into());
    }

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let stack = owned_stack(&mut tx, user.id, name, variant).await?;
    if stack.farming < amount {
        return Err(GameError::NotFarming {
            name: stack.display_name(),
            farming: stack.farming,
        }
        .into());
    }

    collect_in(&mut tx, &user, now).await?;
    database::inventory::set_farming(&mut tx, stack.id, stack.farming - amount).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, fumo = %stack.display_name(), amount, "removed from farm");
    Ok(FumoStackModel {
        farming: stack.farming - amount,
        ..stack
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::test_pool,
        game::{
            BoostKind, BoostStack, Rarity, farm::BASE_FARM_SLOTS, item::Item, season::Season,
            weather,
        },
        services::shop,
    };
    use chrono::{Duration, TimeZone};

    /// Weather and season factors plus a coin potion running until `potion_until`.
    fn factors_with_potion(
        at: DateTime<Utc>,
        percent: f64,
        potion_until: DateTime<Utc>,
    ) -> Factors {
        let mut stack = BoostStack::new();
        if at < potion_until {
            stack.add_percent(BoostKind::Coin, percent);
        }
        stack
            .apply_factors(weather::weather_at(at).factors())
            .apply_factors(Season::of(at).factors());
        stack.resolve()
    }

    fn reimu_rate(count: i64) -> Rate {
        Rate::of(&[FarmedStack {
            rarity: Rarity::Common,
            variant: Variant::Normal,
            count,
        }])
    }

    async fn seed(pool: &SqlitePool, discord_id: i64, name: &str, rarity: Rarity, quantity: i64) {
        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, discord_id).await.unwrap();
        database::inventory::add(&mut conn, user.id, name, rarity, Variant::Normal, quantity)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn first_collection_only_starts_the_clock() {
        let pool = test_pool().await;
        let now = Utc::now();
        let collected = collect(&pool, 1, now).await.unwrap();
        assert_eq!(collected.harvest, Harvest::default());
        assert_eq!(
            collected.user.last_collected_datetime().map(|at| at.timestamp()),
            Some(now.timestamp())
        );
    }

    #[tokio::test]
    async fn farm_respects_capacity_and_spare_copies() {
        let pool = test_pool().await;
        let now = Utc::now();
        seed(&pool, 2, "Reimu", Rarity::Common, 10).await;

        let stack = add(&pool, 2, "reimu", Variant::Normal, 4, now).await.unwrap();
        assert_eq!(stack.farming, 4);

        let err = add(&pool, 2, "Reimu", Variant::Normal, 2, now).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::FarmFull {
                capacity: BASE_FARM_SLOTS
            })
        );

        let err = remove(&pool, 2, "Reimu", Variant::Normal, 5, now).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::NotFarming { farming: 4, .. })
        ));

        let stack = remove(&pool, 2, "Reimu", Variant::Normal, 4, now).await.unwrap();
        assert_eq!(stack.farming, 0);
    }

    #[tokio::test]
    async fn collecting_pays_accrued_income() {
        let pool = test_pool().await;
        let start = Utc::now() - Duration::hours(2);
        seed(&pool, 3, "Reimu", Rarity::Common, 5).await;
        add(&pool, 3, "Reimu", Variant::Normal, 5, start).await.unwrap();

        let collected = collect(&pool, 3, start + Duration::hours(1)).await.unwrap();
        assert_eq!(collected.harvest.minutes, 60);
        assert!(collected.harvest.coins > 0);
        assert_eq!(collected.user.coins, collected.harvest.coins);

        let again = collect(&pool, 3, start + Duration::hours(1)).await.unwrap();
        assert_eq!(again.harvest.coins, 0);
    }

    #[tokio::test]
    async fn unknown_fumos_are_refused() {
        let pool = test_pool().await;
        let err = add(&pool, 4, "Nobody", Variant::Normal, 1, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::UnknownFumo("Nobody".into()))
        );
    }

    #[tokio::test]
    async fn potions_only_count_for_segments_they_cover() {
        let pool = test_pool().await;
        let start = Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0).unwrap();
        let potion_until = start + Duration::minutes(45);
        let end = start + Duration::hours(2);
        seed(&pool, 5, "Reimu", Rarity::Common, 5).await;
        add(&pool, 5, "Reimu", Variant::Normal, 5, start).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, 5).await.unwrap();
        database::boost::insert(
            &mut conn,
            user.id,
            BoostKind::Coin,
            25.0,
            "coin_potion",
            potion_until,
        )
        .await
        .unwrap();
        drop(conn);

        let collected = collect(&pool, 5, end).await.unwrap();
        let expected = farm::harvest(reimu_rate(5), start, end, |at| {
            factors_with_potion(at, 25.0, potion_until)
        });
        let without_potion = farm::harvest(reimu_rate(5), start, end, |at| {
            factors_with_potion(at, 0.0, start)
        });

        assert_eq!(collected.harvest, expected);
        assert_eq!(collected.harvest.minutes, 120);
        assert!(collected.harvest.coins > without_potion.coins);
        assert_eq!(collected.user.coins, expected.coins);
    }

    #[tokio::test]
    async fn using_a_potion_collects_at_the_old_rate_first() {
        let pool = test_pool().await;
        let start = Utc.with_ymd_and_hms(2026, 7, 10, 18, 0, 0).unwrap();
        let used_at = start + Duration::minutes(50);
        let end = used_at + Duration::minutes(70);
        seed(&pool, 6, "Reimu", Rarity::Common, 4).await;
        add(&pool, 6, "Reimu", Variant::Normal, 4, start).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, 6).await.unwrap();
        database::item::adjust(&mut conn, user.id, Item::CoinPotion, 1)
            .await
            .unwrap();
        drop(conn);

        shop::use_item(&pool, 6, Item::CoinPotion, used_at).await.unwrap();
        let collected = collect(&pool, 6, end).await.unwrap();

        let before = farm::harvest(reimu_rate(4), start, used_at, |at| {
            factors_with_potion(at, 0.0, start)
        });
        let after = farm::harvest(reimu_rate(4), used_at, end, |at| {
            factors_with_potion(at, 25.0, used_at + Duration::minutes(30))
        });

        assert_eq!(collected.harvest, after);
        assert_eq!(collected.user.coins, before.coins + after.coins);
    }
}

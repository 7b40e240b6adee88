use crate::{
    Error,
    database::{self, UserModel},
    error::GameError,
    game::{
        BoostKind, Rarity, Variant,
        gacha::{self, Gacha, MAX_BATCH, PityCounters, RolledFumo},
        item::Price,
        quest::Objective,
    },
    services::{boosts::BoostSources, economy, quests},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct RollSummary {
    pub rolls: Vec<RolledFumo>,
    pub user: UserModel,
    pub luck: f64,
    pub pity: PityCounters,
}

impl RollSummary {
    pub fn best(&self) -> Option<&RolledFumo> {
        self.rolls
            .iter()
            .max_by_key(|rolled| (rolled.rarity(), rolled.variant))
    }
}

#[derive(Clone, Debug)]
pub struct OddsReport {
    pub luck: f64,
    pub odds: Vec<(Rarity, f64)>,
    pub pity: PityCounters,
}

pub async fn roll<R: Rng + Send>(
    pool: &SqlitePool,
    discord_id: i64,
    count: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<RollSummary, Error> {
    if count == 0 || count > MAX_BATCH {
        return Err(GameError::InvalidAmount {
            min: 1,
            max: i64::from(MAX_BATCH),
        }
        .into());
    }
    let cost = gacha::batch_cost(count).ok_or(GameError::InvalidAmount {
        min: 1,
        max: i64::from(MAX_BATCH),
    })?;

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let user = economy::charge(
        &mut tx,
        &user,
        Price::Coins(cost),
        "gacha_roll",
        Some(format!("{count} rolls")),
    )
    .await?;

    let sources = BoostSources::load(&mut tx, user.id, now).await?;
    let luck = sources.stack_at(now).multiplier(BoostKind::Luck);
    let mut pity = database::pity::load(&mut tx, user.id).await?;

    let rolls = Gacha::new(luck).roll_many(rng, count, &mut pity);

    let mut grouped: BTreeMap<(&'static str, Variant), (Rarity, i64)> = BTreeMap::new();
    for rolled in &rolls {
        grouped
            .entry((rolled.fumo.name, rolled.variant))
            .or_insert((rolled.rarity(), 0))
            .1 += 1;
    }
    for ((name, variant), (rarity, quantity)) in grouped {
        database::inventory::add(&mut tx, user.id, name, rarity, variant, quantity).await?;
    }

    database::pity::save(&mut tx, user.id, &pity).await?;
    database::user::add_rolls(&mut tx, user.id, i64::from(count)).await?;
    quests::record(&mut tx, user.id, Objective::Roll, i64::from(count), now).await?;
    let user = database::user::find_by_id(&mut tx, user.id).await?;
    tx.commit().await?;

    if let Some(best) = rolls.iter().max_by_key(|rolled| rolled.rarity())
        && best.rarity() >= Rarity::Legendary
    {
        tracing::info!(
            discord_id,
            fumo = best.fumo.name,
            rarity = %best.rarity(),
            "rare pull"
        );
    }

    Ok(RollSummary {
        rolls,
        user,
        luck,
        pity,
    })
}

pub async fn odds(
    pool: &SqlitePool,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<OddsReport, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    let sources = BoostSources::load(&mut conn, user.id, now).await?;
    let luck = sources.stack_at(now).multiplier(BoostKind::Luck);
    let pity = database::pity::load(&mut conn, user.id).await?;

    Ok(OddsReport {
        luck,
        odds: Gacha::new(luck).odds(),
        pity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::test_pool, game::gacha::ROLL_COST};
    use rand::{SeedableRng, rngs::StdRng};

    async fn funded_user(pool: &SqlitePool, discord_id: i64, coins: i64) {
        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, discord_id).await.unwrap();
        database::user::adjust_balance(&mut conn, user.id, coins, 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rolling_charges_and_fills_inventory() {
        let pool = test_pool().await;
        funded_user(&pool, 1, 5_000).await;
        let mut rng = StdRng::seed_from_u64(123);

        let summary = roll(&pool, 1, 10, Utc::now(), &mut rng).await.unwrap();
        assert_eq!(summary.rolls.len(), 10);
        assert_eq!(summary.user.coins, 5_000 - 10 * ROLL_COST);
        assert_eq!(summary.user.total_rolls, 10);

        let mut conn = pool.acquire().await.unwrap();
        let owned: i64 = database::inventory::list(&mut conn, summary.user.id)
            .await
            .unwrap()
            .iter()
            .map(|stack| stack.quantity)
            .sum();
        assert_eq!(owned, 10);

        let saved = database::pity::load(&mut conn, summary.user.id).await.unwrap();
        assert_eq!(saved, summary.pity);
    }

    #[tokio::test]
    async fn broke_players_keep_their_state() {
        let pool = test_pool().await;
        funded_user(&pool, 2, 150).await;
        let mut rng = StdRng::seed_from_u64(1);

        let err = roll(&pool, 2, 2, Utc::now(), &mut rng).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::NotEnoughCoins {
                needed: 200,
                available: 150
            })
        );

        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, 2).await.unwrap();
        assert_eq!((user.coins, user.total_rolls), (150, 0));
    }

    #[tokio::test]
    async fn batch_size_is_bounded() {
        let pool = test_pool().await;
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0, MAX_BATCH + 1] {
            let err = roll(&pool, 3, count, Utc::now(), &mut rng).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<GameError>(),
                Some(GameError::InvalidAmount { .. })
            ));
        }
    }

    #[tokio::test]
    async fn rolls_advance_quests() {
        let pool = test_pool().await;
        funded_user(&pool, 4, 10_000).await;
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();

        roll(&pool, 4, 50, now, &mut rng).await.unwrap();
        let board = quests::board(&pool, 4, now).await.unwrap();
        let daily = board
            .iter()
            .find(|status| status.def.key == "daily_roll")
            .unwrap();
        assert!(daily.is_complete());
    }
}

use crate::{
    Error,
    config::RESET_TIME,
    database::{self, CurrencyTransactionModel, RewardStateModel, UserModel},
    error::GameError,
    functions::time,
    game::{gacha::PityCounters, reward::RewardKind},
    services::economy,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::SqlitePool;

#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    pub user: UserModel,
    pub pity: PityCounters,
    pub states: Vec<RewardStateModel>,
}

impl Wallet {
    pub fn state(&self, kind: RewardKind) -> Option<&RewardStateModel> {
        self.states
            .iter()
            .find(|state| state.reward_type == kind.db_name())
    }

    pub fn ready_at(&self, kind: RewardKind) -> Option<DateTime<Utc>> {
        self.state(kind).and_then(RewardStateModel::next_reset_datetime)
    }

    pub fn is_available(&self, kind: RewardKind, now: DateTime<Utc>) -> bool {
        is_available(self.state(kind), now)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Claimed {
    pub user: UserModel,
    pub coins: i64,
    pub gems: Option<i64>,
    pub next_reset: DateTime<Utc>,
}

pub fn is_available(state: Option<&RewardStateModel>, now: DateTime<Utc>) -> bool {
    state
        .and_then(RewardStateModel::next_reset_datetime)
        .is_none_or(|ready_at| now >= ready_at)
}

pub async fn wallet(pool: &SqlitePool, discord_id: i64) -> Result<Wallet, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    let pity = database::pity::load(&mut conn, user.id).await?;
    let states = database::reward::get_all(&mut conn, user.id).await?;
    Ok(Wallet { user, pity, states })
}

pub async fn claim<R: Rng + Send>(
    pool: &SqlitePool,
    discord_id: i64,
    kind: RewardKind,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Claimed, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let state = database::reward::get(&mut tx, user.id, kind.db_name()).await?;
    if !is_available(state.as_ref(), now) {
        return Err(GameError::RewardOnCooldown.into());
    }

    let (coins, gems) = kind.roll(rng);
    let user = economy::credit(
        &mut tx,
        user.id,
        coins,
        gems.unwrap_or(0),
        "reward",
        Some(kind.db_name().to_string()),
    )
    .await?;

    let next_reset = time::next_reset_from(now, kind.reset_period(), &RESET_TIME);
    database::reward::record_claim(&mut tx, user.id, kind.db_name(), now, next_reset).await?;
    tx.commit().await?;

    tracing::info!(discord_id, reward = kind.db_name(), coins, ?gems, "reward claimed");
    Ok(Claimed {
        user,
        coins,
        gems,
        next_reset,
    })
}

pub async fn history(
    pool: &SqlitePool,
    discord_id: i64,
    limit: i64,
) -> Result<Vec<CurrencyTransactionModel>, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    Ok(database::transaction::list_recent_by_user(&mut conn, user.id, limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use chrono::Duration;
    use rand::{SeedableRng, rngs::StdRng};

    #[tokio::test]
    async fn rewards_cool_down_until_the_next_reset() {
        let pool = test_pool().await;
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();

        let claimed = claim(&pool, 1, RewardKind::Daily, now, &mut rng).await.unwrap();
        assert!(claimed.next_reset > now);
        assert!(claimed.next_reset <= now + Duration::days(1));
        assert_eq!(claimed.user.coins, claimed.coins);

        let err = claim(&pool, 1, RewardKind::Daily, now, &mut rng)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::RewardOnCooldown)
        );

        let later = claimed.next_reset + Duration::seconds(1);
        claim(&pool, 1, RewardKind::Daily, later, &mut rng).await.unwrap();
        let wallet = wallet(&pool, 1).await.unwrap();
        assert_eq!(wallet.state(RewardKind::Daily).map(|s| s.total_claims), Some(2));
        assert!(wallet.is_available(RewardKind::Weekly, later));
    }

    #[tokio::test]
    async fn claims_show_up_in_history() {
        let pool = test_pool().await;
        let mut rng = StdRng::seed_from_u64(8);
        let claimed = claim(&pool, 2, RewardKind::Monthly, Utc::now(), &mut rng)
            .await
            .unwrap();

        let history = history(&pool, 2, 10).await.unwrap();
        let coins = history
            .iter()
            .find(|entry| entry.currency == "coins")
            .unwrap();
        assert_eq!(coins.amount, claimed.coins);
        assert_eq!(coins.kind, "reward");
        assert_eq!(history.len(), 1 + usize::from(claimed.gems.is_some()));
    }
}

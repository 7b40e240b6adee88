use crate::{
    Error,
    config::RESET_TIME,
    database::{self, UserModel},
    error::GameError,
    game::quest::{self, Cadence, Objective, QuestDef},
    services::economy,
};
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection, SqlitePool};

#[derive(Clone, Debug, PartialEq)]
pub struct QuestStatus {
    pub def: &'static QuestDef,
    pub period: String,
    pub progress: i64,
    pub claimed: bool,
}

impl QuestStatus {
    pub fn is_complete(&self) -> bool {
        self.progress >= self.def.target
    }
}

/// Advances every quest tracking `objective` in the current periods.
pub async fn record(
    conn: &mut SqliteConnection,
    user_id: i64,
    objective: Objective,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<(), SqlxError> {
    if amount <= 0 {
        return Ok(());
    }
    for def in quest::for_objective(objective) {
        let period = quest::period_key(def.cadence, now, &RESET_TIME);
        database::quest::advance(conn, user_id, def.key, &period, amount).await?;
    }
    Ok(())
}

pub async fn board(
    pool: &SqlitePool,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<QuestStatus>, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    let daily = quest::period_key(Cadence::Daily, now, &RESET_TIME);
    let weekly = quest::period_key(Cadence::Weekly, now, &RESET_TIME);
    let rows =
        database::quest::list_for_periods(&mut conn, user.id, &daily, &weekly).await?;

    Ok(quest::QUESTS
        .iter()
        .map(|def| {
            let period = match def.cadence {
                Cadence::Daily => daily.clone(),
                Cadence::Weekly => weekly.clone(),
            };
            let row = rows
                .iter()
                .find(|row| row.quest == def.key && row.period == period);
            QuestStatus {
                def,
                progress: row.map(|row| row.progress).unwrap_or(0),
                claimed: row.is_some_and(|row| row.claimed),
                period,
            }
        })
        .collect())
}

pub async fn claim(
    pool: &SqlitePool,
    discord_id: i64,
    key: &str,
    now: DateTime<Utc>,
) -> Result<(UserModel, &'static QuestDef), Error> {
    let def = quest::find(key).ok_or_else(|| GameError::UnknownQuest(key.to_string()))?;
    let period = quest::period_key(def.cadence, now, &RESET_TIME);

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let progress = database::quest::get(&mut tx, user.id, def.key, &period)
        .await?
        .map(|row| row.progress)
        .unwrap_or(0);

    if progress < def.target {
        return Err(GameError::QuestIncomplete {
            progress,
            target: def.target,
        }
        .into());
    }
    if !database::quest::mark_claimed(&mut tx, user.id, def.key, &period).await? {
        return Err(GameError::QuestClaimed.into());
    }

    let user = economy::credit(
        &mut tx,
        user.id,
        def.coins,
        def.gems,
        "quest_reward",
        Some(def.key.to_string()),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(discord_id, quest = def.key, "quest claimed");
    Ok((user, def))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn quests_pay_once_when_complete() {
        let pool = test_pool().await;
        let now = Utc::now();

        let err = claim(&pool, 77, "daily_collect", now).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::QuestIncomplete {
                progress: 0,
                target: 3
            })
        );

        {
            let mut conn = pool.acquire().await.unwrap();
            let user = database::user::get_or_create(&mut conn, 77).await.unwrap();
            record(&mut conn, user.id, Objective::Collect, 3, now)
                .await
                .unwrap();
        }

        let (user, def) = claim(&pool, 77, "daily_collect", now).await.unwrap();
        assert_eq!(user.coins, def.coins);

        let err = claim(&pool, 77, "daily_collect", now).await.unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::QuestClaimed));

        let board = board(&pool, 77, now).await.unwrap();
        let weekly = board
            .iter()
            .find(|status| status.def.key == "weekly_collect")
            .unwrap();
        assert_eq!(weekly.progress, 3);
        assert!(!weekly.claimed);
    }

    #[tokio::test]
    async fn unknown_quests_are_rejected() {
        let pool = test_pool().await;
        let err = claim(&pool, 1, "nope", Utc::now()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::UnknownQuest("nope".into()))
        );
    }
}

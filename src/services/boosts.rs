use crate::{
    database::{self, ActiveBoostModel},
    game::{
        BoostKind, BoostStack, Factors,
        pet::{self, EquippedPet},
        season::Season,
        weather,
    },
};
use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, SqliteConnection};

/// Everything that feeds a user's boost stack.
#[derive(Clone, Debug, Default)]
pub struct BoostSources {
    pub pets: Vec<EquippedPet>,
    pub potions: Vec<ActiveBoostModel>,
}

impl BoostSources {
    /// Loads equipped pets and the potions still running at `since`.
    pub async fn load(
        conn: &mut SqliteConnection,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Self, SqlxError> {
        let pets = database::pet::equipped(conn, user_id)
            .await?
            .into_iter()
            .filter_map(|row| {
                row.species().map(|species| EquippedPet {
                    species,
                    level: row.level,
                })
            })
            .collect();
        let potions = database::boost::active_at(conn, user_id, since).await?;

        Ok(Self { pets, potions })
    }

    pub fn stack_at(&self, at: DateTime<Utc>) -> BoostStack {
        let mut stack = BoostStack::new();
        pet::apply_pets(&mut stack, &self.pets);

        for potion in &self.potions {
            let running = potion.expires_datetime().is_some_and(|expires| expires > at);
            if let (true, Some(kind)) = (running, BoostKind::from_db_name(&potion.kind)) {
                stack.add_percent(kind, potion.percent);
            }
        }

        stack
            .apply_factors(weather::weather_at(at).factors())
            .apply_factors(Season::of(at).factors());
        stack
    }

    pub fn factors_at(&self, at: DateTime<Utc>) -> Factors {
        self.stack_at(at).resolve()
    }

    pub fn extra_slots(&self) -> i64 {
        pet::extra_slots(&self.pets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expired_potions_stop_counting() {
        let now = Utc::now();
        let sources = BoostSources {
            pets: Vec::new(),
            potions: vec![ActiveBoostModel {
                id: 1,
                user_id: 1,
                kind: "luck".into(),
                percent: 100.0,
                source: "luck_potion".into(),
                expires_at: database::timestamp(now + Duration::minutes(10)),
            }],
        };

        let neutral = BoostSources::default();
        let during = sources.stack_at(now);
        let after = sources.stack_at(now + Duration::minutes(20));

        assert!((during.percent(BoostKind::Luck) - 100.0).abs() < 1e-9);
        assert_eq!(after.percent(BoostKind::Luck), 0.0);
        assert_eq!(
            after.resolve(),
            neutral.stack_at(now + Duration::minutes(20)).resolve()
        );
    }
}

//! Daily, weekly and monthly coin rewards.

use crate::functions::time::ResetPeriod;
use rand::Rng;

pub const GEM_CHANCE: f64 = 0.20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardKind {
    Daily,
    Weekly,
    Monthly,
}

impl RewardKind {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn db_name(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_db_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.db_name() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn coin_range(self) -> (i64, i64) {
        match self {
            Self::Daily => (250, 400),
            Self::Weekly => (800, 1_400),
            Self::Monthly => (4_000, 6_000),
        }
    }

    pub fn gem_range(self) -> (i64, i64) {
        match self {
            Self::Daily => (1, 5),
            Self::Weekly => (5, 15),
            Self::Monthly => (20, 50),
        }
    }

    pub fn reset_period(self) -> ResetPeriod {
        match self {
            Self::Daily => ResetPeriod::Daily,
            Self::Weekly => ResetPeriod::Weekly,
            Self::Monthly => ResetPeriod::Monthly,
        }
    }

    /// Coins, plus gems when the bonus hits.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> (i64, Option<i64>) {
        let (min_coins, max_coins) = self.coin_range();
        let coins = rng.random_range(min_coins..=max_coins);
        let gems = rng.random_bool(GEM_CHANCE).then(|| {
            let (min_gems, max_gems) = self.gem_range();
            rng.random_range(min_gems..=max_gems)
        });
        (coins, gems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn payouts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut bonus = 0;
        for _ in 0..1_000 {
            for kind in RewardKind::ALL {
                let (coins, gems) = kind.roll(&mut rng);
                let (min, max) = kind.coin_range();
                assert!((min..=max).contains(&coins));
                if let Some(gems) = gems {
                    let (min, max) = kind.gem_range();
                    assert!((min..=max).contains(&gems));
                    bonus += 1;
                }
            }
        }
        assert!((400..800).contains(&bonus), "bonus hit {bonus} times out of 3000");
    }

    #[test]
    fn db_names_round_trip() {
        for kind in RewardKind::ALL {
            assert_eq!(RewardKind::from_db_name(kind.db_name()), Some(kind));
        }
    }
}

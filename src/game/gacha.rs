//! Luck-weighted rarity rolls with pity.

use super::{
    catalog::{self, FumoDef},
    rarity::{Rarity, Variant},
};
use rand::Rng;
use std::collections::BTreeMap;

pub const ROLL_COST: i64 = 100;
pub const MAX_BATCH: u32 = 100;

/// Guarantees a rarity at or above `floor` once `threshold` rolls pass without one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PityTrack {
    pub key: &'static str,
    pub floor: Rarity,
    pub threshold: u32,
}

pub const PITY_TRACKS: &[PityTrack] = &[
    PityTrack {
        key: "legendary",
        floor: Rarity::Legendary,
        threshold: 150,
    },
    PityTrack {
        key: "astral",
        floor: Rarity::Astral,
        threshold: 10_000,
    },
];

/// Rolls since the last hit, per pity track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PityCounters {
    counts: BTreeMap<String, u32>,
}

impl PityCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, track: &str) -> u32 {
        self.counts.get(track).copied().unwrap_or(0)
    }

    pub fn set(&mut self, track: &str, count: u32) {
        self.counts.insert(track.to_string(), count);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(track, count)| (track.as_str(), *count))
    }

    fn record(&mut self, tracks: &[PityTrack], rarity: Rarity) {
        for track in tracks {
            let next = if rarity >= track.floor {
                0
            } else {
                self.get(track.key).saturating_add(1)
            };
            self.set(track.key, next);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RolledFumo {
    pub fumo: &'static FumoDef,
    pub variant: Variant,
    /// Set when a pity floor forced this roll.
    pub pity: Option<Rarity>,
}

impl RolledFumo {
    pub fn rarity(&self) -> Rarity {
        self.fumo.rarity
    }
}

pub struct Gacha<'a> {
    luck: f64,
    tracks: &'a [PityTrack],
}

impl<'a> Gacha<'a> {
    pub fn new(luck: f64) -> Self {
        Self::with_tracks(luck, PITY_TRACKS)
    }

    pub fn with_tracks(luck: f64, tracks: &'a [PityTrack]) -> Self {
        Self {
            luck: if luck.is_finite() { luck.max(1.0) } else { 1.0 },
            tracks,
        }
    }

    pub fn luck(&self) -> f64 {
        self.luck
    }

    /// Luck-adjusted weights of every rarity at or above `floor`.
    pub fn weights(&self, floor: Rarity) -> Vec<(Rarity, f64)> {
        Rarity::ALL
            .into_iter()
            .filter(|rarity| *rarity >= floor)
            .map(|rarity| {
                let boost = if rarity.is_luck_affected() { self.luck } else { 1.0 };
                (rarity, rarity.base_weight() * boost)
            })
            .collect()
    }

    /// Probability of each rarity in percent, without pity.
    pub fn odds(&self) -> Vec<(Rarity, f64)> {
        let weights = self.weights(Rarity::Common);
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        weights
            .into_iter()
            .map(|(rarity, weight)| (rarity, weight / total * 100.0))
            .collect()
    }

    /// The floor forced on the next roll, if any pity track is due.
    pub fn forced_floor(&self, pity: &PityCounters) -> Option<Rarity> {
        self.tracks
            .iter()
            .filter(|track| pity.get(track.key).saturating_add(1) >= track.threshold)
            .map(|track| track.floor)
            .max()
    }

    pub fn roll_rarity<R: Rng + ?Sized>(&self, rng: &mut R, floor: Rarity) -> Rarity {
        let weights = self.weights(floor);
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        let mut target = rng.random::<f64>() * total;

        for (rarity, weight) in &weights {
            if target < *weight {
                return *rarity;
            }
            target -= weight;
        }

        // float residue lands on the last tier
        weights.last().map(|(rarity, _)| *rarity).unwrap_or(floor)
    }

    pub fn roll_one<R: Rng + ?Sized>(&self, rng: &mut R, pity: &mut PityCounters) -> RolledFumo {
        let forced = self.forced_floor(pity);
        let rarity = self.roll_rarity(rng, forced.unwrap_or(Rarity::Common));
        pity.record(self.tracks, rarity);

        RolledFumo {
            fumo: catalog::pick(rarity, rng),
            variant: roll_variant(rng),
            pity: forced,
        }
    }

    pub fn roll_many<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: u32,
        pity: &mut PityCounters,
    ) -> Vec<RolledFumo> {
        (0..count).map(|_| self.roll_one(rng, pity)).collect()
    }
}

pub fn roll_variant<R: Rng + ?Sized>(rng: &mut R) -> Variant {
    if rng.random_ratio(1, Variant::Golden.odds()) {
        Variant::Golden
    } else if rng.random_ratio(1, Variant::Shiny.odds()) {
        Variant::Shiny
    } else {
        Variant::Normal
    }
}

/// Total coin cost of a batch, `None` on overflow.
pub fn batch_cost(count: u32) -> Option<i64> {
    ROLL_COST.checked_mul(i64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn odds_sum_to_one_hundred() {
        for luck in [1.0, 2.5, 50.0] {
            let total: f64 = Gacha::new(luck).odds().iter().map(|(_, odds)| odds).sum();
            assert!((total - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn luck_raises_rare_odds_only_relatively() {
        let plain = Gacha::new(1.0).odds();
        let lucky = Gacha::new(3.0).odds();
        let common = |odds: &[(Rarity, f64)]| odds[0].1;
        let legendary = |odds: &[(Rarity, f64)]| odds[5].1;
        assert!(common(&lucky) < common(&plain));
        assert!(legendary(&lucky) > legendary(&plain));
    }

    #[test]
    fn luck_below_one_is_ignored() {
        assert_eq!(Gacha::new(0.2).luck(), 1.0);
        assert_eq!(Gacha::new(f64::NAN).luck(), 1.0);
    }

    #[test]
    fn floor_restricts_rolls() {
        let gacha = Gacha::new(1.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!(gacha.roll_rarity(&mut rng, Rarity::Legendary) >= Rarity::Legendary);
        }
    }

    #[test]
    fn pity_forces_floor_on_threshold_roll() {
        let tracks = [PityTrack {
            key: "test",
            floor: Rarity::Transcendent,
            threshold: 5,
        }];
        let gacha = Gacha::with_tracks(1.0, &tracks);
        let mut pity = PityCounters::new();
        pity.set("test", 3);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(gacha.forced_floor(&pity), None);
        pity.set("test", 4);
        assert_eq!(gacha.forced_floor(&pity), Some(Rarity::Transcendent));

        let rolled = gacha.roll_one(&mut rng, &mut pity);
        assert_eq!(rolled.rarity(), Rarity::Transcendent);
        assert_eq!(rolled.pity, Some(Rarity::Transcendent));
        assert_eq!(pity.get("test"), 0);
    }

    #[test]
    fn misses_increment_and_hits_reset() {
        let tracks = [PityTrack {
            key: "test",
            floor: Rarity::Uncommon,
            threshold: 1_000,
        }];
        let gacha = Gacha::with_tracks(1.0, &tracks);
        let mut pity = PityCounters::new();
        let mut rng = StdRng::seed_from_u64(9);

        let mut expected = 0;
        for rolled in gacha.roll_many(&mut rng, 200, &mut pity.clone()) {
            expected = if rolled.rarity() >= Rarity::Uncommon { 0 } else { expected + 1 };
        }
        let mut rng = StdRng::seed_from_u64(9);
        gacha.roll_many(&mut rng, 200, &mut pity);
        assert_eq!(pity.get("test"), expected);
    }

    #[test]
    fn a_thousand_rolls_hit_legendary_pity() {
        let gacha = Gacha::new(1.0);
        let mut pity = PityCounters::new();
        let mut rng = StdRng::seed_from_u64(3);
        let rolls = gacha.roll_many(&mut rng, 1_000, &mut pity);

        let mut since_hit = 0;
        for rolled in &rolls {
            if rolled.rarity() >= Rarity::Legendary {
                since_hit = 0;
            } else {
                since_hit += 1;
            }
            assert!(since_hit < 150);
        }
    }

    #[test]
    fn batch_cost_scales() {
        assert_eq!(batch_cost(10), Some(1_000));
        assert_eq!(batch_cost(MAX_BATCH), Some(10_000));
    }
}

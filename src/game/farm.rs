//! Farm income accrual.

use super::{
    boost::Factors,
    rarity::{Rarity, Variant},
    weather,
};
use chrono::{DateTime, Duration, Utc};

pub const BASE_FARM_SLOTS: i64 = 5;
pub const MAX_FARM_SLOTS: i64 = 30;
pub const MAX_ACCRUAL_HOURS: i64 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarmedStack {
    pub rarity: Rarity,
    pub variant: Variant,
    pub count: i64,
}

/// Base income per minute before any multiplier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rate {
    pub coins: i64,
    pub gems: i64,
}

impl Rate {
    pub fn of(stacks: &[FarmedStack]) -> Self {
        stacks.iter().fold(Self::default(), |rate, stack| {
            let (coins, gems) = stack.rarity.farm_income();
            let scale = stack.variant.multiplier() * stack.count.max(0);
            Self {
                coins: rate.coins + coins * scale,
                gems: rate.gems + gems * scale,
            }
        })
    }

    pub fn is_zero(&self) -> bool {
        self.coins == 0 && self.gems == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Harvest {
    pub coins: i64,
    pub gems: i64,
    pub minutes: i64,
    /// The accrual window was longer than the cap.
    pub capped: bool,
}

pub fn capacity(farm_slots: i64, pet_slots: i64) -> i64 {
    farm_slots.clamp(0, MAX_FARM_SLOTS) + pet_slots.max(0)
}

/// Integrates `rate` over `[from, to)`, one weather slot at a time.
///
/// `factors_at` returns the coin/gem multipliers active at the start of a segment.
pub fn harvest<F>(rate: Rate, from: DateTime<Utc>, to: DateTime<Utc>, factors_at: F) -> Harvest
where
    F: Fn(DateTime<Utc>) -> Factors,
{
    if to <= from {
        return Harvest::default();
    }

    let earliest = to - Duration::hours(MAX_ACCRUAL_HOURS);
    let capped = from < earliest;
    let start = from.max(earliest);

    let mut coins = 0.0_f64;
    let mut gems = 0.0_f64;
    for (segment_start, segment_end) in weather::segments(start, to) {
        let minutes = (segment_end - segment_start).num_seconds() as f64 / 60.0;
        let factors = factors_at(segment_start);
        coins += rate.coins as f64 * minutes * factors.coins;
        gems += rate.gems as f64 * minutes * factors.gems;
    }

    Harvest {
        coins: coins.floor() as i64,
        gems: gems.floor() as i64,
        minutes: (to - start).num_minutes(),
        capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stack(rarity: Rarity, variant: Variant, count: i64) -> FarmedStack {
        FarmedStack {
            rarity,
            variant,
            count,
        }
    }

    #[test]
    fn rate_sums_stacks_with_variants() {
        let rate = Rate::of(&[
            stack(Rarity::Common, Variant::Normal, 3),
            stack(Rarity::Epic, Variant::Shiny, 1),
        ]);
        assert_eq!(rate, Rate { coins: 3 + 16, gems: 2 });
    }

    #[test]
    fn neutral_harvest_is_rate_times_minutes() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 7, 0).unwrap();
        let to = from + Duration::minutes(100);
        let harvest = harvest(Rate { coins: 3, gems: 1 }, from, to, |_| Factors::NEUTRAL);
        assert_eq!(harvest.coins, 300);
        assert_eq!(harvest.gems, 100);
        assert_eq!(harvest.minutes, 100);
        assert!(!harvest.capped);
    }

    #[test]
    fn factors_apply_per_segment() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let boundary = from + Duration::minutes(15);
        let to = from + Duration::minutes(30);
        let harvest = harvest(Rate { coins: 10, gems: 0 }, from, to, |at| {
            if at < boundary {
                Factors::new(2.0, 1.0, 1.0)
            } else {
                Factors::NEUTRAL
            }
        });
        assert_eq!(harvest.coins, 10 * 15 * 2 + 10 * 15);
    }

    #[test]
    fn accrual_is_capped() {
        let to = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let from = to - Duration::days(3);
        let harvest = harvest(Rate { coins: 1, gems: 0 }, from, to, |_| Factors::NEUTRAL);
        assert!(harvest.capped);
        assert_eq!(harvest.minutes, MAX_ACCRUAL_HOURS * 60);
        assert_eq!(harvest.coins, MAX_ACCRUAL_HOURS * 60);
    }

    #[test]
    fn reversed_window_yields_nothing() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let harvest = harvest(Rate { coins: 5, gems: 5 }, now, now - Duration::minutes(5), |_| {
            Factors::NEUTRAL
        });
        assert_eq!(harvest, Harvest::default());
    }

    #[test]
    fn capacity_adds_pet_slots() {
        assert_eq!(capacity(5, 2), 7);
        assert_eq!(capacity(99, 0), MAX_FARM_SLOTS);
    }
}

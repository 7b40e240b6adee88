use crate::functions::time::{ResetPeriod, ResetTime};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }

    pub fn reset_period(self) -> ResetPeriod {
        match self {
            Self::Daily => ResetPeriod::Daily,
            Self::Weekly => ResetPeriod::Weekly,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Roll,
    Collect,
    Sell,
    Hatch,
    Purchase,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Roll => "Roll fumos",
            Self::Collect => "Collect your farm",
            Self::Sell => "Sell fumos",
            Self::Hatch => "Hatch eggs",
            Self::Purchase => "Buy shop items",
        };
        f.write_str(verb)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestDef {
    pub key: &'static str,
    pub cadence: Cadence,
    pub objective: Objective,
    pub target: i64,
    pub coins: i64,
    pub gems: i64,
}

impl QuestDef {
    pub fn describe(&self) -> String {
        format!("{} ({})", self.objective, self.target)
    }
}

const fn quest(
    key: &'static str,
    cadence: Cadence,
    objective: Objective,
    target: i64,
    coins: i64,
    gems: i64,
) -> QuestDef {
    QuestDef {
        key,
        cadence,
        objective,
        target,
        coins,
        gems,
    }
}

pub const QUESTS: &[QuestDef] = &[
    quest("daily_roll", Cadence::Daily, Objective::Roll, 50, 1_500, 10),
    quest("daily_collect", Cadence::Daily, Objective::Collect, 3, 800, 0),
    quest("daily_sell", Cadence::Daily, Objective::Sell, 20, 500, 5),
    quest("daily_purchase", Cadence::Daily, Objective::Purchase, 1, 300, 0),
    quest("weekly_roll", Cadence::Weekly, Objective::Roll, 500, 15_000, 100),
    quest("weekly_collect", Cadence::Weekly, Objective::Collect, 20, 8_000, 0),
    quest("weekly_sell", Cadence::Weekly, Objective::Sell, 200, 5_000, 25),
    quest("weekly_hatch", Cadence::Weekly, Objective::Hatch, 3, 0, 50),
];

pub fn find(key: &str) -> Option<&'static QuestDef> {
    let needle = key.trim();
    QUESTS.iter().find(|quest| quest.key.eq_ignore_ascii_case(needle))
}

pub fn for_objective(objective: Objective) -> impl Iterator<Item = &'static QuestDef> {
    QUESTS.iter().filter(move |quest| quest.objective == objective)
}

/// Local date of the daily window containing `now`.
pub fn shop_day(now: DateTime<Utc>, reset: &ResetTime) -> NaiveDate {
    let local = now.with_timezone(&reset.timezone_offset());
    let date = local.date_naive();
    if local.time() < reset.as_naive_time() {
        date - Duration::days(1)
    } else {
        date
    }
}

/// Identifies the reset window a quest's progress belongs to.
pub fn period_key(cadence: Cadence, now: DateTime<Utc>, reset: &ResetTime) -> String {
    let day = shop_day(now, reset);
    match cadence {
        Cadence::Daily => format!("d:{}", day.format("%Y-%m-%d")),
        Cadence::Weekly => {
            let week = day.iso_week();
            format!("w:{}-W{:02}", week.year(), week.week())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reset() -> ResetTime {
        ResetTime::brt(21, 0)
    }

    #[test]
    fn daily_key_rolls_over_at_reset() {
        // 21:00 BRT is 00:00 UTC
        let before = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        assert_eq!(period_key(Cadence::Daily, before, &reset()), "d:2026-10-17");
        assert_eq!(period_key(Cadence::Daily, after, &reset()), "d:2026-10-18");
    }

    #[test]
    fn weekly_key_uses_iso_week() {
        let moment = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        assert_eq!(period_key(Cadence::Weekly, moment, &reset()), "w:2026-W42");
    }

    #[test]
    fn every_objective_has_a_quest() {
        for objective in [
            Objective::Roll,
            Objective::Collect,
            Objective::Sell,
            Objective::Hatch,
            Objective::Purchase,
        ] {
            assert!(for_objective(objective).next().is_some());
        }
        assert_eq!(find("DAILY_ROLL").map(|quest| quest.target), Some(50));
    }
}

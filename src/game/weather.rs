//! Global weather, rolled deterministically per 15 minute slot.

use super::{boost::Factors, season::Season};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng, distr::weighted::WeightedIndex, rngs::StdRng};
use std::fmt;

pub const SLOT_MINUTES: i64 = 15;
pub const SECONDARY_CHANCE: f64 = 0.25;
const WEATHER_SEED: u64 = 0x5eed_f0e0_7a11_0b07;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    Sunny,
    Rain,
    Windy,
    Fog,
    Snow,
    Storm,
    GoldenHour,
    BloodMoon,
    Starfall,
}

impl Weather {
    pub const ALL: [Self; 10] = [
        Self::Clear,
        Self::Sunny,
        Self::Rain,
        Self::Windy,
        Self::Fog,
        Self::Snow,
        Self::Storm,
        Self::GoldenHour,
        Self::BloodMoon,
        Self::Starfall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "Clear Skies",
            Self::Sunny => "Sunny",
            Self::Rain => "Rain",
            Self::Windy => "Windy",
            Self::Fog => "Fog",
            Self::Snow => "Snow",
            Self::Storm => "Storm",
            Self::GoldenHour => "Golden Hour",
            Self::BloodMoon => "Blood Moon",
            Self::Starfall => "Starfall",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Clear => "🌤️",
            Self::Sunny => "☀️",
            Self::Rain => "🌧️",
            Self::Windy => "🍃",
            Self::Fog => "🌫️",
            Self::Snow => "❄️",
            Self::Storm => "⛈️",
            Self::GoldenHour => "🌅",
            Self::BloodMoon => "🌕",
            Self::Starfall => "🌠",
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            Self::Clear => 40.0,
            Self::Sunny => 15.0,
            Self::Rain => 15.0,
            Self::Windy => 10.0,
            Self::Fog => 8.0,
            Self::Snow => 6.0,
            Self::Storm => 4.0,
            Self::GoldenHour => 1.0,
            Self::BloodMoon => 0.7,
            Self::Starfall => 0.3,
        }
    }

    pub fn factors(self) -> Factors {
        match self {
            Self::Clear => Factors::NEUTRAL,
            Self::Sunny => Factors::new(1.3, 1.0, 1.0),
            Self::Rain => Factors::new(1.0, 1.3, 1.0),
            Self::Windy => Factors::new(1.1, 1.0, 1.1),
            Self::Fog => Factors::new(0.9, 1.0, 1.25),
            Self::Snow => Factors::new(0.8, 1.5, 1.0),
            Self::Storm => Factors::new(0.5, 2.0, 1.5),
            Self::GoldenHour => Factors::new(3.0, 2.0, 1.0),
            Self::BloodMoon => Factors::new(0.75, 1.0, 3.0),
            Self::Starfall => Factors::new(1.0, 3.0, 5.0),
        }
    }

    pub fn allowed_in(self, season: Season) -> bool {
        !(self == Self::Snow && season == Season::Summer)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

/// Extra effect when two specific weathers overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Combo {
    pub first: Weather,
    pub second: Weather,
    pub name: &'static str,
    pub factors: Factors,
}

pub const COMBOS: &[Combo] = &[
    Combo {
        first: Weather::Sunny,
        second: Weather::Rain,
        name: "🌈 Rainbow",
        factors: Factors::new(1.5, 1.5, 1.2),
    },
    Combo {
        first: Weather::Storm,
        second: Weather::BloodMoon,
        name: "🩸 Crimson Tempest",
        factors: Factors::new(1.0, 1.5, 2.0),
    },
    Combo {
        first: Weather::Snow,
        second: Weather::Starfall,
        name: "🌌 Aurora",
        factors: Factors::new(1.0, 2.0, 1.5),
    },
    Combo {
        first: Weather::Fog,
        second: Weather::GoldenHour,
        name: "✨ Gilded Mist",
        factors: Factors::new(2.0, 1.0, 1.0),
    },
    Combo {
        first: Weather::Windy,
        second: Weather::Rain,
        name: "🌀 Squall",
        factors: Factors::new(1.0, 1.25, 1.1),
    },
];

pub fn find_combo(a: Weather, b: Weather) -> Option<&'static Combo> {
    COMBOS
        .iter()
        .find(|combo| (combo.first == a && combo.second == b) || (combo.first == b && combo.second == a))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherState {
    pub slot: i64,
    pub season: Season,
    pub primary: Weather,
    pub secondary: Option<Weather>,
    pub combo: Option<&'static Combo>,
}

impl WeatherState {
    /// Combined factors of both weathers and the combo, without the season.
    pub fn factors(&self) -> Factors {
        let mut factors = self.primary.factors();
        if let Some(secondary) = self.secondary {
            factors = factors.combine(secondary.factors());
        }
        if let Some(combo) = self.combo {
            factors = factors.combine(combo.factors);
        }
        factors
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        slot_start(self.slot)
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        slot_start(self.slot + 1)
    }

    pub fn describe(&self) -> String {
        let mut text = self.primary.to_string();
        if let Some(secondary) = self.secondary {
            text.push_str(" + ");
            text.push_str(&secondary.to_string());
        }
        if let Some(combo) = self.combo {
            text.push_str(&format!(" ({})", combo.name));
        }
        text
    }
}

pub fn slot_of(moment: DateTime<Utc>) -> i64 {
    moment.timestamp().div_euclid(SLOT_MINUTES * 60)
}

pub fn slot_start(slot: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(slot * SLOT_MINUTES * 60, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn weather_at(moment: DateTime<Utc>) -> WeatherState {
    weather_for_slot(slot_of(moment))
}

pub fn weather_for_slot(slot: i64) -> WeatherState {
    let season = Season::of(slot_start(slot));
    let mut rng = StdRng::seed_from_u64(WEATHER_SEED ^ slot as u64);

    let primary = pick_weather(&mut rng, season, None);
    let secondary = if rng.random_bool(SECONDARY_CHANCE) {
        Some(pick_weather(&mut rng, season, Some(primary)))
    } else {
        None
    };
    let combo = secondary.and_then(|secondary| find_combo(primary, secondary));

    WeatherState {
        slot,
        season,
        primary,
        secondary,
        combo,
    }
}

/// Weather of the `count` slots following the one containing `from`.
pub fn forecast(from: DateTime<Utc>, count: usize) -> Vec<WeatherState> {
    let current = slot_of(from);
    (1..=count as i64)
        .map(|offset| weather_for_slot(current + offset))
        .collect()
}

/// Splits `[from, to)` at weather slot boundaries.
pub fn segments(from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut result = Vec::new();
    let mut cursor = from;
    while cursor < to {
        let boundary = slot_start(slot_of(cursor) + 1);
        let end = boundary.min(to);
        result.push((cursor, end));
        cursor = end;
    }
    result
}

pub fn slot_duration() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

fn pick_weather(rng: &mut StdRng, season: Season, exclude: Option<Weather>) -> Weather {
    let candidates: Vec<Weather> = Weather::ALL
        .into_iter()
        .filter(|weather| weather.allowed_in(season) && Some(*weather) != exclude)
        .collect();

    WeightedIndex::new(candidates.iter().map(|weather| weather.weight()))
        .map(|dist| candidates[rng.sample(&dist)])
        .unwrap_or(Weather::Clear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_slot_same_weather() {
        let moment = Utc.with_ymd_and_hms(2026, 10, 18, 12, 3, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 10, 18, 12, 14, 59).unwrap();
        assert_eq!(weather_at(moment), weather_at(later));
        assert_eq!(weather_at(moment).slot, slot_of(moment));
    }

    #[test]
    fn slot_bounds_are_fifteen_minutes() {
        let state = weather_at(Utc.with_ymd_and_hms(2026, 1, 1, 0, 20, 0).unwrap());
        assert_eq!(state.starts_at(), Utc.with_ymd_and_hms(2026, 1, 1, 0, 15, 0).unwrap());
        assert_eq!(state.ends_at() - state.starts_at(), slot_duration());
    }

    #[test]
    fn secondary_differs_from_primary_and_combos_match() {
        for slot in 0..5_000 {
            let state = weather_for_slot(slot);
            if let Some(secondary) = state.secondary {
                assert_ne!(secondary, state.primary);
            }
            if let Some(combo) = state.combo {
                let secondary = state.secondary.expect("combo without a secondary weather");
                assert_eq!(find_combo(state.primary, secondary), Some(combo));
            }
        }
    }

    #[test]
    fn no_snow_in_summer() {
        let summer = slot_of(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        for slot in summer..summer + 2_000 {
            let state = weather_for_slot(slot);
            assert_eq!(state.season, Season::Summer);
            assert_ne!(state.primary, Weather::Snow);
            assert_ne!(state.secondary, Some(Weather::Snow));
        }
    }

    #[test]
    fn combos_are_symmetric() {
        assert_eq!(
            find_combo(Weather::Rain, Weather::Sunny).map(|combo| combo.name),
            Some("🌈 Rainbow")
        );
        assert!(find_combo(Weather::Clear, Weather::Sunny).is_none());
    }

    #[test]
    fn combined_factors_multiply() {
        let state = WeatherState {
            slot: 0,
            season: Season::Spring,
            primary: Weather::Sunny,
            secondary: Some(Weather::Rain),
            combo: find_combo(Weather::Sunny, Weather::Rain),
        };
        let factors = state.factors();
        assert!((factors.coins - 1.3 * 1.5).abs() < 1e-9);
        assert!((factors.gems - 1.3 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn segments_split_on_boundaries() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 10, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 1, 1, 0, 50, 0).unwrap();
        let parts = segments(from, to);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].1, Utc.with_ymd_and_hms(2026, 1, 1, 0, 15, 0).unwrap());
        assert_eq!(parts[3], (Utc.with_ymd_and_hms(2026, 1, 1, 0, 45, 0).unwrap(), to));
        assert!(segments(to, from).is_empty());
    }

    #[test]
    fn forecast_covers_following_slots() {
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 3, 3, 3).unwrap();
        let upcoming = forecast(now, 4);
        assert_eq!(upcoming.len(), 4);
        assert_eq!(upcoming[0].slot, slot_of(now) + 1);
        assert_eq!(upcoming[3].slot, slot_of(now) + 4);
    }
}

//! Boost stacking.
//!
//! Percent sources (pets, potions) add up within a kind, factor sources (weather,
//! combos, seasons) multiply within a kind, and the two halves multiply together:
//! `(1 + Σ percent / 100) × Π factor`.

use std::fmt;

pub const MAX_LUCK: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostKind {
    Coin,
    Gem,
    Luck,
}

impl BoostKind {
    pub const ALL: [Self; 3] = [Self::Coin, Self::Gem, Self::Luck];

    pub fn db_name(self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::Gem => "gem",
            Self::Luck => "luck",
        }
    }

    pub fn from_db_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.db_name() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Coin => "Coins",
            Self::Gem => "Gems",
            Self::Luck => "Luck",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Coin => 0,
            Self::Gem => 1,
            Self::Luck => 2,
        }
    }
}

impl fmt::Display for BoostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multiplicative factors for each boost kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Factors {
    pub coins: f64,
    pub gems: f64,
    pub luck: f64,
}

impl Factors {
    pub const NEUTRAL: Self = Self {
        coins: 1.0,
        gems: 1.0,
        luck: 1.0,
    };

    pub const fn new(coins: f64, gems: f64, luck: f64) -> Self {
        Self { coins, gems, luck }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            coins: self.coins * other.coins,
            gems: self.gems * other.gems,
            luck: self.luck * other.luck,
        }
    }

    pub fn get(&self, kind: BoostKind) -> f64 {
        match kind {
            BoostKind::Coin => self.coins,
            BoostKind::Gem => self.gems,
            BoostKind::Luck => self.luck,
        }
    }
}

impl Default for Factors {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoostStack {
    percent: [f64; 3],
    factor: [f64; 3],
}

impl Default for BoostStack {
    fn default() -> Self {
        Self::new()
    }
}

impl BoostStack {
    pub fn new() -> Self {
        Self {
            percent: [0.0; 3],
            factor: [1.0; 3],
        }
    }

    pub fn add_percent(&mut self, kind: BoostKind, percent: f64) -> &mut Self {
        self.percent[kind.index()] += percent;
        self
    }

    pub fn multiply(&mut self, kind: BoostKind, factor: f64) -> &mut Self {
        self.factor[kind.index()] *= factor;
        self
    }

    pub fn apply_factors(&mut self, factors: Factors) -> &mut Self {
        for kind in BoostKind::ALL {
            self.multiply(kind, factors.get(kind));
        }
        self
    }

    pub fn percent(&self, kind: BoostKind) -> f64 {
        self.percent[kind.index()]
    }

    pub fn multiplier(&self, kind: BoostKind) -> f64 {
        let raw = (1.0 + self.percent[kind.index()] / 100.0).max(0.0) * self.factor[kind.index()];
        match kind {
            BoostKind::Luck => raw.clamp(1.0, MAX_LUCK),
            BoostKind::Coin | BoostKind::Gem => raw.max(0.0),
        }
    }

    /// Final multipliers of every kind.
    pub fn resolve(&self) -> Factors {
        Factors {
            coins: self.multiplier(BoostKind::Coin),
            gems: self.multiplier(BoostKind::Gem),
            luck: self.multiplier(BoostKind::Luck),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percents_add_and_factors_multiply() {
        let mut stack = BoostStack::new();
        stack
            .add_percent(BoostKind::Coin, 10.0)
            .add_percent(BoostKind::Coin, 15.0)
            .multiply(BoostKind::Coin, 2.0)
            .multiply(BoostKind::Coin, 1.5);

        assert!(close(stack.multiplier(BoostKind::Coin), 1.25 * 3.0));
        assert!(close(stack.multiplier(BoostKind::Gem), 1.0));
    }

    #[test]
    fn luck_is_clamped() {
        let mut stack = BoostStack::new();
        stack.multiply(BoostKind::Luck, 0.5);
        assert!(close(stack.multiplier(BoostKind::Luck), 1.0));

        stack.add_percent(BoostKind::Luck, 10_000.0);
        assert!(close(stack.multiplier(BoostKind::Luck), MAX_LUCK));
    }

    #[test]
    fn coins_never_go_negative() {
        let mut stack = BoostStack::new();
        stack.add_percent(BoostKind::Coin, -250.0);
        assert!(close(stack.multiplier(BoostKind::Coin), 0.0));
    }

    #[test]
    fn factors_apply_per_kind() {
        let mut stack = BoostStack::new();
        stack.apply_factors(Factors::new(2.0, 3.0, 4.0));
        let resolved = stack.resolve();
        assert!(close(resolved.coins, 2.0));
        assert!(close(resolved.gems, 3.0));
        assert!(close(resolved.luck, 4.0));
    }
}

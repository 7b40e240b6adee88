//! Rarity tiers shared by the gacha, inventory and farm.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Otherworldly,
    Legendary,
    Mythical,
    Exclusive,
    Mysterious,
    Astral,
    Celestial,
    Infinite,
    Transcendent,
}

impl Rarity {
    /// All tiers, from most to least common.
    pub const ALL: [Self; 13] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Otherworldly,
        Self::Legendary,
        Self::Mythical,
        Self::Exclusive,
        Self::Mysterious,
        Self::Astral,
        Self::Celestial,
        Self::Infinite,
        Self::Transcendent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Otherworldly => "Otherworldly",
            Self::Legendary => "Legendary",
            Self::Mythical => "Mythical",
            Self::Exclusive => "Exclusive",
            Self::Mysterious => "???",
            Self::Astral => "Astral",
            Self::Celestial => "Celestial",
            Self::Infinite => "Infinite",
            Self::Transcendent => "Transcendent",
        }
    }

    pub fn db_name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Otherworldly => "otherworldly",
            Self::Legendary => "legendary",
            Self::Mythical => "mythical",
            Self::Exclusive => "exclusive",
            Self::Mysterious => "mysterious",
            Self::Astral => "astral",
            Self::Celestial => "celestial",
            Self::Infinite => "infinite",
            Self::Transcendent => "transcendent",
        }
    }

    pub fn from_db_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rarity| rarity.db_name() == value)
    }

    /// Accepts either the stored name or the display name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL.into_iter().find(|rarity| {
            rarity.db_name().eq_ignore_ascii_case(needle) || rarity.name().eq_ignore_ascii_case(needle)
        })
    }

    /// Base drop weight in percent. The table sums to 100.
    pub fn base_weight(self) -> f64 {
        match self {
            Self::Common => 47.0,
            Self::Uncommon => 30.0,
            Self::Rare => 12.5,
            Self::Epic => 6.0,
            Self::Otherworldly => 2.5,
            Self::Legendary => 1.2,
            Self::Mythical => 0.6,
            Self::Exclusive => 0.15,
            Self::Mysterious => 0.04,
            Self::Astral => 0.008,
            Self::Celestial => 0.0015,
            Self::Infinite => 0.0004,
            Self::Transcendent => 0.0001,
        }
    }

    pub fn is_luck_affected(self) -> bool {
        self >= Self::Rare
    }

    /// Coins paid per copy of a normal variant.
    pub fn sell_price(self) -> i64 {
        match self {
            Self::Common => 5,
            Self::Uncommon => 15,
            Self::Rare => 50,
            Self::Epic => 200,
            Self::Otherworldly => 600,
            Self::Legendary => 2_000,
            Self::Mythical => 7_500,
            Self::Exclusive => 25_000,
            Self::Mysterious => 80_000,
            Self::Astral => 250_000,
            Self::Celestial => 1_000_000,
            Self::Infinite => 5_000_000,
            Self::Transcendent => 25_000_000,
        }
    }

    /// Farm income of one normal copy as (coins, gems) per minute.
    pub fn farm_income(self) -> (i64, i64) {
        match self {
            Self::Common => (1, 0),
            Self::Uncommon => (2, 0),
            Self::Rare => (4, 0),
            Self::Epic => (8, 1),
            Self::Otherworldly => (15, 1),
            Self::Legendary => (30, 2),
            Self::Mythical => (60, 4),
            Self::Exclusive => (120, 8),
            Self::Mysterious => (250, 15),
            Self::Astral => (500, 30),
            Self::Celestial => (1_000, 60),
            Self::Infinite => (2_500, 150),
            Self::Transcendent => (10_000, 500),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    Normal,
    Shiny,
    Golden,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Shiny, Self::Golden];

    pub fn db_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Shiny => "shiny",
            Self::Golden => "golden",
        }
    }

    pub fn from_db_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.db_name() == value)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.db_name().eq_ignore_ascii_case(needle))
    }

    /// Suffix appended to the fumo name when displayed.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Shiny => " [✨SHINY]",
            Self::Golden => " [🌟GOLDEN]",
        }
    }

    /// One in `odds` rolls lands on this variant.
    pub fn odds(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Shiny => 100,
            Self::Golden => 10_000,
        }
    }

    /// Applies to both sell price and farm income.
    pub fn multiplier(self) -> i64 {
        match self {
            Self::Normal => 1,
            Self::Shiny => 2,
            Self::Golden => 10,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.db_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        let total: f64 = Rarity::ALL.iter().map(|rarity| rarity.base_weight()).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn tiers_get_rarer_and_more_valuable() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].base_weight() > pair[1].base_weight());
            assert!(pair[0].sell_price() < pair[1].sell_price());
        }
    }

    #[test]
    fn parse_accepts_display_and_db_names() {
        assert_eq!(Rarity::parse("???"), Some(Rarity::Mysterious));
        assert_eq!(Rarity::parse("mysterious"), Some(Rarity::Mysterious));
        assert_eq!(Rarity::parse(" LEGENDARY "), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("ordinary"), None);
        assert_eq!(Variant::parse("Shiny"), Some(Variant::Shiny));
    }

    #[test]
    fn only_rare_and_above_feel_luck() {
        assert!(!Rarity::Common.is_luck_affected());
        assert!(!Rarity::Uncommon.is_luck_affected());
        assert!(Rarity::Rare.is_luck_affected());
        assert!(Rarity::Transcendent.is_luck_affected());
    }
}

use super::{boost::BoostKind, pet::Egg};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Price {
    Coins(i64),
    Gems(i64),
}

impl Price {
    pub fn amount(self) -> i64 {
        match self {
            Self::Coins(amount) | Self::Gems(amount) => amount,
        }
    }

    pub fn with_amount(self, amount: i64) -> Self {
        match self {
            Self::Coins(_) => Self::Coins(amount),
            Self::Gems(_) => Self::Gems(amount),
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            Self::Coins(_) => "coins",
            Self::Gems(_) => "gems",
        }
    }

    pub fn checked_mul(self, quantity: i64) -> Option<Self> {
        self.amount()
            .checked_mul(quantity)
            .map(|amount| self.with_amount(amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.currency())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemEffect {
    Boost {
        kind: BoostKind,
        percent: f64,
        minutes: i64,
    },
    LevelUpPet,
    ExpandFarm,
    Hatch(Egg),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    CoinPotion,
    GemPotion,
    LuckPotion,
    MegaLuckPotion,
    PetFood,
    FarmExpansion,
    CommonEgg,
    RareEgg,
    DivineEgg,
}

impl Item {
    pub const ALL: [Self; 9] = [
        Self::CoinPotion,
        Self::GemPotion,
        Self::LuckPotion,
        Self::MegaLuckPotion,
        Self::PetFood,
        Self::FarmExpansion,
        Self::CommonEgg,
        Self::RareEgg,
        Self::DivineEgg,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::CoinPotion => "coin_potion",
            Self::GemPotion => "gem_potion",
            Self::LuckPotion => "luck_potion",
            Self::MegaLuckPotion => "mega_luck_potion",
            Self::PetFood => "pet_food",
            Self::FarmExpansion => "farm_expansion",
            Self::CommonEgg => "common_egg",
            Self::RareEgg => "rare_egg",
            Self::DivineEgg => "divine_egg",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CoinPotion => "Coin Potion",
            Self::GemPotion => "Gem Potion",
            Self::LuckPotion => "Luck Potion",
            Self::MegaLuckPotion => "Mega Luck Potion",
            Self::PetFood => "Pet Food",
            Self::FarmExpansion => "Farm Expansion",
            Self::CommonEgg => "Common Egg",
            Self::RareEgg => "Rare Egg",
            Self::DivineEgg => "Divine Egg",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.key() == key)
    }

    /// Matches the key or the display name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL.into_iter().find(|item| {
            item.key().eq_ignore_ascii_case(needle) || item.name().eq_ignore_ascii_case(needle)
        })
    }

    pub fn price(self) -> Price {
        match self {
            Self::CoinPotion => Price::Coins(2_500),
            Self::GemPotion => Price::Coins(5_000),
            Self::LuckPotion => Price::Gems(40),
            Self::MegaLuckPotion => Price::Gems(250),
            Self::PetFood => Price::Coins(1_500),
            Self::FarmExpansion => Price::Gems(150),
            Self::CommonEgg => Price::Coins(1_000),
            Self::RareEgg => Price::Gems(50),
            Self::DivineEgg => Price::Gems(500),
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            Self::CoinPotion => ItemEffect::Boost {
                kind: BoostKind::Coin,
                percent: 25.0,
                minutes: 30,
            },
            Self::GemPotion => ItemEffect::Boost {
                kind: BoostKind::Gem,
                percent: 25.0,
                minutes: 30,
            },
            Self::LuckPotion => ItemEffect::Boost {
                kind: BoostKind::Luck,
                percent: 50.0,
                minutes: 30,
            },
            Self::MegaLuckPotion => ItemEffect::Boost {
                kind: BoostKind::Luck,
                percent: 200.0,
                minutes: 15,
            },
            Self::PetFood => ItemEffect::LevelUpPet,
            Self::FarmExpansion => ItemEffect::ExpandFarm,
            Self::CommonEgg => ItemEffect::Hatch(Egg::Common),
            Self::RareEgg => ItemEffect::Hatch(Egg::Rare),
            Self::DivineEgg => ItemEffect::Hatch(Egg::Divine),
        }
    }

    pub fn description(self) -> String {
        match self.effect() {
            ItemEffect::Boost {
                kind,
                percent,
                minutes,
            } => format!("+{percent:.0}% {} for {minutes} minutes", kind.label()),
            ItemEffect::LevelUpPet => "Raises a pet by one level".to_string(),
            ItemEffect::ExpandFarm => "Adds one permanent farm slot".to_string(),
            ItemEffect::Hatch(egg) => format!("Hatch it for a random pet ({})", egg.name()),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_and_parse_names() {
        for item in Item::ALL {
            assert_eq!(Item::from_key(item.key()), Some(item));
        }
        assert_eq!(Item::parse("mega luck potion"), Some(Item::MegaLuckPotion));
        assert_eq!(Item::parse("unknown"), None);
    }

    #[test]
    fn price_multiplication_checks_overflow() {
        assert_eq!(Price::Gems(50).checked_mul(3), Some(Price::Gems(150)));
        assert_eq!(Price::Coins(i64::MAX).checked_mul(2), None);
    }
}

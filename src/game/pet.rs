use super::boost::{BoostKind, BoostStack};
use rand::{Rng, distr::weighted::WeightedIndex};
use std::fmt;

pub const MAX_LEVEL: i64 = 50;
pub const MAX_EQUIPPED: usize = 3;
const POWER_PER_LEVEL: f64 = 0.05;
const LEVELS_PER_EXTRA_SLOT: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PetRarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl fmt::Display for PetRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythical => "Mythical",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ability {
    Boost(BoostKind),
    ExtraSlots,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Species {
    pub key: &'static str,
    pub name: &'static str,
    pub rarity: PetRarity,
    pub ability: Ability,
    /// Percent for boosts, slot count for extra slots.
    pub base_power: f64,
}

impl Species {
    /// Ability strength at a level; boosts grow 5% per level, slots every 10 levels.
    pub fn power(&self, level: i64) -> f64 {
        let level = level.clamp(1, MAX_LEVEL);
        match self.ability {
            Ability::Boost(_) => self.base_power * (1.0 + POWER_PER_LEVEL * (level - 1) as f64),
            Ability::ExtraSlots => self.base_power + ((level - 1) / LEVELS_PER_EXTRA_SLOT) as f64,
        }
    }

    pub fn describe(&self, level: i64) -> String {
        let power = self.power(level);
        match self.ability {
            Ability::Boost(kind) => format!("+{power:.1}% {}", kind.label()),
            Ability::ExtraSlots => format!("+{power:.0} farm slots"),
        }
    }
}

const fn species(
    key: &'static str,
    name: &'static str,
    rarity: PetRarity,
    ability: Ability,
    base_power: f64,
) -> Species {
    Species {
        key,
        name,
        rarity,
        ability,
        base_power,
    }
}

pub const SPECIES: &[Species] = &[
    species("bunny", "Bunny", PetRarity::Common, Ability::Boost(BoostKind::Coin), 5.0),
    species("cat", "Cat", PetRarity::Common, Ability::Boost(BoostKind::Gem), 3.0),
    species("sparrow", "Sparrow", PetRarity::Common, Ability::Boost(BoostKind::Luck), 2.0),
    species("owl", "Owl", PetRarity::Rare, Ability::Boost(BoostKind::Luck), 5.0),
    species("fox", "Fox", PetRarity::Rare, Ability::Boost(BoostKind::Coin), 10.0),
    species("tanuki", "Tanuki", PetRarity::Epic, Ability::ExtraSlots, 1.0),
    species("crow", "Crow", PetRarity::Epic, Ability::Boost(BoostKind::Gem), 10.0),
    species("phoenix", "Phoenix", PetRarity::Legendary, Ability::Boost(BoostKind::Luck), 15.0),
    species("kitsune", "Kitsune", PetRarity::Legendary, Ability::Boost(BoostKind::Coin), 25.0),
    species("dragon", "Dragon", PetRarity::Mythical, Ability::Boost(BoostKind::Luck), 30.0),
];

pub fn find_species(key: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|species| species.key == key)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Egg {
    Common,
    Rare,
    Divine,
}

impl Egg {
    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "Common Egg",
            Self::Rare => "Rare Egg",
            Self::Divine => "Divine Egg",
        }
    }

    /// Hatch table as (species key, weight).
    pub fn table(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Common => &[
                ("bunny", 35.0),
                ("cat", 35.0),
                ("sparrow", 20.0),
                ("owl", 5.0),
                ("fox", 5.0),
            ],
            Self::Rare => &[
                ("owl", 30.0),
                ("fox", 30.0),
                ("tanuki", 18.0),
                ("crow", 18.0),
                ("phoenix", 2.0),
                ("kitsune", 2.0),
            ],
            Self::Divine => &[
                ("tanuki", 30.0),
                ("crow", 30.0),
                ("phoenix", 17.0),
                ("kitsune", 17.0),
                ("dragon", 6.0),
            ],
        }
    }

    pub fn hatch<R: Rng + ?Sized>(self, rng: &mut R) -> Option<&'static Species> {
        let table = self.table();
        let dist = WeightedIndex::new(table.iter().map(|(_, weight)| *weight)).ok()?;
        let (key, _) = table[rng.sample(&dist)];
        find_species(key)
    }
}

/// A pet as far as boost stacking cares.
#[derive(Clone, Copy, Debug)]
pub struct EquippedPet {
    pub species: &'static Species,
    pub level: i64,
}

/// Adds the abilities of equipped pets; same-kind boosts add up.
pub fn apply_pets(stack: &mut BoostStack, pets: &[EquippedPet]) {
    for pet in pets {
        if let Ability::Boost(kind) = pet.species.ability {
            stack.add_percent(kind, pet.species.power(pet.level));
        }
    }
}

pub fn extra_slots(pets: &[EquippedPet]) -> i64 {
    pets.iter()
        .filter(|pet| pet.species.ability == Ability::ExtraSlots)
        .map(|pet| pet.species.power(pet.level) as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn hatch_tables_reference_known_species() {
        for egg in [Egg::Common, Egg::Rare, Egg::Divine] {
            for (key, weight) in egg.table() {
                assert!(find_species(key).is_some(), "{key} missing");
                assert!(*weight > 0.0);
            }
        }
    }

    #[test]
    fn hatching_only_yields_table_species() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let species = Egg::Divine.hatch(&mut rng).expect("hatch");
            assert!(Egg::Divine.table().iter().any(|(key, _)| *key == species.key));
        }
    }

    #[test]
    fn power_scales_with_level() {
        let fox = find_species("fox").expect("fox");
        assert!((fox.power(1) - 10.0).abs() < 1e-9);
        assert!((fox.power(11) - 15.0).abs() < 1e-9);
        assert!((fox.power(500) - fox.power(MAX_LEVEL)).abs() < 1e-9);

        let tanuki = find_species("tanuki").expect("tanuki");
        assert_eq!(tanuki.power(10) as i64, 1);
        assert_eq!(tanuki.power(11) as i64, 2);
    }

    #[test]
    fn pets_stack_additively_per_kind() {
        let pets = [
            EquippedPet {
                species: find_species("bunny").expect("bunny"),
                level: 1,
            },
            EquippedPet {
                species: find_species("fox").expect("fox"),
                level: 1,
            },
            EquippedPet {
                species: find_species("tanuki").expect("tanuki"),
                level: 21,
            },
        ];
        let mut stack = BoostStack::new();
        apply_pets(&mut stack, &pets);

        assert!((stack.multiplier(BoostKind::Coin) - 1.15).abs() < 1e-9);
        assert!((stack.multiplier(BoostKind::Gem) - 1.0).abs() < 1e-9);
        assert_eq!(extra_slots(&pets), 3);
    }
}

use super::rarity::Rarity;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FumoDef {
    pub name: &'static str,
    pub rarity: Rarity,
}

const fn fumo(name: &'static str, rarity: Rarity) -> FumoDef {
    FumoDef { name, rarity }
}

pub const FUMOS: &[FumoDef] = &[
    fumo("Reimu", Rarity::Common),
    fumo("Marisa", Rarity::Common),
    fumo("Cirno", Rarity::Common),
    fumo("Rumia", Rarity::Common),
    fumo("Daiyousei", Rarity::Common),
    fumo("Meiling", Rarity::Uncommon),
    fumo("Chen", Rarity::Uncommon),
    fumo("Alice", Rarity::Uncommon),
    fumo("Mystia", Rarity::Uncommon),
    fumo("Sakuya", Rarity::Rare),
    fumo("Patchouli", Rarity::Rare),
    fumo("Youmu", Rarity::Rare),
    fumo("Reisen", Rarity::Rare),
    fumo("Remilia", Rarity::Epic),
    fumo("Flandre", Rarity::Epic),
    fumo("Yuyuko", Rarity::Epic),
    fumo("Ran", Rarity::Otherworldly),
    fumo("Eirin", Rarity::Otherworldly),
    fumo("Kaguya", Rarity::Legendary),
    fumo("Mokou", Rarity::Legendary),
    fumo("Yukari", Rarity::Mythical),
    fumo("Suika", Rarity::Mythical),
    fumo("Satori", Rarity::Exclusive),
    fumo("Koishi", Rarity::Exclusive),
    fumo("Nue", Rarity::Mysterious),
    fumo("Hecatia", Rarity::Astral),
    fumo("Tenshi", Rarity::Celestial),
    fumo("Okina", Rarity::Infinite),
    fumo("Yuuka", Rarity::Transcendent),
];

/// Case-insensitive lookup by fumo name.
pub fn find(name: &str) -> Option<&'static FumoDef> {
    let needle = name.trim();
    FUMOS.iter().find(|def| def.name.eq_ignore_ascii_case(needle))
}

pub fn of_rarity(rarity: Rarity) -> impl Iterator<Item = &'static FumoDef> {
    FUMOS.iter().filter(move |def| def.rarity == rarity)
}

/// Picks a fumo of the given rarity uniformly.
pub fn pick<R: Rng + ?Sized>(rarity: Rarity, rng: &mut R) -> &'static FumoDef {
    let pool: Vec<&'static FumoDef> = of_rarity(rarity).collect();
    if pool.is_empty() {
        // every tier is populated, see tests
        return &FUMOS[0];
    }
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn every_rarity_has_a_fumo() {
        for rarity in Rarity::ALL {
            assert!(of_rarity(rarity).next().is_some(), "{rarity} is empty");
        }
    }

    #[test]
    fn names_are_unique_ignoring_case() {
        let names: HashSet<String> = FUMOS.iter().map(|def| def.name.to_lowercase()).collect();
        assert_eq!(names.len(), FUMOS.len());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(find(" flandre ").map(|def| def.rarity), Some(Rarity::Epic));
        assert!(find("Nobody").is_none());
    }

    #[test]
    fn pick_stays_within_rarity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick(Rarity::Rare, &mut rng).rarity, Rarity::Rare);
        }
    }
}

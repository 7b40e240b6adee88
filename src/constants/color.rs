use crate::game::Rarity;
use poise::serenity_prelude::Colour;

pub const MINT: Colour = Colour::new(0x7ee0b5);
pub const MOON: Colour = Colour::new(0x8c9eff);
pub const CRIMSON: Colour = Colour::new(0xe0556b);
pub const GOLD: Colour = Colour::new(0xf5c542);

/// Embed colour for the best pull of a roll.
pub fn rarity(rarity: Rarity) -> Colour {
    match rarity {
        Rarity::Common => Colour::new(0xb0b3b8),
        Rarity::Uncommon => Colour::new(0x6fcf97),
        Rarity::Rare => Colour::new(0x4f9dde),
        Rarity::Epic => Colour::new(0xa66ee8),
        Rarity::Otherworldly => Colour::new(0x5ce1e6),
        Rarity::Legendary => GOLD,
        Rarity::Mythical => Colour::new(0xff7a59),
        Rarity::Exclusive => Colour::new(0xff5fa2),
        Rarity::Mysterious => Colour::new(0x2f3136),
        Rarity::Astral => Colour::new(0x3d5afe),
        Rarity::Celestial => Colour::new(0xfff59d),
        Rarity::Infinite => Colour::new(0x00e5ff),
        Rarity::Transcendent => Colour::new(0xffffff),
    }
}

pub mod color;
pub mod emoji;

pub mod colors {
    pub use super::color::{CRIMSON, GOLD, MINT, MOON, rarity};
}

pub use emoji::icon;

//! Pure game rules: no Discord, no database.

pub mod boost;
pub mod catalog;
pub mod farm;
pub mod gacha;
pub mod item;
pub mod pet;
pub mod quest;
pub mod rarity;
pub mod reward;
pub mod season;
pub mod shop;
pub mod weather;

pub use boost::{BoostKind, BoostStack, Factors};
pub use rarity::{Rarity, Variant};

//! Game operations that touch the database.
//!
//! Each public operation runs in one sqlx transaction so a failed step leaves balances,
//! inventories and quest progress untouched.

pub mod backup;
pub mod boosts;
pub mod economy;
pub mod farm;
pub mod gacha;
pub mod inventory;
pub mod pets;
pub mod quests;
pub mod rewards;
pub mod shop;

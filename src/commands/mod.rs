use crate::{Data, Error};

pub mod autocomplete;
pub mod backup;
pub mod blacklist;
pub mod choices;
pub mod economy;
pub mod farm;
pub mod gacha;
pub mod help;
pub mod inventory;
pub mod leaderboard;
pub mod pet;
pub mod ping;
pub mod quest;
pub mod shop;
pub mod util;
pub mod weather;

pub fn load_all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        ping::ping(),
        weather::weather(),
        economy::economy(),
        leaderboard::leaderboard(),
        gacha::gacha(),
        inventory::inventory(),
        farm::farm(),
        pet::pet(),
        shop::shop(),
        quest::quests(),
        blacklist::blacklist(),
        backup::backup(),
    ]
}

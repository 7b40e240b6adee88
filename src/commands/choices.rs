//! Slash-command choice parameters mapped onto game types.

use crate::{
    database::user::Ranking,
    game::{Rarity, Variant, item::Item},
};

#[derive(Clone, Copy, Debug, Default, poise::ChoiceParameter)]
pub enum VariantChoice {
    #[default]
    Normal,
    Shiny,
    Golden,
}

impl From<VariantChoice> for Variant {
    fn from(choice: VariantChoice) -> Self {
        match choice {
            VariantChoice::Normal => Variant::Normal,
            VariantChoice::Shiny => Variant::Shiny,
            VariantChoice::Golden => Variant::Golden,
        }
    }
}

#[derive(Clone, Copy, Debug, poise::ChoiceParameter)]
pub enum RarityChoice {
    Common,
    Uncommon,
    Rare,
    Epic,
    Otherworldly,
    Legendary,
    Mythical,
    Exclusive,
    #[name = "???"]
    Mysterious,
    Astral,
    Celestial,
    Infinite,
    Transcendent,
}

impl From<RarityChoice> for Rarity {
    fn from(choice: RarityChoice) -> Self {
        match choice {
            RarityChoice::Common => Rarity::Common,
            RarityChoice::Uncommon => Rarity::Uncommon,
            RarityChoice::Rare => Rarity::Rare,
            RarityChoice::Epic => Rarity::Epic,
            RarityChoice::Otherworldly => Rarity::Otherworldly,
            RarityChoice::Legendary => Rarity::Legendary,
            RarityChoice::Mythical => Rarity::Mythical,
            RarityChoice::Exclusive => Rarity::Exclusive,
            RarityChoice::Mysterious => Rarity::Mysterious,
            RarityChoice::Astral => Rarity::Astral,
            RarityChoice::Celestial => Rarity::Celestial,
            RarityChoice::Infinite => Rarity::Infinite,
            RarityChoice::Transcendent => Rarity::Transcendent,
        }
    }
}

#[derive(Clone, Copy, Debug, poise::ChoiceParameter)]
pub enum ItemChoice {
    #[name = "Coin Potion"]
    CoinPotion,
    #[name = "Gem Potion"]
    GemPotion,
    #[name = "Luck Potion"]
    LuckPotion,
    #[name = "Mega Luck Potion"]
    MegaLuckPotion,
    #[name = "Pet Food"]
    PetFood,
    #[name = "Farm Expansion"]
    FarmExpansion,
    #[name = "Common Egg"]
    CommonEgg,
    #[name = "Rare Egg"]
    RareEgg,
    #[name = "Divine Egg"]
    DivineEgg,
}

impl From<ItemChoice> for Item {
    fn from(choice: ItemChoice) -> Self {
        match choice {
            ItemChoice::CoinPotion => Item::CoinPotion,
            ItemChoice::GemPotion => Item::GemPotion,
            ItemChoice::LuckPotion => Item::LuckPotion,
            ItemChoice::MegaLuckPotion => Item::MegaLuckPotion,
            ItemChoice::PetFood => Item::PetFood,
            ItemChoice::FarmExpansion => Item::FarmExpansion,
            ItemChoice::CommonEgg => Item::CommonEgg,
            ItemChoice::RareEgg => Item::RareEgg,
            ItemChoice::DivineEgg => Item::DivineEgg,
        }
    }
}

#[derive(Clone, Copy, Debug, poise::ChoiceParameter)]
pub enum EggChoice {
    #[name = "Common Egg"]
    Common,
    #[name = "Rare Egg"]
    Rare,
    #[name = "Divine Egg"]
    Divine,
}

impl From<EggChoice> for Item {
    fn from(choice: EggChoice) -> Self {
        match choice {
            EggChoice::Common => Item::CommonEgg,
            EggChoice::Rare => Item::RareEgg,
            EggChoice::Divine => Item::DivineEgg,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, poise::ChoiceParameter)]
pub enum RankingChoice {
    #[default]
    Coins,
    Gems,
    Rolls,
}

impl From<RankingChoice> for Ranking {
    fn from(choice: RankingChoice) -> Self {
        match choice {
            RankingChoice::Coins => Ranking::Coins,
            RankingChoice::Gems => Ranking::Gems,
            RankingChoice::Rolls => Ranking::Rolls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_has_a_choice() {
        let choices = [
            ItemChoice::CoinPotion,
            ItemChoice::GemPotion,
            ItemChoice::LuckPotion,
            ItemChoice::MegaLuckPotion,
            ItemChoice::PetFood,
            ItemChoice::FarmExpansion,
            ItemChoice::CommonEgg,
            ItemChoice::RareEgg,
            ItemChoice::DivineEgg,
        ];
        let items: Vec<Item> = choices.into_iter().map(Item::from).collect();
        assert_eq!(items, Item::ALL.to_vec());
    }
}

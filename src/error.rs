//! Error types.
//!
//! Commands return the boxed [`Error`]. Refusals a player can fix themselves are
//! [`GameError`]s; the framework error handler shows those as a friendly reply instead
//! of logging them as failures.

use thiserror::Error as ThisError;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, ThisError, PartialEq)]
pub enum GameError {
    #[error("You need **{needed}** coins but only have **{available}**.")]
    NotEnoughCoins { needed: i64, available: i64 },

    #[error("You need **{needed}** gems but only have **{available}**.")]
    NotEnoughGems { needed: i64, available: i64 },

    #[error("Amount must be between {min} and {max}.")]
    InvalidAmount { min: i64, max: i64 },

    #[error("There is no fumo called `{0}`.")]
    UnknownFumo(String),

    #[error("You only have **{available}** spare {name}.")]
    NotEnoughFumos { name: String, available: i64 },

    #[error("Your farm is full ({capacity} slots).")]
    FarmFull { capacity: i64 },

    #[error("Only **{farming}** {name} are in your farm.")]
    NotFarming { name: String, farming: i64 },

    #[error("Your farm already has the maximum of {max} slots.")]
    FarmMaxed { max: i64 },

    #[error("There is no item called `{0}`.")]
    UnknownItem(String),

    #[error("You don't have enough {item} (owned: {owned}).")]
    NotEnoughItems { item: String, owned: i64 },

    #[error("{0} can't be used like that.")]
    NotUsable(String),

    #[error("You don't own a pet with id `{0}`.")]
    UnknownPet(i64),

    #[error("You can equip at most {0} pets.")]
    TooManyPets(usize),

    #[error("That pet is already at the maximum level ({0}).")]
    PetMaxLevel(i64),

    #[error("Your farm holds {farming} fumos but would only have {capacity} slots without that pet.")]
    PetHoldsSlots { farming: i64, capacity: i64 },

    #[error("There is no quest called `{0}`.")]
    UnknownQuest(String),

    #[error("That quest isn't finished yet ({progress}/{target}).")]
    QuestIncomplete { progress: i64, target: i64 },

    #[error("You already claimed that quest this period.")]
    QuestClaimed,

    #[error("That reward is still on cooldown.")]
    RewardOnCooldown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors_survive_boxing() {
        let boxed: Error = Box::new(GameError::FarmFull { capacity: 5 });
        let game = boxed.downcast_ref::<GameError>();
        assert_eq!(game, Some(&GameError::FarmFull { capacity: 5 }));
        assert_eq!(boxed.to_string(), "Your farm is full (5 slots).");
    }
}

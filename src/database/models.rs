use crate::{
    functions::time::parse_rfc3339,
    game::{
        Rarity, Variant,
        pet::{self, Species},
    },
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub discord_id: i64,
    pub coins: i64,
    pub gems: i64,
    pub total_rolls: i64,
    pub farm_slots: i64,
    pub last_collected_at: Option<String>,
    pub created_at: String,
}

impl UserModel {
    pub fn last_collected_datetime(&self) -> Option<DateTime<Utc>> {
        self.last_collected_at.as_deref().and_then(parse_rfc3339)
    }
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct PityCounterModel {
    pub track: String,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct FumoStackModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub rarity: String,
    pub variant: String,
    pub quantity: i64,
    pub farming: i64,
}

impl FumoStackModel {
    pub fn rarity(&self) -> Rarity {
        Rarity::from_db_name(&self.rarity).unwrap_or(Rarity::Common)
    }

    pub fn variant(&self) -> Variant {
        Variant::from_db_name(&self.variant).unwrap_or(Variant::Normal)
    }

    /// Copies not placed in the farm.
    pub fn spare(&self) -> i64 {
        (self.quantity - self.farming).max(0)
    }

    pub fn display_name(&self) -> String {
        format!("{}{}", self.name, self.variant().tag())
    }
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct PetModel {
    pub id: i64,
    pub user_id: i64,
    pub species: String,
    pub level: i64,
    pub equipped: bool,
    pub hatched_at: String,
}

impl PetModel {
    pub fn species(&self) -> Option<&'static Species> {
        pet::find_species(&self.species)
    }
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct ItemStackModel {
    pub item: String,
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct ActiveBoostModel {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub percent: f64,
    pub source: String,
    pub expires_at: String,
}

impl ActiveBoostModel {
    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        parse_rfc3339(&self.expires_at)
    }
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct QuestProgressModel {
    pub quest: String,
    pub period: String,
    pub progress: i64,
    pub claimed: bool,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct CurrencyTransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub balance_after: i64,
    pub currency: String,
    pub kind: String,
    pub context: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct RewardStateModel {
    pub id: i64,
    pub user_id: i64,
    pub reward_type: String,
    pub last_claimed_at: Option<String>,
    pub next_reset_at: Option<String>,
    pub total_claims: i64,
}

impl RewardStateModel {
    pub fn next_reset_datetime(&self) -> Option<DateTime<Utc>> {
        self.next_reset_at.as_deref().and_then(parse_rfc3339)
    }
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct BlacklistEntryModel {
    pub id: i64,
    pub discord_id: i64,
    pub moderator_id: i64,
    pub reason: Option<String>,
    pub expires_at: Option<String>,
    pub created_at: String,
}

impl BlacklistEntryModel {
    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        self.expires_at.as_deref().and_then(parse_rfc3339)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_datetime().is_some_and(|expires| expires <= now)
    }
}

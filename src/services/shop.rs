use crate::{
    Error,
    config::RESET_TIME,
    database::{self, ActiveBoostModel, ItemStackModel, UserModel},
    error::GameError,
    game::{
        farm::MAX_FARM_SLOTS,
        item::{Item, ItemEffect},
        quest::{self, Objective},
        shop::{self, Listing, MAX_PURCHASE},
    },
    services::{economy, farm, quests},
};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

#[derive(Clone, Debug, PartialEq)]
pub struct Purchase {
    pub user: UserModel,
    pub listing: Listing,
    pub quantity: i64,
    pub owned: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Used {
    Boost { expires_at: DateTime<Utc> },
    FarmSlot { slots: i64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Belongings {
    pub items: Vec<(Item, i64)>,
    pub boosts: Vec<ActiveBoostModel>,
}

pub fn listings(now: DateTime<Utc>) -> Vec<Listing> {
    shop::listings(quest::shop_day(now, &RESET_TIME))
}

pub async fn buy(
    pool: &SqlitePool,
    discord_id: i64,
    item: Item,
    quantity: i64,
    now: DateTime<Utc>,
) -> Result<Purchase, Error> {
    if !(1..=MAX_PURCHASE).contains(&quantity) {
        return Err(GameError::InvalidAmount {
            min: 1,
            max: MAX_PURCHASE,
        }
        .into());
    }
    let listing = shop::listing(quest::shop_day(now, &RESET_TIME), item)
        .ok_or_else(|| GameError::UnknownItem(item.name().to_string()))?;
    let price = listing.price.checked_mul(quantity).ok_or(GameError::InvalidAmount {
        min: 1,
        max: MAX_PURCHASE,
    })?;

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let user = economy::charge(
        &mut tx,
        &user,
        price,
        "shop_purchase",
        Some(format!("{quantity}x {}", item.name())),
    )
    .await?;
    database::item::adjust(&mut tx, user.id, item, quantity).await?;
    let owned = database::item::quantity(&mut tx, user.id, item).await?;
    quests::record(&mut tx, user.id, Objective::Purchase, 1, now).await?;
    tx.commit().await?;

    tracing::info!(discord_id, item = item.key(), quantity, %price, "shop purchase");
    Ok(Purchase {
        user,
        listing,
        quantity,
        owned,
    })
}

/// Uses one potion or farm expansion.
pub async fn use_item(
    pool: &SqlitePool,
    discord_id: i64,
    item: Item,
    now: DateTime<Utc>,
) -> Result<Used, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let owned = database::item::quantity(&mut tx, user.id, item).await?;
    if owned < 1 {
        return Err(GameError::NotEnoughItems {
            item: item.name().to_string(),
            owned,
        }
        .into());
    }

    let used = match item.effect() {
        ItemEffect::Boost {
            kind,
            percent,
            minutes,
        } => {
            farm::collect_in(&mut tx, &user, now).await?;
            let expires_at = now + Duration::minutes(minutes);
            database::boost::insert(&mut tx, user.id, kind, percent, item.key(), expires_at)
                .await?;
            Used::Boost { expires_at }
        }
        ItemEffect::ExpandFarm => {
            if user.farm_slots >= MAX_FARM_SLOTS {
                return Err(GameError::FarmMaxed {
                    max: MAX_FARM_SLOTS,
                }
                .into());
            }
            let slots = user.farm_slots + 1;
            database::user::set_farm_slots(&mut tx, user.id, slots).await?;
            Used::FarmSlot { slots }
        }
        ItemEffect::LevelUpPet | ItemEffect::Hatch(_) => {
            return Err(GameError::NotUsable(item.name().to_string()).into());
        }
    };

    database::item::adjust(&mut tx, user.id, item, -1).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, item = item.key(), "item used");
    Ok(used)
}

pub async fn belongings(
    pool: &SqlitePool,
    discord_id: i64,
    now: DateTime<Utc>,
) -> Result<Belongings, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    let items = database::item::list(&mut conn, user.id)
        .await?
        .into_iter()
        .filter_map(|ItemStackModel { item, quantity }| {
            Item::from_key(&item).map(|item| (item, quantity))
        })
        .collect();
    let boosts = database::boost::active_at(&mut conn, user.id, now).await?;

    Ok(Belongings { items, boosts })
}

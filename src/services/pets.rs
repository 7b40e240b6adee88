use crate::{
    Error,
    database::{self, PetModel, UserModel},
    error::GameError,
    game::{
        farm,
        item::{Item, ItemEffect},
        pet::{self, Ability, EquippedPet, MAX_EQUIPPED, MAX_LEVEL},
        quest::Objective,
    },
    services::{farm as farm_service, quests},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn list(pool: &SqlitePool, discord_id: i64) -> Result<Vec<PetModel>, Error> {
    let mut conn = pool.acquire().await?;
    let user = database::user::get_or_create(&mut conn, discord_id).await?;
    Ok(database::pet::list(&mut conn, user.id).await?)
}

async fn owned_pet(
    conn: &mut SqliteConnection,
    user_id: i64,
    pet_id: i64,
) -> Result<PetModel, Error> {
    database::pet::find(conn, user_id, pet_id)
        .await?
        .ok_or_else(|| GameError::UnknownPet(pet_id).into())
}

async fn consume(conn: &mut SqliteConnection, user_id: i64, item: Item) -> Result<(), Error> {
    let owned = database::item::quantity(conn, user_id, item).await?;
    if owned < 1 {
        return Err(GameError::NotEnoughItems {
            item: item.name().to_string(),
            owned,
        }
        .into());
    }
    database::item::adjust(conn, user_id, item, -1).await?;
    Ok(())
}

/// Fails when taking `pet` off would leave more fumos farming than slots.
async fn ensure_slots_without(
    conn: &mut SqliteConnection,
    user: &UserModel,
    pet: &PetModel,
) -> Result<(), Error> {
    if !pet.equipped || pet.species().map(|species| species.ability) != Some(Ability::ExtraSlots) {
        return Ok(());
    }

    let remaining: Vec<EquippedPet> = database::pet::equipped(conn, user.id)
        .await?
        .into_iter()
        .filter(|other| other.id != pet.id)
        .filter_map(|other| {
            other.species().map(|species| EquippedPet {
                species,
                level: other.level,
            })
        })
        .collect();
    let capacity = farm::capacity(user.farm_slots, pet::extra_slots(&remaining));
    let farming = farm_service::farming_count(conn, user.id).await?;

    if farming > capacity {
        return Err(GameError::PetHoldsSlots { farming, capacity }.into());
    }
    Ok(())
}

/// Consumes one egg and hatches a pet from it.
pub async fn hatch<R: Rng + Send>(
    pool: &SqlitePool,
    discord_id: i64,
    egg_item: Item,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PetModel, Error> {
    let ItemEffect::Hatch(egg) = egg_item.effect() else {
        return Err(GameError::NotUsable(egg_item.name().to_string()).into());
    };

    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    consume(&mut tx, user.id, egg_item).await?;
    let species = egg
        .hatch(rng)
        .ok_or_else(|| GameError::NotUsable(egg.name().to_string()))?;
    let pet = database::pet::insert(&mut tx, user.id, species.key).await?;
    quests::record(&mut tx, user.id, Objective::Hatch, 1, now).await?;
    tx.commit().await?;

    tracing::info!(discord_id, egg = egg.name(), species = species.key, "egg hatched");
    Ok(pet)
}

pub async fn equip(
    pool: &SqlitePool,
    discord_id: i64,
    pet_id: i64,
    now: DateTime<Utc>,
) -> Result<PetModel, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let pet = owned_pet(&mut tx, user.id, pet_id).await?;
    if pet.equipped {
        return Ok(pet);
    }

    let equipped = database::pet::equipped(&mut tx, user.id).await?;
    if equipped.len() >= MAX_EQUIPPED {
        return Err(GameError::TooManyPets(MAX_EQUIPPED).into());
    }

    farm_service::collect_in(&mut tx, &user, now).await?;
    database::pet::set_equipped(&mut tx, pet.id, true).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, pet_id, "pet equipped");
    Ok(PetModel {
        equipped: true,
        ..pet
    })
}

pub async fn unequip(
    pool: &SqlitePool,
    discord_id: i64,
    pet_id: i64,
    now: DateTime<Utc>,
) -> Result<PetModel, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let pet = owned_pet(&mut tx, user.id, pet_id).await?;
    if !pet.equipped {
        return Ok(pet);
    }

    ensure_slots_without(&mut tx, &user, &pet).await?;
    farm_service::collect_in(&mut tx, &user, now).await?;
    database::pet::set_equipped(&mut tx, pet.id, false).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, pet_id, "pet unequipped");
    Ok(PetModel {
        equipped: false,
        ..pet
    })
}

/// Spends one Pet Food for a level.
pub async fn feed(
    pool: &SqlitePool,
    discord_id: i64,
    pet_id: i64,
    now: DateTime<Utc>,
) -> Result<PetModel, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let pet = owned_pet(&mut tx, user.id, pet_id).await?;
    if pet.level >= MAX_LEVEL {
        return Err(GameError::PetMaxLevel(MAX_LEVEL).into());
    }

    consume(&mut tx, user.id, Item::PetFood).await?;
    if pet.equipped {
        farm_service::collect_in(&mut tx, &user, now).await?;
    }
    let level = pet.level + 1;
    database::pet::set_level(&mut tx, pet.id, level).await?;
    tx.commit().await?;

    tracing::debug!(discord_id, pet_id, level, "pet fed");
    Ok(PetModel { level, ..pet })
}

pub async fn release(
    pool: &SqlitePool,
    discord_id: i64,
    pet_id: i64,
    now: DateTime<Utc>,
) -> Result<PetModel, Error> {
    let mut tx = pool.begin().await?;
    let user = database::user::get_or_create(&mut tx, discord_id).await?;
    let pet = owned_pet(&mut tx, user.id, pet_id).await?;

    if pet.equipped {
        ensure_slots_without(&mut tx, &user, &pet).await?;
        farm_service::collect_in(&mut tx, &user, now).await?;
    }
    database::pet::delete(&mut tx, pet.id).await?;
    tx.commit().await?;

    tracing::info!(discord_id, pet_id, species = %pet.species, "pet released");
    Ok(pet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::test_pool,
        game::{Rarity, Variant},
    };
    use rand::{SeedableRng, rngs::StdRng};

    async fn give(pool: &SqlitePool, discord_id: i64, item: Item, amount: i64) -> UserModel {
        let mut conn = pool.acquire().await.unwrap();
        let user = database::user::get_or_create(&mut conn, discord_id).await.unwrap();
        database::item::adjust(&mut conn, user.id, item, amount).await.unwrap();
        user
    }

    async fn pet_of(pool: &SqlitePool, user_id: i64, species: &str) -> PetModel {
        let mut conn = pool.acquire().await.unwrap();
        database::pet::insert(&mut conn, user_id, species).await.unwrap()
    }

    #[tokio::test]
    async fn hatching_consumes_an_egg() {
        let pool = test_pool().await;
        give(&pool, 1, Item::CommonEgg, 1).await;
        let mut rng = StdRng::seed_from_u64(9);

        let pet = hatch(&pool, 1, Item::CommonEgg, Utc::now(), &mut rng)
            .await
            .unwrap();
        assert!(pet.species().is_some());
        assert_eq!(pet.level, 1);

        let err = hatch(&pool, 1, Item::CommonEgg, Utc::now(), &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::NotEnoughItems { owned: 0, .. })
        ));
    }

    #[tokio::test]
    async fn only_eggs_hatch() {
        let pool = test_pool().await;
        let mut rng = StdRng::seed_from_u64(9);
        let err = hatch(&pool, 2, Item::PetFood, Utc::now(), &mut rng)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::NotUsable("Pet Food".into()))
        );
    }

    #[tokio::test]
    async fn at_most_three_pets_are_equipped() {
        let pool = test_pool().await;
        let user = give(&pool, 3, Item::PetFood, 0).await;
        let now = Utc::now();

        let mut ids = Vec::new();
        for species in ["bunny", "cat", "owl", "fox"] {
            ids.push(pet_of(&pool, user.id, species).await.id);
        }
        for id in &ids[..3] {
            assert!(equip(&pool, 3, *id, now).await.unwrap().equipped);
        }
        let err = equip(&pool, 3, ids[3], now).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::TooManyPets(MAX_EQUIPPED))
        );

        assert!(!unequip(&pool, 3, ids[0], now).await.unwrap().equipped);
        assert!(equip(&pool, 3, ids[3], now).await.unwrap().equipped);
    }

    #[tokio::test]
    async fn slot_pets_cannot_leave_a_full_farm() {
        let pool = test_pool().await;
        let user = give(&pool, 4, Item::PetFood, 0).await;
        let now = Utc::now();
        let tanuki = pet_of(&pool, user.id, "tanuki").await;
        equip(&pool, 4, tanuki.id, now).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        database::inventory::add(&mut conn, user.id, "Reimu", Rarity::Common, Variant::Normal, 6)
            .await
            .unwrap();
        drop(conn);
        farm_service::add(&pool, 4, "Reimu", Variant::Normal, 6, now)
            .await
            .unwrap();

        let err = release(&pool, 4, tanuki.id, now).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::PetHoldsSlots {
                farming: 6,
                capacity: 5
            })
        );
    }

    #[tokio::test]
    async fn feeding_levels_up_until_the_cap() {
        let pool = test_pool().await;
        let user = give(&pool, 5, Item::PetFood, 2).await;
        let pet = pet_of(&pool, user.id, "cat").await;

        let fed = feed(&pool, 5, pet.id, Utc::now()).await.unwrap();
        assert_eq!(fed.level, 2);

        let mut conn = pool.acquire().await.unwrap();
        database::pet::set_level(&mut conn, pet.id, MAX_LEVEL).await.unwrap();
        drop(conn);
        let err = feed(&pool, 5, pet.id, Utc::now()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::PetMaxLevel(MAX_LEVEL))
        );
    }

    #[tokio::test]
    async fn other_players_pets_are_unknown() {
        let pool = test_pool().await;
        let owner = give(&pool, 6, Item::PetFood, 0).await;
        let pet = pet_of(&pool, owner.id, "cat").await;

        let err = release(&pool, 7, pet.id, Utc::now()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::UnknownPet(pet.id))
        );
    }
}

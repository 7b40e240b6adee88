use crate::{
    Context, Error,
    commands::choices::EggChoice,
    constants::{colors, icon},
    database::PetModel,
    functions::format::pretty_message,
    game::{
        item::Item,
        pet::{MAX_EQUIPPED, MAX_LEVEL},
    },
    services::pets,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use rand::{SeedableRng, rngs::StdRng};

/// Hatch, equip and raise pets.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Pets",
    interaction_context = "Guild",
    subcommands("list", "hatch", "equip", "unequip", "feed", "release")
)]
pub async fn pet(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Show your pets and their abilities.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let mut owned = pets::list(&ctx.data().database, ctx.author().id.get() as i64).await?;
    if owned.is_empty() {
        ctx.say(pretty_message(
            icon::EGG,
            "You have no pets yet. Buy an egg in `/shop` and `/pet hatch` it!",
        ))
        .await?;
        return Ok(());
    }

    owned.sort_by_key(|pet| (!pet.equipped, -pet.level, pet.id));
    let equipped = owned.iter().filter(|pet| pet.equipped).count();
    let description = owned
        .iter()
        .map(describe_pet)
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} {}'s pets", icon::PAW, ctx.author().name))
        .colour(colors::MOON)
        .description(description)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "{equipped}/{MAX_EQUIPPED} equipped · max level {MAX_LEVEL}"
        )));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Crack open an egg from your items.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn hatch(
    ctx: Context<'_>,
    #[description = "Egg to hatch"] egg: EggChoice,
) -> Result<(), Error> {
    ctx.defer().await?;

    let egg = Item::from(egg);
    let mut rng = StdRng::from_os_rng();
    let pet = pets::hatch(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        egg,
        Utc::now(),
        &mut rng,
    )
    .await?;

    let (title, details) = match pet.species() {
        Some(species) => (
            format!("{} {} hatched a {}!", icon::EGG, ctx.author().name, species.name),
            format!(
                "{} · {}\nPet id `{}`",
                species.rarity,
                species.describe(pet.level),
                pet.id
            ),
        ),
        None => (
            format!("{} {} hatched a pet!", icon::EGG, ctx.author().name),
            format!("Pet id `{}`", pet.id),
        ),
    };

    let embed = serenity::CreateEmbed::new()
        .title(title)
        .colour(colors::GOLD)
        .description(details)
        .footer(serenity::CreateEmbedFooter::new(format!("From a {egg}")));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Equip a pet so its ability applies.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn equip(
    ctx: Context<'_>,
    #[description = "Pet id from /pet list"] id: i64,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let pet = pets::equip(&ctx.data().database, ctx.author().id.get() as i64, id, Utc::now()).await?;
    ctx.say(pretty_message(icon::CHECK, format!("Equipped {}.", pet_name(&pet))))
        .await?;

    Ok(())
}

/// Take a pet off duty.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn unequip(
    ctx: Context<'_>,
    #[description = "Pet id from /pet list"] id: i64,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let pet =
        pets::unequip(&ctx.data().database, ctx.author().id.get() as i64, id, Utc::now()).await?;
    ctx.say(pretty_message(icon::MINUS, format!("Unequipped {}.", pet_name(&pet))))
        .await?;

    Ok(())
}

/// Feed a pet one Pet Food to level it up.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn feed(
    ctx: Context<'_>,
    #[description = "Pet id from /pet list"] id: i64,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let pet = pets::feed(&ctx.data().database, ctx.author().id.get() as i64, id, Utc::now()).await?;
    let ability = pet
        .species()
        .map(|species| format!(" Now {}.", species.describe(pet.level)))
        .unwrap_or_default();
    ctx.say(pretty_message(
        icon::SPARKLES,
        format!("{} reached level {}!{ability}", pet_name(&pet), pet.level),
    ))
    .await?;

    Ok(())
}

/// Release a pet for good.
#[poise::command(slash_command, prefix_command, category = "Pets")]
pub async fn release(
    ctx: Context<'_>,
    #[description = "Pet id from /pet list"] id: i64,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let pet =
        pets::release(&ctx.data().database, ctx.author().id.get() as i64, id, Utc::now()).await?;
    ctx.say(pretty_message(
        icon::PAW,
        format!("{} was released. Farewell!", pet_name(&pet)),
    ))
    .await?;

    Ok(())
}

fn pet_name(pet: &PetModel) -> String {
    let name = pet.species().map(|species| species.name).unwrap_or("Unknown pet");
    format!("**{name}** (`{}`, lv. {})", pet.id, pet.level)
}

fn describe_pet(pet: &PetModel) -> String {
    let marker = if pet.equipped { icon::CHECK } else { icon::PAW };
    let ability = pet
        .species()
        .map(|species| format!(" · {} · {}", species.rarity, species.describe(pet.level)))
        .unwrap_or_default();
    pretty_message(marker, format!("{}{ability}", pet_name(pet)))
}

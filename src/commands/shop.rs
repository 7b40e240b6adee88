use crate::{
    Context, Error,
    commands::choices::ItemChoice,
    config::RESET_TIME,
    constants::{colors, icon},
    functions::{
        format::{format_number, pretty_message},
        time::{self, ResetPeriod},
    },
    game::{
        BoostKind,
        item::Item,
        shop::{FEATURED_DISCOUNT_PERCENT, Listing, MAX_PURCHASE},
    },
    services::shop::{self, Used},
};
use chrono::Utc;
use poise::serenity_prelude as serenity;

/// Potions, eggs and farm upgrades.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Shop",
    interaction_context = "Guild",
    subcommands("view", "buy", "use_item", "items")
)]
pub async fn shop(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Today's shop, with one featured item on sale.
#[poise::command(slash_command, prefix_command, category = "Shop")]
pub async fn view(ctx: Context<'_>) -> Result<(), Error> {
    let now = Utc::now();
    let listings = shop::listings(now);
    let next_day = time::next_reset_from(now, ResetPeriod::Daily, &RESET_TIME);

    let description = listings
        .iter()
        .map(listing_line)
        .collect::<Vec<_>>()
        .join("\n\n");

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Fumo shop", icon::CART))
        .colour(colors::GOLD)
        .description(description)
        .field(
            "Featured item rotates",
            time::describe_relative(next_day),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Buy items with coins or gems.
#[poise::command(slash_command, prefix_command, category = "Shop")]
pub async fn buy(
    ctx: Context<'_>,
    #[description = "Item to buy"] item: ItemChoice,
    #[description = "How many (1-100)"]
    #[min = 1]
    #[max = 100]
    quantity: Option<i64>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let quantity = quantity.unwrap_or(1).min(MAX_PURCHASE);
    let purchase = shop::buy(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        Item::from(item),
        quantity,
        Utc::now(),
    )
    .await?;

    let total = purchase
        .listing
        .price
        .checked_mul(purchase.quantity)
        .unwrap_or(purchase.listing.price);
    ctx.say(format!(
        "{}\n{}",
        pretty_message(
            icon::CART,
            format!(
                "Bought **{}x {}** for {total}. You now own {}.",
                purchase.quantity, purchase.listing.item, purchase.owned
            ),
        ),
        pretty_message(
            icon::COIN,
            format!(
                "Coins: {} · Gems: {}",
                format_number(purchase.user.coins),
                format_number(purchase.user.gems)
            ),
        ),
    ))
    .await?;

    Ok(())
}

/// Use a potion or a farm expansion.
#[poise::command(slash_command, prefix_command, rename = "use", category = "Shop")]
pub async fn use_item(
    ctx: Context<'_>,
    #[description = "Item to use"] item: ItemChoice,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let item = Item::from(item);
    let used = shop::use_item(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        item,
        Utc::now(),
    )
    .await?;

    let message = match used {
        Used::Boost { expires_at } => pretty_message(
            icon::POTION,
            format!(
                "{item} is active: {}. Wears off {}.",
                item.description(),
                time::describe_relative(expires_at)
            ),
        ),
        Used::FarmSlot { slots } => pretty_message(
            icon::SEEDLING,
            format!("Your farm now has **{slots}** slots."),
        ),
    };
    ctx.say(message).await?;

    Ok(())
}

/// Your items and active boosts.
#[poise::command(slash_command, prefix_command, category = "Shop")]
pub async fn items(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let belongings =
        shop::belongings(&ctx.data().database, ctx.author().id.get() as i64, Utc::now()).await?;

    let items = if belongings.items.is_empty() {
        pretty_message(icon::MINUS, "No items.")
    } else {
        belongings
            .items
            .iter()
            .map(|(item, quantity)| format!("**{item}** x{quantity}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let boosts = if belongings.boosts.is_empty() {
        pretty_message(icon::MINUS, "No active boosts.")
    } else {
        belongings
            .boosts
            .iter()
            .map(|boost| {
                let kind = BoostKind::from_db_name(&boost.kind)
                    .map(BoostKind::label)
                    .unwrap_or("Unknown");
                let expires = boost
                    .expires_datetime()
                    .map(time::describe_relative)
                    .unwrap_or_else(|| boost.expires_at.clone());
                pretty_message(
                    icon::POTION,
                    format!("+{:.0}% {kind} ({}) ends {expires}", boost.percent, boost.source),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} {}'s items", icon::BOX, ctx.author().name))
        .colour(colors::MOON)
        .field("Items", items, false)
        .field("Active boosts", boosts, false);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn listing_line(listing: &Listing) -> String {
    let mut line = format!("**{}** · {}", listing.item, listing.price);
    if listing.featured {
        line.push_str(&format!(
            " {} -{FEATURED_DISCOUNT_PERCENT}% today",
            icon::SPARKLES
        ));
    }
    format!("{line}\n{}", listing.item.description())
}

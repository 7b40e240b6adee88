use crate::{
    Context, Error,
    commands::{autocomplete, choices::VariantChoice},
    constants::{colors, icon},
    functions::format::{format_multiplier, format_number, pretty_message},
    game::{BoostKind, Variant, farm::MAX_ACCRUAL_HOURS},
    services::farm,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;

/// Put fumos to work for coins and gems.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Farm",
    interaction_context = "Guild",
    subcommands("status", "add", "remove", "collect")
)]
pub async fn farm(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// See what your farm is producing.
#[poise::command(slash_command, prefix_command, category = "Farm")]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let status = farm::status(&ctx.data().database, ctx.author().id.get() as i64, Utc::now()).await?;

    let fumos = if status.stacks.is_empty() {
        pretty_message(icon::MINUS, "No fumos farming. Use `/farm add`.")
    } else {
        status
            .stacks
            .iter()
            .map(|stack| format!("{} x{} · {}", stack.display_name(), stack.farming, stack.rarity()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let multipliers = BoostKind::ALL
        .into_iter()
        .map(|kind| format!("{kind}: {}", format_multiplier(status.factors.get(kind))))
        .collect::<Vec<_>>()
        .join(" · ");

    let mut pending = format!(
        "{}\n{}",
        pretty_message(icon::COIN, format_number(status.pending.coins)),
        pretty_message(icon::GEM, format_number(status.pending.gems)),
    );
    if status.pending.capped {
        pending.push_str(&format!("\nCapped at {MAX_ACCRUAL_HOURS}h, collect soon!"));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} {}'s farm", icon::SEEDLING, ctx.author().name))
        .colour(colors::MINT)
        .description(fumos)
        .field(
            "Slots",
            format!("{}/{}", status.farming, status.capacity),
            true,
        )
        .field(
            "Base rate",
            format!(
                "{} coins/min\n{} gems/min",
                format_number(status.rate.coins),
                format_number(status.rate.gems)
            ),
            true,
        )
        .field("Pending", pending, true)
        .field("Multipliers", multipliers, false);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Move spare copies into the farm.
#[poise::command(slash_command, prefix_command, category = "Farm")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Fumo name"]
    #[autocomplete = "autocomplete::fumo_name"]
    name: String,
    #[description = "Variant (default normal)"] variant: Option<VariantChoice>,
    #[description = "How many copies (default 1)"]
    #[min = 1]
    amount: Option<i64>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let amount = amount.unwrap_or(1);
    let stack = farm::add(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        &name,
        variant.map(Variant::from).unwrap_or(Variant::Normal),
        amount,
        Utc::now(),
    )
    .await?;

    ctx.say(pretty_message(
        icon::PLUS,
        format!(
            "Added **{amount}** {} to your farm ({} farming).",
            stack.display_name(),
            stack.farming
        ),
    ))
    .await?;

    Ok(())
}

/// Take copies back out of the farm.
#[poise::command(slash_command, prefix_command, category = "Farm")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Fumo name"]
    #[autocomplete = "autocomplete::fumo_name"]
    name: String,
    #[description = "Variant (default normal)"] variant: Option<VariantChoice>,
    #[description = "How many copies (default 1)"]
    #[min = 1]
    amount: Option<i64>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let amount = amount.unwrap_or(1);
    let stack = farm::remove(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        &name,
        variant.map(Variant::from).unwrap_or(Variant::Normal),
        amount,
        Utc::now(),
    )
    .await?;

    ctx.say(pretty_message(
        icon::MINUS,
        format!(
            "Removed **{amount}** {} from your farm ({} still farming).",
            stack.display_name(),
            stack.farming
        ),
    ))
    .await?;

    Ok(())
}

/// Collect what your farm produced.
#[poise::command(slash_command, prefix_command, aliases("harvest"), category = "Farm")]
pub async fn collect(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let collected =
        farm::collect(&ctx.data().database, ctx.author().id.get() as i64, Utc::now()).await?;
    let harvest = collected.harvest;

    let mut lines = vec![
        pretty_message(
            icon::COIN,
            format!(
                "+{} coins ({} total)",
                format_number(harvest.coins),
                format_number(collected.user.coins)
            ),
        ),
        pretty_message(
            icon::GEM,
            format!(
                "+{} gems ({} total)",
                format_number(harvest.gems),
                format_number(collected.user.gems)
            ),
        ),
        pretty_message(icon::TIMER, format!("{} minutes of work", harvest.minutes)),
    ];
    if harvest.capped {
        lines.push(pretty_message(
            icon::ALARM,
            format!("Only the last {MAX_ACCRUAL_HOURS} hours count."),
        ));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Harvest", icon::SEEDLING))
        .colour(colors::GOLD)
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::format::{format_multiplier, format_number, format_percent, pretty_message},
    game::{
        Rarity,
        gacha::{MAX_BATCH, PITY_TRACKS, PityCounters, ROLL_COST, RolledFumo},
    },
    services::gacha,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;

/// Individual pulls are listed up to this batch size; larger batches are summarised.
const LISTED_ROLLS: usize = 10;

/// Roll the gacha and check your odds.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Gacha",
    interaction_context = "Guild",
    subcommands("roll", "odds")
)]
pub async fn gacha(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Spend coins on one or more gacha rolls.
#[poise::command(slash_command, prefix_command, category = "Gacha")]
pub async fn roll(
    ctx: Context<'_>,
    #[description = "How many rolls (1-100)"]
    #[min = 1]
    #[max = 100]
    count: Option<u32>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let count = count.unwrap_or(1);
    let mut rng = StdRng::from_os_rng();
    let summary = gacha::roll(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        count,
        Utc::now(),
        &mut rng,
    )
    .await?;

    let colour = summary
        .best()
        .map(|best| colors::rarity(best.rarity()))
        .unwrap_or(colors::MOON);

    let mut lines = Vec::new();
    if summary.rolls.len() <= LISTED_ROLLS {
        lines.extend(summary.rolls.iter().map(describe_roll));
    } else {
        let mut by_rarity: BTreeMap<Rarity, usize> = BTreeMap::new();
        for rolled in &summary.rolls {
            *by_rarity.entry(rolled.rarity()).or_default() += 1;
        }
        lines.extend(
            by_rarity
                .into_iter()
                .rev()
                .map(|(rarity, amount)| format!("**{rarity}** x{amount}")),
        );
        if let Some(best) = summary.best() {
            lines.push(String::new());
            lines.push(format!("Best pull: {}", describe_roll(best)));
        }
    }

    lines.push(String::new());
    lines.push(pretty_message(
        icon::COIN,
        format!(
            "-{} coins, {} left",
            format_number(ROLL_COST * i64::from(count)),
            format_number(summary.user.coins)
        ),
    ));
    lines.push(pretty_message(
        icon::CLOVER,
        format!("Luck {}", format_multiplier(summary.luck)),
    ));

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} {} roll(s)", icon::DICE, count))
        .colour(colour)
        .description(lines.join("\n"))
        .footer(serenity::CreateEmbedFooter::new(pity_footer(&summary.pity)));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Current roll odds with your luck and pity progress.
#[poise::command(slash_command, prefix_command, category = "Gacha")]
pub async fn odds(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let report = gacha::odds(&ctx.data().database, ctx.author().id.get() as i64, Utc::now()).await?;

    let table = report
        .odds
        .iter()
        .map(|(rarity, chance)| format!("`{:<13}` {}", rarity.name(), format_percent(*chance)))
        .collect::<Vec<_>>()
        .join("\n");

    let pity = PITY_TRACKS
        .iter()
        .map(|track| {
            pretty_message(
                icon::CLOVER,
                format!(
                    "{} guaranteed in {} roll(s)",
                    track.floor,
                    track.threshold.saturating_sub(report.pity.get(track.key))
                ),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Gacha odds", icon::DICE))
        .colour(colors::MOON)
        .description(format!(
            "{}\n{}\n\n{table}",
            pretty_message(icon::CLOVER, format!("Luck {}", format_multiplier(report.luck))),
            pretty_message(
                icon::COIN,
                format!("{} coins per roll, up to {MAX_BATCH} at once", ROLL_COST)
            ),
        ))
        .field("Pity", pity, false);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn describe_roll(rolled: &RolledFumo) -> String {
    let pity = if rolled.pity.is_some() { " (pity)" } else { "" };
    format!(
        "**{}**{} · {}{pity}",
        rolled.fumo.name,
        rolled.variant.tag(),
        rolled.rarity()
    )
}

fn pity_footer(pity: &PityCounters) -> String {
    PITY_TRACKS
        .iter()
        .map(|track| format!("{} pity {}/{}", track.floor, pity.get(track.key), track.threshold))
        .collect::<Vec<_>>()
        .join(" · ")
}

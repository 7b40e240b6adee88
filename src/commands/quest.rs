use crate::{
    Context, Error,
    config::RESET_TIME,
    constants::{colors, icon},
    functions::{
        format::{format_number, pretty_message},
        time::{self, ResetPeriod},
    },
    game::quest::{self, Cadence},
    services::quests::{self, QuestStatus},
};
use chrono::Utc;
use poise::serenity_prelude::{self as serenity, AutocompleteChoice};

/// Daily and weekly quests.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Quests",
    interaction_context = "Guild",
    subcommands("view", "claim")
)]
pub async fn quests(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Your quest progress for this period.
#[poise::command(slash_command, prefix_command, category = "Quests")]
pub async fn view(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let now = Utc::now();
    let board = quests::board(&ctx.data().database, ctx.author().id.get() as i64, now).await?;

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} Quests", icon::SCROLL))
        .colour(colors::MOON)
        .description(pretty_message(
            icon::ALARM,
            format!(
                "Daily quests reset {}",
                time::describe_relative(time::next_reset_from(
                    now,
                    ResetPeriod::Daily,
                    &RESET_TIME
                ))
            ),
        ));
    for cadence in [Cadence::Daily, Cadence::Weekly] {
        let lines = board
            .iter()
            .filter(|status| status.def.cadence == cadence)
            .map(quest_line)
            .collect::<Vec<_>>()
            .join("\n");
        embed = embed.field(cadence.label(), lines, false);
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Claim the reward of a finished quest.
#[poise::command(slash_command, prefix_command, category = "Quests")]
pub async fn claim(
    ctx: Context<'_>,
    #[description = "Quest id, e.g. daily_roll"]
    #[autocomplete = "quest_key"]
    quest: String,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let (user, def) = quests::claim(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        &quest,
        Utc::now(),
    )
    .await?;

    let mut rewards = Vec::new();
    if def.coins > 0 {
        rewards.push(pretty_message(icon::COIN, format!("+{} coins", format_number(def.coins))));
    }
    if def.gems > 0 {
        rewards.push(pretty_message(icon::GEM, format!("+{} gems", format_number(def.gems))));
    }

    ctx.say(format!(
        "{}\n{}\n{}",
        pretty_message(icon::TROPHY, format!("Completed **{}**!", def.describe())),
        rewards.join("\n"),
        pretty_message(
            icon::COIN,
            format!(
                "Coins: {} · Gems: {}",
                format_number(user.coins),
                format_number(user.gems)
            ),
        ),
    ))
    .await?;

    Ok(())
}

async fn quest_key(_ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let needle = partial.trim().to_ascii_lowercase();
    quest::QUESTS
        .iter()
        .filter(|def| def.key.contains(&needle))
        .map(|def| {
            AutocompleteChoice::new(
                format!("{} · {}", def.cadence.label(), def.describe()),
                def.key,
            )
        })
        .collect()
}

fn quest_line(status: &QuestStatus) -> String {
    let marker = if status.claimed {
        icon::CHECK
    } else if status.is_complete() {
        icon::GIFT
    } else {
        icon::TIMER
    };
    let mut reward = Vec::new();
    if status.def.coins > 0 {
        reward.push(format!("{} coins", format_number(status.def.coins)));
    }
    if status.def.gems > 0 {
        reward.push(format!("{} gems", format_number(status.def.gems)));
    }
    pretty_message(
        marker,
        format!(
            "`{}` {} {}/{} · {}",
            status.def.key,
            status.def.objective,
            status.progress.min(status.def.target),
            status.def.target,
            reward.join(" + ")
        ),
    )
}

use crate::{
    Context, Error,
    config::{REWARD_BUTTON_TIMEOUT, RESET_TIME},
    constants::{colors, icon},
    error::GameError,
    functions::{
        format::{format_number, pretty_message},
        time,
        ui::component::{acknowledge, update_component_message},
    },
    game::{gacha::PITY_TRACKS, reward::RewardKind},
    services::rewards::{self, Wallet},
};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use rand::{SeedableRng, rngs::StdRng};
use serenity::collector::ComponentInteractionCollector;
use serenity::{CreateActionRow, CreateButton};

mod reward_kind;
use reward_kind::RewardButton;

const HISTORY_LIMIT: i64 = 15;

/// Your wallet, rewards and ledger.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Economy",
    interaction_context = "Guild",
    subcommands("balance", "rewards", "history")
)]
pub async fn economy(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// See your coins, gems, pity and reward cooldowns.
#[poise::command(slash_command, prefix_command, aliases("bal"), category = "Economy")]
pub async fn balance(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let wallet = rewards::wallet(&ctx.data().database, ctx.author().id.get() as i64).await?;
    let now = Utc::now();

    let mut lines = vec![
        pretty_message(icon::COIN, format!("Coins: **{}**", format_number(wallet.user.coins))),
        pretty_message(icon::GEM, format!("Gems: **{}**", format_number(wallet.user.gems))),
        pretty_message(
            icon::DICE,
            format!("Total rolls: **{}**", format_number(wallet.user.total_rolls)),
        ),
        String::new(),
        "**Pity**".to_string(),
    ];
    for track in PITY_TRACKS {
        lines.push(pretty_message(
            icon::CLOVER,
            format!(
                "{}: {}/{}",
                track.floor,
                wallet.pity.get(track.key),
                track.threshold
            ),
        ));
    }

    lines.push(String::new());
    lines.push("**Rewards**".to_string());
    for kind in RewardKind::ALL {
        let status = if wallet.is_available(kind, now) {
            pretty_message(icon::CHECK, "Ready")
        } else {
            let ready_at = wallet.ready_at(kind).unwrap_or(now);
            pretty_message(icon::TIMER, time::describe_relative(ready_at))
        };
        lines.push(format!("**{}:** {status}", kind.label()));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} {}'s wallet", icon::COIN, ctx.author().name))
        .colour(colors::MINT)
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Claim your daily, weekly and monthly rewards.
#[poise::command(slash_command, prefix_command, aliases("daily"), category = "Economy")]
pub async fn rewards(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let pool = &ctx.data().database;
    let discord_id = ctx.author().id.get() as i64;
    let mut wallet = rewards::wallet(pool, discord_id).await?;

    let (embed, components) = build_rewards_message(&wallet, Utc::now(), None);
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .ephemeral(true)
                .embed(embed)
                .components(components),
        )
        .await?;
    let message_id = reply.message().await?.id;

    let mut rng = StdRng::from_os_rng();
    while let Some(interaction) = ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message_id)
        .timeout(REWARD_BUTTON_TIMEOUT)
        .await
    {
        let Some(kind) = RewardKind::from_custom_id(&interaction.data.custom_id) else {
            acknowledge(&ctx, &interaction).await?;
            continue;
        };

        let now = Utc::now();
        let status = match rewards::claim(pool, discord_id, kind, now, &mut rng).await {
            Ok(claimed) => format_claim_message(claimed.coins, claimed.gems),
            Err(err) => match err.downcast_ref::<GameError>() {
                Some(GameError::RewardOnCooldown) => {
                    format_cooldown_message(wallet.ready_at(kind).unwrap_or(now))
                }
                _ => return Err(err),
            },
        };
        wallet = rewards::wallet(pool, discord_id).await?;

        let (embed, components) = build_rewards_message(&wallet, now, Some(&status));
        update_component_message(&ctx, &interaction, embed, components).await?;
    }

    let (embed, _) = build_rewards_message(&wallet, Utc::now(), None);
    reply
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(embed)
                .components(Vec::new()),
        )
        .await?;

    Ok(())
}

/// Your latest coin and gem movements.
#[poise::command(slash_command, prefix_command, category = "Economy")]
pub async fn history(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let entries = rewards::history(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        HISTORY_LIMIT,
    )
    .await?;

    let description = if entries.is_empty() {
        pretty_message(icon::MINUS, "No transactions yet.")
    } else {
        entries
            .iter()
            .map(|entry| {
                let currency_icon = if entry.currency == "gems" { icon::GEM } else { icon::COIN };
                let when = time::describe_relative_from_str(&entry.created_at)
                    .unwrap_or_else(|| entry.created_at.clone());
                let sign = if entry.amount >= 0 { "+" } else { "" };
                let context = entry
                    .context
                    .as_deref()
                    .map(|context| format!(" ({context})"))
                    .unwrap_or_default();
                pretty_message(
                    currency_icon,
                    format!(
                        "**{sign}{}** `{}`{context} → {} {when}",
                        format_number(entry.amount),
                        entry.kind,
                        format_number(entry.balance_after),
                    ),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Recent transactions", icon::SCROLL))
        .colour(colors::MOON)
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn build_rewards_message(
    wallet: &Wallet,
    now: DateTime<Utc>,
    status: Option<&str>,
) -> (serenity::CreateEmbed, Vec<CreateActionRow>) {
    let mut lines = vec![
        pretty_message(icon::COIN, format!("Coins: {}", format_number(wallet.user.coins))),
        pretty_message(icon::GEM, format!("Gems: {}", format_number(wallet.user.gems))),
    ];
    if let Some(status) = status {
        lines.push(String::new());
        lines.push(status.to_string());
    }

    let mut embed = serenity::CreateEmbed::new()
        .colour(colors::MOON)
        .description(lines.join("\n"));
    for kind in RewardKind::ALL {
        embed = embed.field(
            format!("{} reward", kind.label()),
            reward_field(wallet, kind, now),
            true,
        );
    }

    let buttons = RewardKind::ALL
        .into_iter()
        .map(|kind| {
            CreateButton::new(kind.custom_id())
                .label(kind.label())
                .emoji(kind.button_emoji().as_reaction())
                .style(serenity::ButtonStyle::Secondary)
                .disabled(!wallet.is_available(kind, now))
        })
        .collect();

    (embed, vec![CreateActionRow::Buttons(buttons)])
}

fn reward_field(wallet: &Wallet, kind: RewardKind, now: DateTime<Utc>) -> String {
    let (min_coins, max_coins) = kind.coin_range();
    let payout_line = pretty_message(
        icon::COIN,
        format!("{} - {} coins", format_number(min_coins), format_number(max_coins)),
    );

    match wallet.ready_at(kind).filter(|_| !wallet.is_available(kind, now)) {
        Some(ready_at) => format!(
            "{payout_line}\n{}\n{}",
            pretty_message(icon::ALARM, time::describe_absolute(ready_at)),
            pretty_message(icon::TIMER, time::describe_relative(ready_at)),
        ),
        None => {
            let next_reset = time::next_reset_from(now, kind.reset_period(), &RESET_TIME);
            format!(
                "{}\n{payout_line}\n{}",
                pretty_message(icon::CHECK, "Ready to claim"),
                pretty_message(icon::ALARM, time::describe_absolute(next_reset)),
            )
        }
    }
}

fn format_claim_message(coins: i64, gems: Option<i64>) -> String {
    let coin_line = pretty_message(icon::COIN, format!("+{} coins", format_number(coins)));
    let gem_line = match gems {
        Some(amount) => pretty_message(icon::GEM, format!("+{amount} gems")),
        None => pretty_message(icon::GEM, "No gems this time"),
    };
    format!(
        "{}\n{coin_line}\n{gem_line}",
        pretty_message(icon::GIFT, "Reward claimed")
    )
}

fn format_cooldown_message(ready_at: DateTime<Utc>) -> String {
    format!(
        "{}\n{}",
        pretty_message(icon::ERROR, "Still on cooldown"),
        pretty_message(icon::TIMER, time::describe_relative(ready_at)),
    )
}

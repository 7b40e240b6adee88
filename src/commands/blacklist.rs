use crate::{
    Context, Error,
    config::PAGINATION_TIMEOUT,
    constants::{colors, icon},
    database::{self, BlacklistEntryModel},
    functions::{
        format::{
            discord::{bold, inline_code, mention},
            pretty_message,
        },
        time,
        ui::pagination::paginate,
    },
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use serenity::builder::CreateEmbedFooter;

const LIST_PAGE_SIZE: usize = 10;
const LIST_FETCH_LIMIT: i64 = 50;

/// Owner tools for the global blacklist.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Staff",
    interaction_context = "Guild",
    owners_only,
    ephemeral = true,
    subcommands(
        "blacklist_add",
        "blacklist_remove",
        "blacklist_info",
        "blacklist_list"
    )
)]
pub async fn blacklist(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Block a user from every command.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "add",
    category = "Staff",
    owners_only,
    ephemeral = true
)]
pub async fn blacklist_add(
    ctx: Context<'_>,
    #[description = "User to block"] user: serenity::User,
    #[description = "Reason shown to the user"] reason: Option<String>,
    #[description = "How long, e.g. 30m, 12h, 7d or 2w (permanent if empty)"] duration: Option<
        String,
    >,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    if user.id == ctx.author().id {
        ctx.say(pretty_message(icon::ERROR, "You can't blacklist yourself."))
            .await?;
        return Ok(());
    }

    if ctx.framework().options().owners.contains(&user.id) {
        ctx.say(pretty_message(icon::ERROR, "Bot owners can't be blacklisted."))
            .await?;
        return Ok(());
    }

    let now = Utc::now();
    let expires_at = match duration.as_deref() {
        Some(raw) => match time::parse_duration(raw) {
            Some(length) => Some(now + length),
            None => {
                ctx.say(pretty_message(
                    icon::ERROR,
                    format!(
                        "{} isn't a valid duration. Use something like `30m`, `12h`, `7d` or `2w`.",
                        inline_code(raw)
                    ),
                ))
                .await?;
                return Ok(());
            }
        },
        None => None,
    };

    let discord_id = user.id.get() as i64;
    let mut conn = ctx.data().database.acquire().await?;
    let result = match database::blacklist::find_active(&mut conn, discord_id, now).await? {
        Some(existing) => Err(existing),
        None => Ok(database::blacklist::insert(
            &mut conn,
            discord_id,
            ctx.author().id.get() as i64,
            reason,
            expires_at,
        )
        .await?),
    };
    drop(conn);

    let (content, embed) = match result {
        Ok(entry) => {
            tracing::info!(
                discord_id,
                moderator = ctx.author().id.get(),
                expires_at = ?entry.expires_at,
                "user blacklisted"
            );
            (
                pretty_message(icon::CHECK, format!("{} is now blacklisted.", user.tag())),
                entry_embed(&entry, format!("{} User blocked", icon::CHECK), colors::MINT),
            )
        }
        Err(existing) => (
            pretty_message(icon::MINUS, format!("{} was already blacklisted.", user.tag())),
            entry_embed(
                &existing,
                format!("{} Already blacklisted", icon::MINUS),
                colors::MOON,
            ),
        ),
    };

    ctx.send(poise::CreateReply::default().content(content).embed(embed))
        .await?;

    Ok(())
}

/// Lift a user's block.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "remove",
    category = "Staff",
    owners_only,
    ephemeral = true
)]
pub async fn blacklist_remove(
    ctx: Context<'_>,
    #[description = "User to unblock"] user: serenity::User,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let discord_id = user.id.get() as i64;
    let mut conn = ctx.data().database.acquire().await?;
    let removed = database::blacklist::delete_by_discord_id(&mut conn, discord_id).await? > 0;
    drop(conn);

    let content = if removed {
        tracing::info!(discord_id, moderator = ctx.author().id.get(), "user unblacklisted");
        pretty_message(icon::CHECK, format!("{} was removed from the blacklist.", user.tag()))
    } else {
        pretty_message(icon::MINUS, format!("{} wasn't blacklisted.", user.tag()))
    };
    ctx.say(content).await?;

    Ok(())
}

/// Show a user's blacklist entry.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "info",
    category = "Staff",
    owners_only,
    ephemeral = true
)]
pub async fn blacklist_info(
    ctx: Context<'_>,
    #[description = "User to look up"] user: serenity::User,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let mut conn = ctx.data().database.acquire().await?;
    let entry =
        database::blacklist::find_active(&mut conn, user.id.get() as i64, Utc::now()).await?;
    drop(conn);

    match entry {
        Some(entry) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(pretty_message(icon::CHECK, format!("{} is blacklisted.", user.tag())))
                    .embed(entry_embed(
                        &entry,
                        format!("{} Entry found", icon::CHECK),
                        colors::MINT,
                    )),
            )
            .await?;
        }
        None => {
            ctx.say(pretty_message(
                icon::MINUS,
                format!("{} has no blacklist entry.", user.tag()),
            ))
            .await?;
        }
    }

    Ok(())
}

/// List the most recent blacklist entries.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "list",
    category = "Staff",
    owners_only,
    ephemeral = true
)]
pub async fn blacklist_list(
    ctx: Context<'_>,
    #[description = "Starting page (1 = newest)"] page: Option<u32>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let now = Utc::now();
    let mut conn = ctx.data().database.acquire().await?;
    let entries: Vec<BlacklistEntryModel> =
        database::blacklist::list_recent(&mut conn, LIST_FETCH_LIMIT, 0)
            .await?
            .into_iter()
            .filter(|entry| !entry.is_expired(now))
            .collect();
    drop(conn);

    if entries.is_empty() {
        ctx.say(pretty_message(icon::MINUS, "Nobody is blacklisted right now."))
            .await?;
        return Ok(());
    }

    let pages = build_pages(&entries);
    let initial_page = (page.unwrap_or(1).max(1) as usize - 1).min(pages.len() - 1);
    let visible_entries = entries.len();

    paginate(
        ctx,
        pages.len(),
        PAGINATION_TIMEOUT,
        true,
        initial_page,
        move |current_page, total_pages| {
            let embed = serenity::CreateEmbed::new()
                .title(format!("{} Blacklisted users", icon::BELL))
                .colour(colors::MOON)
                .description(pages[current_page].clone())
                .footer(CreateEmbedFooter::new(format!(
                    "Page {}/{} · {visible_entries} most recent entries (max {LIST_FETCH_LIMIT})",
                    current_page + 1,
                    total_pages,
                )));
            (embed, Vec::new())
        },
    )
    .await
}

fn build_pages(entries: &[BlacklistEntryModel]) -> Vec<String> {
    entries
        .chunks(LIST_PAGE_SIZE)
        .enumerate()
        .map(|(page_idx, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    let position = page_idx * LIST_PAGE_SIZE + idx + 1;
                    format!("{}\n{}", bold(format!("#{position}")), entry_lines(entry))
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .collect()
}

fn entry_embed(
    entry: &BlacklistEntryModel,
    title: String,
    colour: serenity::Colour,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .colour(colour)
        .description(entry_lines(entry))
}

fn entry_lines(entry: &BlacklistEntryModel) -> String {
    let registered = time::describe_relative_from_str(&entry.created_at)
        .unwrap_or_else(|| entry.created_at.clone());
    let expires = entry
        .expires_datetime()
        .map(|expires| format!("Expires {}", time::describe_relative(expires)))
        .unwrap_or_else(|| "Permanent".to_string());

    [
        pretty_message(icon::BELL, format!("User: {}", mention(entry.discord_id))),
        pretty_message(
            icon::HASTAG,
            format!(
                "Reason: {}",
                entry.reason.as_deref().unwrap_or("No reason given")
            ),
        ),
        pretty_message(icon::PLUS, format!("Moderator: {}", mention(entry.moderator_id))),
        pretty_message(icon::TIMER, format!("Registered {registered}")),
        pretty_message(icon::ALARM, expires),
    ]
    .join("\n")
}

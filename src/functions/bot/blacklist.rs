use crate::{
    Context, Error,
    constants::{colors, icon},
    database::{self, BlacklistEntryModel},
    functions::{
        format::{discord::mention, pretty_message},
        time,
    },
};
use chrono::Utc;
use poise::serenity_prelude as serenity;

/// Command check run before every command.
///
/// Owners and bots always pass. Anyone else with an active entry gets a notice and the
/// command is skipped.
pub async fn enforce_global_blacklist(ctx: Context<'_>) -> Result<bool, Error> {
    let author = ctx.author();
    if author.bot || ctx.framework().options().owners.contains(&author.id) {
        return Ok(true);
    }

    let discord_id = author.id.get() as i64;
    let mut conn = ctx.data().database.acquire().await?;
    let Some(entry) = database::blacklist::find_active(&mut conn, discord_id, Utc::now()).await?
    else {
        return Ok(true);
    };
    drop(conn);

    tracing::debug!(
        discord_id,
        command = %ctx.command().qualified_name,
        "refused blacklisted user"
    );
    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Access blocked", icon::ERROR))
        .description(notice_lines(&entry).join("\n"))
        .colour(colors::CRIMSON);
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(false)
}

fn notice_lines(entry: &BlacklistEntryModel) -> Vec<String> {
    let mut lines = vec![pretty_message(
        icon::ERROR,
        "You are blacklisted and can't use my commands.",
    )];
    if let Some(reason) = entry.reason.as_deref() {
        lines.push(pretty_message(icon::HASTAG, format!("Reason: {reason}")));
    }
    lines.push(pretty_message(
        icon::HAMMER,
        format!("Moderator: {}", mention(entry.moderator_id)),
    ));
    lines.push(match entry.expires_datetime() {
        Some(expires) => pretty_message(
            icon::ALARM,
            format!("Lifted {}", time::describe_relative(expires)),
        ),
        None => pretty_message(icon::ALARM, "This block doesn't expire."),
    });
    lines.push(String::new());
    lines.push(pretty_message(
        icon::PLUS,
        "Reach out to the bot owners if you think this is a mistake.",
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(reason: Option<&str>, expires_at: Option<&str>) -> BlacklistEntryModel {
        BlacklistEntryModel {
            id: 1,
            discord_id: 10,
            moderator_id: 20,
            reason: reason.map(str::to_string),
            expires_at: expires_at.map(str::to_string),
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn notice_mentions_reason_and_expiry() {
        let lines = notice_lines(&entry(Some("spam"), Some("2026-02-01T00:00:00+00:00")));
        assert!(lines.iter().any(|line| line.ends_with("Reason: spam")));
        assert!(lines.iter().any(|line| line.contains("<t:1769904000:R>")));
    }

    #[test]
    fn permanent_blocks_say_so() {
        let lines = notice_lines(&entry(None, None));
        assert!(!lines.iter().any(|line| line.contains("Reason")));
        assert!(lines.iter().any(|line| line.contains("doesn't expire")));
    }
}

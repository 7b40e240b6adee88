use crate::{
    Data, Error,
    constants::colors,
    functions::format::discord::inline_code,
    game::weather,
};
use chrono::Utc;
use poise::{
    self, BoxFuture,
    serenity_prelude::{self as serenity, Mentionable},
};
use tokio::time::{Duration, sleep};

const CARD_LIFETIME: Duration = Duration::from_secs(30);

pub fn event_handler<'a>(
    ctx: &'a serenity::Context,
    framework: poise::FrameworkContext<'a, Data, Error>,
    event: &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move { handle_mention(ctx, framework, event).await })
}

/// Answers a bare mention of the bot with a short info card.
async fn handle_mention(
    ctx: &serenity::Context,
    framework: poise::FrameworkContext<'_, Data, Error>,
    event: &serenity::FullEvent,
) -> Result<(), Error> {
    let serenity::FullEvent::Message { new_message } = event else {
        return Ok(());
    };

    if new_message.author.bot || new_message.guild_id.is_none() {
        return Ok(());
    }

    let bot_id = framework.bot_id.get();
    let trimmed = new_message.content.trim();
    if trimmed != format!("<@{bot_id}>") && trimmed != format!("<@!{bot_id}>") {
        return Ok(());
    }

    let prefixes = collect_literal_prefixes(&framework.options.prefix_options);
    let description = format!(
        "Hi {}, {}\n{}",
        new_message.author.mention(),
        format_prefix_sentence(&prefixes),
        format_help_hint(&prefixes),
    );

    let version = env!("CARGO_PKG_VERSION");
    let rust_version = option_env!("FUMO_RUSTC_VERSION").unwrap_or("unknown");
    let built = option_env!("FUMO_BUILT_AT")
        .and_then(|secs| secs.parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .map(|secs| format!("\nbuilt <t:{secs}:d>"))
        .unwrap_or_default();
    let shard_count = framework.shard_manager.runners.lock().await.len();
    let cache = &ctx.cache;
    let guild_count = cache.guild_count();
    let avatar_url = {
        let current = cache.current_user();
        current
            .avatar_url()
            .unwrap_or_else(|| current.default_avatar_url())
    };

    let mut conn = framework.user_data.database.acquire().await?;
    let players: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *conn)
        .await?;
    drop(conn);

    let version_field = format!(
        "{} {}\n{} {}{built}",
        inline_code("fumobot"),
        inline_code(version),
        inline_code("rust"),
        inline_code(rust_version),
    );
    let stats_field = format!(
        "{} server(s)\n{} player(s)\n{} shard(s)",
        inline_code(guild_count.to_string()),
        inline_code(players.to_string()),
        inline_code(shard_count.to_string()),
    );

    let embed = serenity::CreateEmbed::new()
        .description(description)
        .thumbnail(avatar_url)
        .color(colors::MOON)
        .field("Versions", version_field, true)
        .field("Stats", stats_field, true)
        .field("Weather", weather::weather_at(Utc::now()).describe(), false)
        .footer(serenity::CreateEmbedFooter::new(
            "Automatic reply, removed in 30s",
        ));

    let response = new_message
        .channel_id
        .send_message(ctx, serenity::CreateMessage::new().embed(embed))
        .await?;

    let http = ctx.http.clone();
    let channel_id = response.channel_id;
    let message_id = response.id;
    tokio::spawn(async move {
        sleep(CARD_LIFETIME).await;
        if let Err(err) = channel_id.delete_message(&http, message_id).await {
            tracing::debug!(error = %err, "mention card already gone");
        }
    });

    Ok(())
}

fn collect_literal_prefixes(options: &poise::PrefixFrameworkOptions<Data, Error>) -> Vec<String> {
    let mut prefixes = Vec::new();

    if let Some(prefix) = options.prefix.as_deref() {
        prefixes.push(prefix.to_string());
    }

    for additional in &options.additional_prefixes {
        if let poise::Prefix::Literal(prefix) = additional {
            prefixes.push((*prefix).to_string());
        }
    }

    prefixes
}

fn format_prefix_sentence(prefixes: &[String]) -> String {
    let quoted: Vec<String> = prefixes.iter().map(inline_code).collect();
    match quoted.as_slice() {
        [] => "I only answer slash commands.".to_string(),
        [single] => format!("my prefix is {single}."),
        [head @ .., last] => format!("my prefixes are {} and {last}.", head.join(", ")),
    }
}

fn format_help_hint(prefixes: &[String]) -> String {
    match prefixes.first() {
        Some(prefix) => format!(
            "Use {} or {} to see what I can do.",
            inline_code(format!("{prefix}help")),
            inline_code("/help")
        ),
        None => format!("Use {} to see what I can do.", inline_code("/help")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_sentences_read_naturally() {
        assert_eq!(format_prefix_sentence(&[]), "I only answer slash commands.");
        assert_eq!(format_prefix_sentence(&[".".into()]), "my prefix is `.`.");
        assert_eq!(
            format_prefix_sentence(&[".".into(), "f!".into(), "?".into()]),
            "my prefixes are `.`, `f!` and `?`."
        );
    }
}

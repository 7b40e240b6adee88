use crate::{Data, Error};
use poise::{self, BoxFuture, serenity_prelude as serenity};

/// Logs shard and guild lifecycle changes.
pub fn event_handler<'a>(
    _ctx: &'a serenity::Context,
    _framework: poise::FrameworkContext<'a, Data, Error>,
    event: &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        match event {
            serenity::FullEvent::ShardsReady { total_shards } => {
                tracing::info!(total_shards, "all shards ready");
            }
            serenity::FullEvent::GuildCreate { guild, is_new } => {
                if *is_new == Some(true) {
                    tracing::info!(guild = %guild.id, name = %guild.name, "joined guild");
                }
            }
            serenity::FullEvent::GuildDelete { incomplete, .. } => {
                if !incomplete.unavailable {
                    tracing::info!(guild = %incomplete.id, "left guild");
                }
            }
            serenity::FullEvent::Resume { .. } => {
                tracing::debug!("gateway session resumed");
            }
            _ => {}
        }
        Ok(())
    })
}

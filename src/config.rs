use crate::{Data, Error, functions::time::ResetTime};
use poise::serenity_prelude as serenity;
use std::time::Duration;

/// Daily boundary for rewards, quests and the shop rotation (21:00 UTC-3).
pub const RESET_TIME: ResetTime = ResetTime::brt(21, 0);

/// How long paginated embeds keep listening for button presses.
pub const PAGINATION_TIMEOUT: Duration = Duration::from_secs(180);

/// How long reward buttons stay clickable.
pub const REWARD_BUTTON_TIMEOUT: Duration = Duration::from_secs(90);

pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(45);

/// Declares which gateway intents the bot subscribes to.
pub fn gateway_intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Builds the prefix configuration shared by the Poise framework.
pub fn prefix_options() -> poise::PrefixFrameworkOptions<Data, Error> {
    poise::PrefixFrameworkOptions {
        prefix: Some(".".into()),
        additional_prefixes: vec![poise::Prefix::Literal("f!")],
        mention_as_prefix: false,
        ..Default::default()
    }
}

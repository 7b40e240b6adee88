use crate::{Error, commands, config, events, functions::bot::blacklist};
use poise::serenity_prelude as serenity;
use sqlx::SqlitePool;
use std::{collections::HashSet, path::PathBuf, sync::Arc};

pub struct Data {
    pub shard_manager: Arc<serenity::ShardManager>,
    pub database: SqlitePool,
    pub backup_dir: PathBuf,
    pub backup_keep: usize,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Settings resolved from the environment before the client starts
pub struct Settings {
    pub owners: Vec<u64>,
    pub backup_dir: PathBuf,
    pub backup_keep: usize,
}

/// Builds the Poise framework with all commands and the provided prefix options
pub fn build_framework(database: SqlitePool, settings: Settings) -> poise::Framework<Data, Error> {
    let owners = settings
        .owners
        .iter()
        .map(|id| serenity::UserId::new(*id))
        .collect();

    poise::Framework::builder()
        .options(framework_options(owners))
        .setup(move |ctx, ready, framework| {
            Box::pin(async move { setup_framework(ctx, ready, framework, database, settings).await })
        })
        .build()
}

pub async fn run_client(
    token: String,
    intents: serenity::GatewayIntents,
    framework: poise::Framework<Data, Error>,
) -> Result<(), Error> {
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;

    client.start_autosharded().await?;

    Ok(())
}

fn framework_options(owners: HashSet<serenity::UserId>) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands::load_all(),
        prefix_options: config::prefix_options(),
        owners,
        command_check: Some(|ctx| Box::pin(blacklist::enforce_global_blacklist(ctx))),
        on_error: |error| Box::pin(commands::util::command_error_handler(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                tracing::debug!(
                    command = %ctx.command().qualified_name,
                    user = %ctx.author().id,
                    "command invoked"
                );
            })
        },
        event_handler: |ctx, event, framework, _data| events::dispatch(ctx, framework, event),
        ..Default::default()
    }
}

async fn setup_framework(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<Data, Error>,
    database: SqlitePool,
    settings: Settings,
) -> Result<Data, Error> {
    register_commands(ctx, framework).await?;
    tracing::info!(
        user = %ready.user.name,
        guilds = ready.guilds.len(),
        "connected and ready"
    );

    Ok(Data {
        shard_manager: framework.shard_manager().clone(),
        database,
        backup_dir: settings.backup_dir,
        backup_keep: settings.backup_keep,
    })
}

async fn register_commands(
    ctx: &serenity::Context,
    framework: &poise::Framework<Data, Error>,
) -> Result<(), Error> {
    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
    tracing::info!(count = framework.options().commands.len(), "slash commands registered");
    Ok(())
}

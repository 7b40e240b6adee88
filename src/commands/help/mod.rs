use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::format::pretty_message,
};
use poise::serenity_prelude as serenity;
use serenity::AutocompleteChoice;
use std::collections::BTreeMap;

pub mod command_finder;
use command_finder::CommandFinder;

/// Show what I can do.
#[poise::command(
    slash_command,
    prefix_command,
    track_edits,
    aliases("h", "commands"),
    interaction_context = "Guild",
    category = "Utility"
)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to describe"]
    #[autocomplete = "help_autocomplete"]
    command: Option<String>,
) -> Result<(), Error> {
    match command.filter(|name| !name.trim().is_empty()) {
        Some(name) => send_command_help(ctx, &name).await?,
        None => send_overview(ctx).await?,
    }

    Ok(())
}

async fn send_overview(ctx: Context<'_>) -> Result<(), Error> {
    let finder = CommandFinder::new(&ctx);
    let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for command in finder.get_all_commands() {
        let category = command.category.as_deref().unwrap_or("Other");
        let description = command.description.as_deref().unwrap_or("No description");
        categories
            .entry(category)
            .or_default()
            .push(format!("`{}` {}", command.name, description));
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} FumoBOT commands", icon::BELL))
        .description(pretty_message(
            icon::GEAR,
            "Use `/help <command>` for the details of a command.",
        ))
        .colour(colors::MINT);

    for (category, lines) in categories {
        embed = embed.field(category, lines.join("\n"), false);
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

async fn send_command_help(ctx: Context<'_>, name: &str) -> Result<(), Error> {
    let finder = CommandFinder::new(&ctx);

    let Some(info) = finder.find_command(name) else {
        let embed = serenity::CreateEmbed::new()
            .description(pretty_message(
                icon::ERROR,
                format!("There is no command called `{name}`."),
            ))
            .colour(colors::CRIMSON);
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    };

    let command = info.subcommand.unwrap_or(info.command);
    let full_name = match info.subcommand {
        Some(subcommand) => format!("{} {}", info.command.name, subcommand.name),
        None => info.command.name.clone(),
    };
    let description = command
        .help_text
        .as_deref()
        .or(command.description.as_deref())
        .unwrap_or("No description");
    let category = command
        .category
        .as_deref()
        .or(info.command.category.as_deref())
        .unwrap_or("Other");

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} /{}", icon::BELL, full_name))
        .description(description)
        .colour(colors::MOON)
        .field(format!("{} Category", icon::GEAR), format!("`{category}`"), true);

    if !command.aliases.is_empty() {
        let aliases = command
            .aliases
            .iter()
            .map(|alias| format!("`{alias}`"))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field(format!("{} Aliases", icon::HASTAG), aliases, true);
    }

    if !command.parameters.is_empty() {
        let parameters = command
            .parameters
            .iter()
            .map(|param| {
                let marker = if param.required { "" } else { "?" };
                let description = param.description.as_deref().unwrap_or("No description");
                format!("`{}{marker}` {description}", param.name)
            })
            .collect::<Vec<_>>()
            .join("\n");
        embed = embed.field(format!("{} Parameters", icon::PLUS), parameters, false);
    }

    if !command.subcommands.is_empty() {
        let subcommands = command
            .subcommands
            .iter()
            .filter(|sub| !sub.hide_in_help)
            .map(|sub| format!("`{}`", sub.name))
            .collect::<Vec<_>>()
            .join(" ");
        embed = embed.field(format!("{} Subcommands", icon::SCROLL), subcommands, false);
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

async fn help_autocomplete(ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let finder = CommandFinder::new(&ctx);
    let lowercase = partial.to_ascii_lowercase();

    let mut matches = finder
        .get_all_command_names()
        .into_iter()
        .filter(|name| name.to_ascii_lowercase().contains(&lowercase))
        .collect::<Vec<_>>();
    matches.dedup();
    matches.truncate(25);

    matches
        .into_iter()
        .map(|name| AutocompleteChoice::new(name.clone(), name))
        .collect()
}

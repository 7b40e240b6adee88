use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::format::pretty_message,
};
use poise::serenity_prelude as serenity;
use std::time::Instant;

/// Check gateway and API latency.
#[poise::command(
    slash_command,
    prefix_command,
    interaction_context = "Guild",
    category = "Utility"
)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let start = Instant::now();
    let reply = ctx
        .say(pretty_message(icon::TIMER, "Pinging..."))
        .await?;
    let api_latency = start.elapsed();

    let shard_id = ctx.serenity_context().shard_id;
    let gateway_latency = {
        let runners = ctx.data().shard_manager.runners.lock().await;
        runners.get(&shard_id).and_then(|runner| runner.latency)
    };
    let gateway_line = match gateway_latency {
        Some(latency) => format!("Gateway: **{}** ms", latency.as_millis()),
        None => "Gateway: waiting for the first heartbeat".to_string(),
    };

    let embed = serenity::CreateEmbed::new()
        .colour(colors::MINT)
        .description(
            [
                pretty_message(icon::BELL, gateway_line),
                pretty_message(icon::ALARM, format!("API: **{}** ms", api_latency.as_millis())),
                pretty_message(icon::GEAR, format!("Shard: **{}**", shard_id.0)),
            ]
            .join("\n"),
        );

    reply
        .edit(ctx, poise::CreateReply::default().content("").embed(embed))
        .await?;

    Ok(())
}

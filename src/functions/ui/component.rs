use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::CreateActionRow;
use serenity::builder::CreateInteractionResponseMessage;

/// Replaces the embed and components of the message a button belongs to.
pub async fn update_component_message(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
    embed: serenity::CreateEmbed,
    components: Vec<CreateActionRow>,
) -> Result<(), Error> {
    respond(
        ctx,
        interaction,
        serenity::CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .embed(embed)
                .components(components),
        ),
    )
    .await
}

/// Accepts a click without changing the message.
pub async fn acknowledge(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
) -> Result<(), Error> {
    respond(ctx, interaction, serenity::CreateInteractionResponse::Acknowledge).await
}

async fn respond(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
    response: serenity::CreateInteractionResponse,
) -> Result<(), Error> {
    interaction
        .create_response(ctx.serenity_context(), response)
        .await?;
    Ok(())
}

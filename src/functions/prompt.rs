use crate::{Context, Error, config::CONFIRMATION_TIMEOUT, constants::icon};
use poise::serenity_prelude as serenity;
use serenity::builder::CreateInteractionResponseMessage;
use serenity::collector::ComponentInteractionCollector;
use serenity::{CreateActionRow, CreateButton};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Accepted,
    Declined,
    Timeout,
}

/// Asks the invoking user to confirm with buttons, then disables them.
///
/// The prompt message stays in place so callers can follow up with the result.
pub async fn confirmation_prompt(
    ctx: Context<'_>,
    content: impl Into<String>,
) -> Result<ConfirmationOutcome, Error> {
    let content = content.into();
    let accept_id = format!("{}_confirm_ok", ctx.id());
    let deny_id = format!("{}_confirm_no", ctx.id());

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(&content)
                .components(create_buttons(&accept_id, &deny_id, false))
                .ephemeral(true),
        )
        .await?;
    let message = reply.message().await?;

    let interaction = ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message.id)
        .filter({
            let accept_id = accept_id.clone();
            let deny_id = deny_id.clone();
            move |interaction| {
                interaction.data.custom_id == accept_id || interaction.data.custom_id == deny_id
            }
        })
        .timeout(CONFIRMATION_TIMEOUT)
        .await;

    let Some(interaction) = interaction else {
        reply
            .edit(
                ctx,
                poise::CreateReply::default()
                    .content(format!("{content}\n{} Timed out.", icon::TIMER))
                    .components(create_buttons(&accept_id, &deny_id, true)),
            )
            .await?;
        return Ok(ConfirmationOutcome::Timeout);
    };

    let accepted = interaction.data.custom_id == accept_id;
    let response = CreateInteractionResponseMessage::new()
        .content(&content)
        .components(create_buttons(&accept_id, &deny_id, true));
    interaction
        .create_response(
            ctx.serenity_context(),
            serenity::CreateInteractionResponse::UpdateMessage(response),
        )
        .await?;

    Ok(if accepted {
        ConfirmationOutcome::Accepted
    } else {
        ConfirmationOutcome::Declined
    })
}

fn create_buttons(accept_id: &str, deny_id: &str, disabled: bool) -> Vec<CreateActionRow> {
    let accept = CreateButton::new(accept_id)
        .label("Confirm")
        .style(serenity::ButtonStyle::Success)
        .disabled(disabled)
        .emoji(icon::CHECK.as_reaction());
    let deny = CreateButton::new(deny_id)
        .label("Cancel")
        .style(serenity::ButtonStyle::Danger)
        .disabled(disabled)
        .emoji(icon::ERROR.as_reaction());

    vec![CreateActionRow::Buttons(vec![accept, deny])]
}

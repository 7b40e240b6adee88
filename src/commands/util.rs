use crate::{
    Context, Data, Error,
    constants::{colors, icon},
    error::GameError,
    functions::format::pretty_message,
};
use poise::FrameworkError;
use poise::serenity_prelude as serenity;

/// Default error handler for application commands
pub async fn command_error_handler(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Command { ctx, error, .. } => {
            if let Some(game_error) = error.downcast_ref::<GameError>() {
                tracing::debug!(
                    command = %ctx.command().qualified_name,
                    reason = %game_error,
                    "command refused"
                );
                reply_error(ctx, game_error.to_string()).await;
                return;
            }

            tracing::error!(
                command = %ctx.command().qualified_name,
                user = %ctx.author().id,
                error = ?error,
                "command failed"
            );
            reply_error(
                ctx,
                "Something went wrong while running this command. Please try again in a moment.",
            )
            .await;
        }
        FrameworkError::CommandCheckFailed { error: None, .. } => {}
        other => {
            if let Err(err) = poise::builtins::on_error(other).await {
                tracing::error!(error = ?err, "error while handling command error");
            }
        }
    }
}

async fn reply_error(ctx: Context<'_>, message: impl Into<String>) {
    let embed = serenity::CreateEmbed::new()
        .colour(colors::CRIMSON)
        .description(pretty_message(icon::ERROR, message.into()));

    if let Err(err) = ctx
        .send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await
    {
        tracing::warn!(error = %err, "could not deliver error reply");
    }
}

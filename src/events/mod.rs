use crate::{Data, Error};
use poise::{self, BoxFuture, serenity_prelude as serenity};

pub mod lifecycle;
pub mod mention;

pub type EventHandler = for<'a> fn(
    &'a serenity::Context,
    poise::FrameworkContext<'a, Data, Error>,
    &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>>;

const HANDLERS: &[(&str, EventHandler)] = &[
    ("lifecycle", lifecycle::event_handler),
    ("mention", mention::event_handler),
];

/// Runs every handler; one failing handler doesn't stop the others.
pub fn dispatch<'a>(
    ctx: &'a serenity::Context,
    framework: poise::FrameworkContext<'a, Data, Error>,
    event: &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        for (name, handler) in HANDLERS {
            if let Err(err) = handler(ctx, framework, event).await {
                tracing::warn!(handler = *name, event = event.snake_case_name(), error = %err, "event handler failed");
            }
        }
        Ok(())
    })
}

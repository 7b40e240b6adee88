use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::{
        format::{format_multiplier, pretty_message},
        time,
    },
    game::{
        BoostKind, Factors,
        weather::{self, WeatherState},
    },
};
use chrono::Utc;
use poise::serenity_prelude as serenity;

const DEFAULT_FORECAST: usize = 4;

/// Current weather, season and the upcoming forecast.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Utility",
    interaction_context = "Guild"
)]
pub async fn weather(
    ctx: Context<'_>,
    #[description = "How many upcoming slots to show (1-12)"]
    #[min = 1]
    #[max = 12]
    slots: Option<usize>,
) -> Result<(), Error> {
    let now = Utc::now();
    let current = weather::weather_at(now);
    let season_factors = current.season.factors();

    let forecast = weather::forecast(now, slots.unwrap_or(DEFAULT_FORECAST).clamp(1, 12))
        .iter()
        .map(forecast_line)
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title(format!(
            "{} {}",
            current.primary.emoji(),
            current.describe()
        ))
        .colour(if current.combo.is_some() { colors::GOLD } else { colors::MOON })
        .description(format!(
            "{}\n{}",
            pretty_message(icon::TIMER, format!("Changes {}", time::describe_relative(current.ends_at()))),
            pretty_message(icon::CLOVER, format!("Season: **{}**", current.season)),
        ))
        .field("Weather boosts", describe_factors(current.factors()), true)
        .field("Season boosts", describe_factors(season_factors), true)
        .field(
            "Total",
            describe_factors(current.factors().combine(season_factors)),
            true,
        )
        .field("Forecast", forecast, false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn forecast_line(state: &WeatherState) -> String {
    format!(
        "{} {} {}",
        time::describe_absolute(state.starts_at()),
        state.primary.emoji(),
        state.describe()
    )
}

fn describe_factors(factors: Factors) -> String {
    BoostKind::ALL
        .into_iter()
        .map(|kind| format!("{}: {}", kind.label(), format_multiplier(factors.get(kind))))
        .collect::<Vec<_>>()
        .join("\n")
}

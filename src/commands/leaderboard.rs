use crate::{
    Context, Error,
    commands::choices::RankingChoice,
    constants::{colors, icon},
    database::{self, UserModel, user::Ranking},
    functions::format::{discord::mention, format_number, pretty_message},
};
use poise::serenity_prelude as serenity;

const TOP_PLAYERS: i64 = 10;

/// The richest and luckiest players.
#[poise::command(
    slash_command,
    prefix_command,
    aliases("top", "lb"),
    category = "Economy",
    interaction_context = "Guild"
)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Rank by coins, gems or rolls"] by: Option<RankingChoice>,
) -> Result<(), Error> {
    let ranking = Ranking::from(by.unwrap_or_default());

    let mut conn = ctx.data().database.acquire().await?;
    let players = database::user::top(&mut conn, ranking, TOP_PLAYERS).await?;
    drop(conn);

    let description = if players.is_empty() {
        pretty_message(icon::MINUS, "Nobody is playing yet.")
    } else {
        players
            .iter()
            .enumerate()
            .map(|(idx, player)| {
                format!(
                    "**#{}** {} · {}",
                    idx + 1,
                    mention(player.discord_id),
                    score(player, ranking)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Top {TOP_PLAYERS} by {}", icon::TROPHY, title(ranking)))
        .colour(colors::GOLD)
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn title(ranking: Ranking) -> &'static str {
    match ranking {
        Ranking::Coins => "coins",
        Ranking::Gems => "gems",
        Ranking::Rolls => "rolls",
    }
}

fn score(player: &UserModel, ranking: Ranking) -> String {
    match ranking {
        Ranking::Coins => format!("{} {}", icon::COIN, format_number(player.coins)),
        Ranking::Gems => format!("{} {}", icon::GEM, format_number(player.gems)),
        Ranking::Rolls => format!("{} {}", icon::DICE, format_number(player.total_rolls)),
    }
}

use crate::{
    Context, Error,
    commands::{
        autocomplete,
        choices::{RarityChoice, VariantChoice},
    },
    config::PAGINATION_TIMEOUT,
    constants::{colors, icon},
    database::FumoStackModel,
    functions::{
        format::{format_number, pretty_message},
        prompt::{ConfirmationOutcome, confirmation_prompt},
        ui::pagination::paginate,
    },
    game::{Rarity, Variant},
    services::inventory,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use serenity::builder::CreateEmbedFooter;

const PAGE_SIZE: usize = 15;

/// Your fumo collection.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Collection",
    interaction_context = "Guild",
    subcommands("list", "sell", "sellall")
)]
pub async fn inventory(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Browse your fumos grouped by rarity.
#[poise::command(slash_command, prefix_command, aliases("inv"), category = "Collection")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let mut stacks = inventory::list(&ctx.data().database, ctx.author().id.get() as i64).await?;
    if stacks.is_empty() {
        ctx.say(pretty_message(
            icon::BOX,
            "Your inventory is empty. Try `/gacha roll`!",
        ))
        .await?;
        return Ok(());
    }

    stacks.sort_by(|a, b| {
        b.rarity()
            .cmp(&a.rarity())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.variant().cmp(&b.variant()))
    });
    let total_copies: i64 = stacks.iter().map(|stack| stack.quantity).sum();
    let pages = build_pages(&stacks);
    let author = ctx.author().name.clone();

    paginate(
        ctx,
        pages.len(),
        PAGINATION_TIMEOUT,
        true,
        0,
        move |current_page, total_pages| {
            let embed = serenity::CreateEmbed::new()
                .title(format!("{} {author}'s fumos", icon::BOX))
                .colour(colors::MOON)
                .description(pages[current_page].clone())
                .footer(CreateEmbedFooter::new(format!(
                    "Page {}/{total_pages} · {} fumos",
                    current_page + 1,
                    format_number(total_copies)
                )));
            (embed, Vec::new())
        },
    )
    .await
}

/// Sell spare copies of one fumo.
#[poise::command(slash_command, prefix_command, category = "Collection")]
pub async fn sell(
    ctx: Context<'_>,
    #[description = "Fumo name"]
    #[autocomplete = "autocomplete::fumo_name"]
    name: String,
    #[description = "Variant (default normal)"] variant: Option<VariantChoice>,
    #[description = "How many copies (default 1)"]
    #[min = 1]
    amount: Option<i64>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let variant = variant.map(Variant::from).unwrap_or(Variant::Normal);
    let sale = inventory::sell(
        &ctx.data().database,
        ctx.author().id.get() as i64,
        &name,
        variant,
        amount.unwrap_or(1),
        Utc::now(),
    )
    .await?;

    ctx.say(sale_message(sale.sold, sale.coins, sale.user.coins))
        .await?;

    Ok(())
}

/// Sell every spare normal copy of a rarity.
#[poise::command(slash_command, prefix_command, category = "Collection")]
pub async fn sellall(
    ctx: Context<'_>,
    #[description = "Rarity to sell"] rarity: RarityChoice,
) -> Result<(), Error> {
    let rarity = Rarity::from(rarity);
    let pool = &ctx.data().database;
    let discord_id = ctx.author().id.get() as i64;

    let (stacks, copies, coins) = inventory::preview_rarity(pool, discord_id, rarity).await?;
    if copies == 0 {
        ctx.send(
            poise::CreateReply::default()
                .content(pretty_message(
                    icon::MINUS,
                    format!("You have no spare normal {rarity} fumos."),
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let question = pretty_message(
        icon::COIN,
        format!(
            "Sell **{copies}** {rarity} fumos from {stacks} stack(s) for **{}** coins?",
            format_number(coins)
        ),
    );
    let outcome = confirmation_prompt(ctx, question).await?;
    if outcome != ConfirmationOutcome::Accepted {
        ctx.send(
            poise::CreateReply::default()
                .content(pretty_message(icon::MINUS, "Nothing was sold."))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let sale = inventory::sell_rarity(pool, discord_id, rarity, Utc::now()).await?;
    ctx.send(
        poise::CreateReply::default()
            .content(sale_message(sale.sold, sale.coins, sale.user.coins))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

fn sale_message(sold: i64, coins: i64, balance: i64) -> String {
    pretty_message(
        icon::COIN,
        format!(
            "Sold **{sold}** fumo(s) for **{}** coins. Balance: {}",
            format_number(coins),
            format_number(balance)
        ),
    )
}

fn stack_line(stack: &FumoStackModel) -> String {
    let farming = if stack.farming > 0 {
        format!(" ({} farming)", stack.farming)
    } else {
        String::new()
    };
    format!(
        "{} x{}{farming} · {} coins",
        stack.display_name(),
        stack.quantity,
        format_number(inventory::unit_price(stack))
    )
}

/// One block per rarity, split into pages of at most `PAGE_SIZE` stacks.
fn build_pages(stacks: &[FumoStackModel]) -> Vec<String> {
    stacks
        .chunks(PAGE_SIZE)
        .map(|chunk| {
            let mut lines = Vec::new();
            let mut current: Option<Rarity> = None;
            for stack in chunk {
                if current != Some(stack.rarity()) {
                    if current.is_some() {
                        lines.push(String::new());
                    }
                    current = Some(stack.rarity());
                    lines.push(format!("**{}**", stack.rarity()));
                }
                lines.push(stack_line(stack));
            }
            lines.join("\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str, rarity: Rarity, quantity: i64) -> FumoStackModel {
        FumoStackModel {
            id: 0,
            user_id: 1,
            name: name.to_string(),
            rarity: rarity.db_name().to_string(),
            variant: Variant::Normal.db_name().to_string(),
            quantity,
            farming: 0,
        }
    }

    #[test]
    fn pages_group_by_rarity_and_split() {
        let mut stacks = vec![stack("Reimu", Rarity::Legendary, 1)];
        stacks.extend((0..PAGE_SIZE).map(|idx| stack(&format!("Cirno {idx}"), Rarity::Common, 2)));

        let pages = build_pages(&stacks);
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with("**Legendary**\nReimu x1"));
        assert!(pages[0].contains("\n\n**Common**\n"));
        assert!(pages[1].starts_with("**Common**\n"));
    }
}

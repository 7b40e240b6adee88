use crate::{Context, game::catalog};
use poise::serenity_prelude::AutocompleteChoice;

const MAX_CHOICES: usize = 25;

/// Suggests fumo names from the catalog.
pub async fn fumo_name(_ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let needle = partial.trim().to_ascii_lowercase();
    catalog::FUMOS
        .iter()
        .filter(|fumo| fumo.name.to_ascii_lowercase().contains(&needle))
        .take(MAX_CHOICES)
        .map(|fumo| {
            AutocompleteChoice::new(format!("{} ({})", fumo.name, fumo.rarity), fumo.name)
        })
        .collect()
}

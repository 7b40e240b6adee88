use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::collector::ComponentInteractionCollector;
use serenity::{ButtonStyle, CreateActionRow, CreateButton};

use crate::{
    Context, Error,
    constants::{emoji::Icon, icon},
};

use super::component::{acknowledge, update_component_message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Nav {
    First,
    Prev,
    Home,
    Next,
    Last,
}

impl Nav {
    const ALL: [Self; 5] = [Self::First, Self::Prev, Self::Home, Self::Next, Self::Last];

    fn suffix(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Home => "home",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    fn icon(self) -> Icon {
        match self {
            Self::First => icon::CARET_DOUBLE_LEFT,
            Self::Prev => icon::CARET_LEFT,
            Self::Home => icon::HOUSE,
            Self::Next => icon::CARET_RIGHT,
            Self::Last => icon::CARET_DOUBLE_RIGHT,
        }
    }
}

/// Page cursor; `home` is the page the listing opened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pager {
    current: usize,
    home: usize,
    total: usize,
}

impl Pager {
    fn new(total: usize, home: usize) -> Self {
        let home = home.min(total.saturating_sub(1));
        Self {
            current: home,
            home,
            total,
        }
    }

    fn last(&self) -> usize {
        self.total.saturating_sub(1)
    }

    fn go(&mut self, nav: Nav) {
        self.current = match nav {
            Nav::First => 0,
            Nav::Prev => self.current.saturating_sub(1),
            Nav::Home => self.home,
            Nav::Next => (self.current + 1).min(self.last()),
            Nav::Last => self.last(),
        };
    }

    fn is_disabled(&self, nav: Nav) -> bool {
        match nav {
            Nav::First | Nav::Prev => self.current == 0,
            Nav::Next | Nav::Last => self.current >= self.last(),
            Nav::Home => self.current == self.home,
        }
    }
}

/// Sends page `initial_page` and lets the author flip through `total_pages` with buttons.
///
/// `build_page(index, total)` renders one page. When the collector times out the message
/// keeps the page it was on, without navigation.
pub async fn paginate<F>(
    ctx: Context<'_>,
    total_pages: usize,
    timeout: Duration,
    ephemeral: bool,
    initial_page: usize,
    mut build_page: F,
) -> Result<(), Error>
where
    F: FnMut(usize, usize) -> (serenity::CreateEmbed, Vec<CreateActionRow>),
{
    if total_pages == 0 {
        return Ok(());
    }

    let mut pager = Pager::new(total_pages, initial_page);
    let id_prefix = format!("{}_pg_", ctx.id());

    let (embed, mut components) = build_page(pager.current, total_pages);
    if total_pages > 1 {
        components.push(navigation_row(&id_prefix, &pager));
    }

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(components)
                .ephemeral(ephemeral),
        )
        .await?;
    if total_pages == 1 {
        return Ok(());
    }
    let message = reply.message().await?;

    while let Some(interaction) = ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message.id)
        .timeout(timeout)
        .await
    {
        let Some(nav) = interaction
            .data
            .custom_id
            .strip_prefix(&id_prefix)
            .and_then(|suffix| Nav::ALL.into_iter().find(|nav| nav.suffix() == suffix))
        else {
            acknowledge(&ctx, &interaction).await?;
            continue;
        };

        pager.go(nav);
        let (embed, mut components) = build_page(pager.current, total_pages);
        components.push(navigation_row(&id_prefix, &pager));
        update_component_message(&ctx, &interaction, embed, components).await?;
    }

    let (embed, components) = build_page(pager.current, total_pages);
    reply
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(embed)
                .components(components),
        )
        .await?;

    Ok(())
}

fn navigation_row(id_prefix: &str, pager: &Pager) -> CreateActionRow {
    CreateActionRow::Buttons(
        Nav::ALL
            .into_iter()
            .map(|nav| {
                CreateButton::new(format!("{id_prefix}{}", nav.suffix()))
                    .style(ButtonStyle::Secondary)
                    .emoji(nav.icon().as_reaction())
                    .disabled(pager.is_disabled(nav))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_clamps_to_bounds() {
        let mut pager = Pager::new(3, 7);
        assert_eq!(pager.current, 2);
        assert!(pager.is_disabled(Nav::Next));
        assert!(pager.is_disabled(Nav::Home));

        pager.go(Nav::Next);
        assert_eq!(pager.current, 2);
        pager.go(Nav::First);
        assert_eq!(pager.current, 0);
        assert!(pager.is_disabled(Nav::Prev));
        pager.go(Nav::Prev);
        assert_eq!(pager.current, 0);
        pager.go(Nav::Home);
        assert_eq!(pager.current, 2);
    }
}

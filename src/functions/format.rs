use poise::serenity_prelude::utils::MessageBuilder;
use std::fmt::Display;

/// Formats an integer using `,` as thousands separator
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    if value < 0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// `1.5` becomes `x1.50`
pub fn format_multiplier(value: f64) -> String {
    format!("x{value:.2}")
}

/// Small probabilities keep their significant digits.
pub fn format_percent(value: f64) -> String {
    if value >= 1.0 {
        format!("{value:.2}%")
    } else if value >= 0.01 {
        format!("{value:.3}%")
    } else {
        format!("{value:.6}%")
    }
}

/// Builds a lightweight "emoji | message" string used across embeds/responses.
pub fn pretty_message(emoji: impl Display, message: impl Display) -> String {
    format!("{} | {}", emoji, message)
}

/// Helper functions to format Discord messages with Markdown safely.
pub mod discord {

    use super::MessageBuilder;
    use poise::serenity_prelude::UserId;

    /// Formats a raw Discord user mention (`<@id>`).
    pub fn mention(id: impl Into<i64>) -> String {
        build(|builder| {
            let user_id = UserId::new(id.into() as u64);
            builder.mention(&user_id);
        })
    }

    /// Wraps text with Discord's inline bold formatting (`**text**`).
    pub fn bold(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_bold_safe(text.as_ref());
        })
    }

    /// Wraps text with inline code markers (`` `text` ``).
    pub fn inline_code(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_mono_safe(text.as_ref());
        })
    }

    fn build(apply: impl FnOnce(&mut MessageBuilder)) -> String {
        let mut builder = MessageBuilder::new();
        apply(&mut builder);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_get_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(-1_234_567), "-1,234,567");
        assert_eq!(format_number(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn tiny_odds_stay_readable() {
        assert_eq!(format_percent(42.0), "42.00%");
        assert_eq!(format_percent(0.5), "0.500%");
        assert_eq!(format_percent(0.000_5), "0.000500%");
        assert_eq!(format_multiplier(1.5), "x1.50");
    }
}

use serenity::all::ReactionType;
use std::fmt;

/// A unicode emoji used as an icon in embeds and on buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Icon {
    glyph: &'static str,
}

impl Icon {
    pub const fn new(glyph: &'static str) -> Self {
        Self { glyph }
    }

    pub fn as_reaction(&self) -> ReactionType {
        ReactionType::Unicode(self.glyph.to_string())
    }

    pub fn as_str(&self) -> &'static str {
        self.glyph
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph)
    }
}

pub mod icon {
    use super::Icon;

    pub const CHECK: Icon = Icon::new("✅");
    pub const ERROR: Icon = Icon::new("❌");
    pub const BELL: Icon = Icon::new("🔔");
    pub const GEAR: Icon = Icon::new("⚙️");
    pub const PLUS: Icon = Icon::new("➕");
    pub const MINUS: Icon = Icon::new("➖");
    pub const GIFT: Icon = Icon::new("🎁");
    pub const COIN: Icon = Icon::new("🪙");
    pub const GEM: Icon = Icon::new("💎");
    pub const ALARM: Icon = Icon::new("⏰");
    pub const TIMER: Icon = Icon::new("⏳");
    pub const HASTAG: Icon = Icon::new("#️⃣");
    pub const HAMMER: Icon = Icon::new("🔨");
    pub const HOUSE: Icon = Icon::new("🏠");
    pub const DICE: Icon = Icon::new("🎲");
    pub const CLOVER: Icon = Icon::new("🍀");
    pub const SPARKLES: Icon = Icon::new("✨");
    pub const SEEDLING: Icon = Icon::new("🌱");
    pub const PAW: Icon = Icon::new("🐾");
    pub const EGG: Icon = Icon::new("🥚");
    pub const CART: Icon = Icon::new("🛒");
    pub const SCROLL: Icon = Icon::new("📜");
    pub const TROPHY: Icon = Icon::new("🏆");
    pub const BOX: Icon = Icon::new("📦");
    pub const FLOPPY: Icon = Icon::new("💾");
    pub const POTION: Icon = Icon::new("🧪");
    pub const CARET_RIGHT: Icon = Icon::new("▶️");
    pub const CARET_LEFT: Icon = Icon::new("◀️");
    pub const CARET_DOUBLE_RIGHT: Icon = Icon::new("⏩");
    pub const CARET_DOUBLE_LEFT: Icon = Icon::new("⏪");
}

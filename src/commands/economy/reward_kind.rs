use crate::{
    constants::{emoji::Icon, icon},
    game::reward::RewardKind,
};

/// Button wiring for the reward kinds.
pub trait RewardButton: Sized {
    fn custom_id(self) -> &'static str;
    fn button_emoji(self) -> Icon;
    fn from_custom_id(id: &str) -> Option<Self>;
}

impl RewardButton for RewardKind {
    fn custom_id(self) -> &'static str {
        match self {
            Self::Daily => "eco_daily",
            Self::Weekly => "eco_weekly",
            Self::Monthly => "eco_monthly",
        }
    }

    fn button_emoji(self) -> Icon {
        match self {
            Self::Daily => icon::COIN,
            Self::Weekly => icon::GIFT,
            Self::Monthly => icon::GEM,
        }
    }

    fn from_custom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.custom_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_ids_are_distinct_and_reversible() {
        for kind in RewardKind::ALL {
            assert_eq!(RewardKind::from_custom_id(kind.custom_id()), Some(kind));
        }
        assert_eq!(RewardKind::from_custom_id("eco_yearly"), None);
    }
}

use super::item::{Item, Price};
use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const MAX_PURCHASE: i64 = 100;
pub const FEATURED_DISCOUNT_PERCENT: i64 = 25;
const SHOP_SEED: u64 = 0x0f0e_5b09_d15c_0a57;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listing {
    pub item: Item,
    pub price: Price,
    pub featured: bool,
}

/// The discounted item of a shop day.
pub fn featured_item(day: NaiveDate) -> Item {
    let mut rng = StdRng::seed_from_u64(SHOP_SEED ^ day.num_days_from_ce() as u64);
    Item::ALL[rng.random_range(0..Item::ALL.len())]
}

pub fn listings(day: NaiveDate) -> Vec<Listing> {
    let featured = featured_item(day);
    Item::ALL
        .into_iter()
        .map(|item| {
            let base = item.price();
            if item == featured {
                let discounted = base.amount() * (100 - FEATURED_DISCOUNT_PERCENT) / 100;
                Listing {
                    item,
                    price: base.with_amount(discounted.max(1)),
                    featured: true,
                }
            } else {
                Listing {
                    item,
                    price: base,
                    featured: false,
                }
            }
        })
        .collect()
}

pub fn listing(day: NaiveDate, item: Item) -> Option<Listing> {
    listings(day).into_iter().find(|listing| listing.item == item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_featured_item_per_day() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");
        let listings = listings(day);
        assert_eq!(listings.len(), Item::ALL.len());
        assert_eq!(listings.iter().filter(|listing| listing.featured).count(), 1);
        assert_eq!(featured_item(day), featured_item(day));
    }

    #[test]
    fn featured_item_is_discounted() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).expect("date");
        let featured = listings(day)
            .into_iter()
            .find(|listing| listing.featured)
            .expect("featured listing");
        assert_eq!(
            featured.price.amount(),
            featured.item.price().amount() * 75 / 100
        );
        assert_eq!(featured.price.currency(), featured.item.price().currency());
    }
}

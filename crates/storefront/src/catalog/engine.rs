//! Filter/sort pipeline.
//!
//! The pipeline is pure: given the full listing and a [`FilterState`] it
//! returns the visible subset in display order. It runs three stages:
//!
//! 1. text filter on name and description (case-insensitive substring)
//! 2. category filter (`all` or exact category)
//! 3. stable price sort, or the original order for [`SortOrder::None`]
//!
//! The same pipeline serves products loaded from the store and units read back
//! out of pre-rendered markup, via the [`Listing`] trait.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use showcase_core::{CategoryFilter, Product};
use thiserror::Error;

/// Anything the pipeline can filter and sort.
pub trait Listing {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Normalized (lowercase) category.
    fn category(&self) -> &str;
    fn price(&self) -> u64;
}

impl Listing for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.desc
    }

    fn category(&self) -> &str {
        self.category.as_str()
    }

    fn price(&self) -> u64 {
        self.price
    }
}

/// Price ordering of the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep store (or markup) order.
    #[default]
    #[serde(rename = "none", alias = "")]
    None,
    #[serde(rename = "low-to-high", alias = "low")]
    LowToHigh,
    #[serde(rename = "high-to-low", alias = "high")]
    HighToLow,
}

impl SortOrder {
    /// Every order, in select-box order.
    pub const ALL: [Self; 3] = [Self::None, Self::LowToHigh, Self::HighToLow];

    /// The wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LowToHigh => "low-to-high",
            Self::HighToLow => "high-to-low",
        }
    }

    /// Select-box label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Sort by",
            Self::LowToHigh => "Price: Low to High",
            Self::HighToLow => "Price: High to Low",
        }
    }
}

/// Sort order value that is not one of the known orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "low" | "low-to-high" => Ok(Self::LowToHigh),
            "high" | "high-to-low" => Ok(Self::HighToLow),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current search text, category and sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Lowercased, trimmed search text; `None` when there is no text filter.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

/// Whether an item passes the text filter.
fn matches_text<T: Listing>(item: &T, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| {
        item.name().to_lowercase().contains(needle)
            || item.description().to_lowercase().contains(needle)
    })
}

/// Run the pipeline and return the indices of visible items in display order.
#[must_use]
pub fn select<T: Listing>(items: &[T], state: &FilterState) -> Vec<usize> {
    let needle = state.needle();

    let mut picked: Vec<(usize, u64)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_text(*item, needle.as_deref()))
        .filter(|(_, item)| state.category.matches(item.category()))
        .map(|(index, item)| (index, item.price()))
        .collect();

    // sort_by_key is stable: equal prices keep their relative order
    match state.sort_order {
        SortOrder::None => {}
        SortOrder::LowToHigh => picked.sort_by_key(|&(_, price)| price),
        SortOrder::HighToLow => picked.sort_by_key(|&(_, price)| Reverse(price)),
    }

    picked.into_iter().map(|(index, _)| index).collect()
}

/// Run the pipeline and return the visible items in display order.
#[must_use]
pub fn visible<'a, T: Listing>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    select(items, state)
        .into_iter()
        .filter_map(|index| items.get(index))
        .collect()
}

/// Read a price out of display text such as `₹1,499`.
///
/// Every non-digit is dropped; text without digits (or too large to represent)
/// counts as zero.
#[must_use]
pub fn parse_price_text(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback::fallback_products;
    use showcase_core::Category;

    fn names<'a>(items: &[&'a Product]) -> Vec<&'a str> {
        items.iter().map(|p| p.name.as_str()).collect()
    }

    fn state(search: &str, category: &str, sort: SortOrder) -> FilterState {
        FilterState {
            search_text: search.to_string(),
            category: category.parse().unwrap(),
            sort_order: sort,
        }
    }

    /// Minimal listing for tie and commutativity tests.
    struct Item {
        name: &'static str,
        category: &'static str,
        price: u64,
    }

    impl Listing for Item {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            ""
        }

        fn category(&self) -> &str {
            self.category
        }

        fn price(&self) -> u64 {
            self.price
        }
    }

    #[test]
    fn test_no_filters_keeps_store_order() {
        let products = fallback_products();
        let visible = visible(&products, &FilterState::default());
        assert_eq!(visible.len(), 6);
        assert_eq!(
            names(&visible),
            vec![
                "Air Runner Shoes",
                "Classic Leather Shoes",
                "Smart Watch Pro",
                "Minimal Watch",
                "Phone Max 5G",
                "Phone Lite",
            ]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let products = fallback_products();
        let visible = visible(&products, &state("zzz-no-match", "all", SortOrder::None));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_category_watches_in_original_order() {
        let products = fallback_products();
        let visible = visible(&products, &state("", "watches", SortOrder::None));
        assert_eq!(names(&visible), vec!["Smart Watch Pro", "Minimal Watch"]);
    }

    #[test]
    fn test_low_to_high_over_all() {
        let products = fallback_products();
        let visible = visible(&products, &state("", "all", SortOrder::LowToHigh));
        let prices: Vec<u64> = visible.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1499, 1999, 2999, 3499, 9999, 15999]);
        assert_eq!(visible.first().unwrap().name, "Minimal Watch");
        assert_eq!(visible.last().unwrap().name, "Phone Max 5G");
    }

    #[test]
    fn test_high_to_low_reverses_low_to_high_without_ties() {
        let products = fallback_products();
        let low = visible(&products, &state("", "all", SortOrder::LowToHigh));
        let mut high = visible(&products, &state("", "all", SortOrder::HighToLow));
        high.reverse();
        assert_eq!(names(&low), names(&high));
    }

    #[test]
    fn test_search_matches_description_case_insensitively() {
        let products = fallback_products();
        let visible = visible(&products, &state("  BATTERY ", "all", SortOrder::None));
        assert_eq!(names(&visible), vec!["Phone Lite"]);
    }

    #[test]
    fn test_whitespace_search_is_no_filter() {
        let products = fallback_products();
        assert_eq!(visible(&products, &state("   ", "all", SortOrder::None)).len(), 6);
        assert_eq!(state("   ", "all", SortOrder::None).needle(), None);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let products = fallback_products();
        assert!(visible(&products, &state("", "laptops", SortOrder::None)).is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let items = [
            Item { name: "a", category: "x", price: 5 },
            Item { name: "b", category: "x", price: 1 },
            Item { name: "c", category: "x", price: 5 },
            Item { name: "d", category: "x", price: 1 },
        ];
        let low = visible(&items, &state("", "all", SortOrder::LowToHigh));
        let low: Vec<&str> = low.iter().map(|i| i.name).collect();
        assert_eq!(low, vec!["b", "d", "a", "c"]);

        let high = visible(&items, &state("", "all", SortOrder::HighToLow));
        let high: Vec<&str> = high.iter().map(|i| i.name).collect();
        assert_eq!(high, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_text_and_category_filters_commute() {
        let products = fallback_products();
        for search in ["", "watch", "phone", "shoes", "pro", "zzz"] {
            for category in ["all", "shoes", "watches", "phones"] {
                let combined = select(&products, &state(search, category, SortOrder::None));

                // text first, then category
                let text_only = select(&products, &state(search, "all", SortOrder::None));
                let text_then_category: Vec<usize> = text_only
                    .into_iter()
                    .filter(|&i| {
                        CategoryFilter::from_str(category)
                            .unwrap()
                            .matches(products[i].category.as_str())
                    })
                    .collect();

                // category first, then text
                let category_only = select(&products, &state("", category, SortOrder::None));
                let needle = state(search, "all", SortOrder::None).needle();
                let category_then_text: Vec<usize> = category_only
                    .into_iter()
                    .filter(|&i| matches_text(&products[i], needle.as_deref()))
                    .collect();

                assert_eq!(combined, text_then_category);
                assert_eq!(combined, category_then_text);
            }
        }
    }

    #[test]
    fn test_pipeline_is_idempotent_and_a_subset() {
        let products = fallback_products();
        for sort in SortOrder::ALL {
            let s = state("o", "all", sort);
            let first = select(&products, &s);
            assert_eq!(first, select(&products, &s));
            assert!(first.iter().all(|&i| i < products.len()));
        }
    }

    #[test]
    fn test_sort_order_parsing_accepts_aliases() {
        assert_eq!("low".parse::<SortOrder>(), Ok(SortOrder::LowToHigh));
        assert_eq!("high-to-low".parse::<SortOrder>(), Ok(SortOrder::HighToLow));
        assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::None));
        assert!("sideways".parse::<SortOrder>().is_err());

        let order: SortOrder = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(order, SortOrder::LowToHigh);
        assert_eq!(serde_json::to_string(&order).unwrap(), "\"low-to-high\"");
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("₹1,499"), 1499);
        assert_eq!(parse_price_text(" 15999 "), 15999);
        assert_eq!(parse_price_text("call us"), 0);
        assert_eq!(parse_price_text(""), 0);
        assert_eq!(parse_price_text(&"9".repeat(40)), 0);
    }

    #[test]
    fn test_category_filter_uses_normalized_category() {
        let products = fallback_products();
        let s = FilterState {
            category: CategoryFilter::Only(Category::new("PHONES")),
            ..FilterState::default()
        };
        assert_eq!(names(&visible(&products, &s)), vec!["Phone Max 5G", "Phone Lite"]);
    }
}

//! Stock availability.

use serde::{Deserialize, Serialize};

/// Stock availability of a product.
///
/// A missing stock count and a count of zero both mean the product cannot be
/// added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Units on hand.
    InStock(u32),
    #[default]
    Unavailable,
}

impl StockStatus {
    /// Derive the status from an optional stock count.
    #[must_use]
    pub const fn from_count(stock: Option<u32>) -> Self {
        match stock {
            Some(count) if count > 0 => Self::InStock(count),
            _ => Self::Unavailable,
        }
    }

    /// Whether the product can be added.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::InStock(_))
    }

    /// Shopper-facing label ("12 in stock" / "Out of stock").
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::InStock(count) => format!("{count} in stock"),
            Self::Unavailable => "Out of stock".to_string(),
        }
    }

    /// CSS state class for the stock indicator.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::InStock(_) => "in-stock",
            Self::Unavailable => "out-of-stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

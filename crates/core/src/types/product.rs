//! The catalog product record.

use serde::{Deserialize, Serialize};

use super::{Category, CurrencyCode, Price, ProductId, StockStatus};

/// One catalog entry.
///
/// Field names match the `products.json` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Whole amount in the displayed unit; negative values fail to parse.
    pub price: u64,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Price in the catalog currency.
    #[must_use]
    pub const fn price_in(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }

    /// Stock availability; zero or missing stock is unavailable.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::from_count(self.stock)
    }

    /// Rating for display, or `-` when the product has none.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating.map_or_else(|| "-".to_string(), |r| r.to_string())
    }
}

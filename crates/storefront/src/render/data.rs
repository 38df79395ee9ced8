//! Data-driven rendering: one card per visible product.

use showcase_core::{CurrencyCode, Product};

use super::{RenderMode, Renderer};
use crate::catalog::ProductStore;
use crate::catalog::engine::{self, FilterState};
use crate::page::{
    Acknowledge, ActionControl, CardView, DisplayUnit, ImageView, Page, UnitContent, UnitKey,
};

/// Rebuilds the grid from the product store on every pass.
pub struct DataRenderer {
    store: ProductStore,
    currency: CurrencyCode,
}

impl DataRenderer {
    #[must_use]
    pub fn new(store: ProductStore) -> Self {
        Self {
            store,
            currency: CurrencyCode::default(),
        }
    }
}

impl Renderer for DataRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::DataDriven
    }

    fn render(&self, page: &mut Page, state: &FilterState) -> usize {
        let units: Vec<DisplayUnit> = engine::visible(self.store.as_slice(), state)
            .into_iter()
            .enumerate()
            .map(|(position, product)| card_unit(product, position, self.currency))
            .collect();
        let count = units.len();
        page.replace_units(units);
        count
    }
}

/// Build the display unit for one product.
fn card_unit(product: &Product, position: usize, currency: CurrencyCode) -> DisplayUnit {
    let stock = product.stock_status();
    let disabled = !stock.is_available();

    DisplayUnit {
        key: UnitKey::new(product.id.to_string()),
        position,
        hidden: false,
        content: UnitContent::Card(CardView {
            id: product.id.to_string(),
            badge: product.category.to_string(),
            name: product.name.clone(),
            desc: product.desc.clone(),
            image: product.image.as_ref().map(|url| ImageView {
                url: url.clone(),
                alt: product.name.clone(),
            }),
            rating: product.rating_label(),
            stock,
            price: product.price_in(currency).display(),
            price_amount: product.price,
        }),
        action: Some(ActionControl {
            disabled,
            handler: (!disabled).then(|| Acknowledge::new(product.name.clone())),
        }),
    }
}

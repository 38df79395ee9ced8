//! Document model of the catalog page.
//!
//! A [`Page`] is the display surface the render layer writes to: the grid of
//! display units, the "Showing N products" line and the empty-results
//! indicator. Each live session owns one page; the server turns it into HTML
//! (first paint, data-driven updates) or into visibility/order instructions
//! (markup-driven updates).
//!
//! Units come from two places:
//! - [`CardView`]s built from product records by the data-driven renderer
//! - [`PrerenderedUnit`]s read out of hand-written markup (see [`markup`])

pub mod markup;

use serde::Serialize;
use showcase_core::StockStatus;

use crate::catalog::engine::Listing;

pub use markup::{MarkupError, PrerenderedUnit, UnitFields, load_grid, parse_grid};

/// Identifies a display unit across passes (product id or markup position).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UnitKey(String);

impl UnitKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-visible acknowledgment shown after activating an action control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Handler attached to an action control: acknowledges the named product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledge {
    title: String,
}

impl Acknowledge {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice {
            message: format!("Added: {}", self.title),
        }
    }
}

/// The "Add" button of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionControl {
    pub disabled: bool,
    pub handler: Option<Acknowledge>,
}

/// Image shown on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Card display data built from a product record.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub badge: String,
    pub name: String,
    pub desc: String,
    pub image: Option<ImageView>,
    pub rating: String,
    pub stock: StockStatus,
    pub price: String,
    pub price_amount: u64,
}

impl CardView {
    #[must_use]
    pub const fn image(&self) -> Option<&ImageView> {
        self.image.as_ref()
    }
}

/// What a display unit shows.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitContent {
    Card(CardView),
    Prerendered(PrerenderedUnit),
}

/// One entry of the product grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUnit {
    pub key: UnitKey,
    /// Position in the markup (or in the pass that built the unit).
    pub position: usize,
    pub hidden: bool,
    pub content: UnitContent,
    pub action: Option<ActionControl>,
}

impl DisplayUnit {
    /// Title used in acknowledgments.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.content {
            UnitContent::Card(card) => &card.name,
            UnitContent::Prerendered(unit) => &unit.fields().name,
        }
    }

    /// Card data, for units built from products.
    #[must_use]
    pub const fn card(&self) -> Option<&CardView> {
        match &self.content {
            UnitContent::Card(card) => Some(card),
            UnitContent::Prerendered(_) => None,
        }
    }

    /// Markup of a pre-rendered unit with its key and visibility applied.
    ///
    /// Empty for card units, which the grid template renders itself.
    #[must_use]
    pub fn prerendered_html(&self) -> String {
        match &self.content {
            UnitContent::Prerendered(unit) => unit.to_html(&self.key, self.hidden),
            UnitContent::Card(_) => String::new(),
        }
    }

    /// Whether the unit's action control is present and disabled.
    #[must_use]
    pub fn action_disabled(&self) -> bool {
        self.action.as_ref().is_some_and(|a| a.disabled)
    }

    /// Show the unit and (re)attach the acknowledgment to its action control.
    pub fn reveal(&mut self) {
        self.hidden = false;
        let title = self.title().to_string();
        if let Some(action) = self.action.as_mut() {
            action.handler = Some(Acknowledge::new(title));
        }
    }
}

impl Listing for DisplayUnit {
    fn name(&self) -> &str {
        self.title()
    }

    fn description(&self) -> &str {
        match &self.content {
            UnitContent::Card(card) => &card.desc,
            UnitContent::Prerendered(unit) => &unit.fields().desc,
        }
    }

    fn category(&self) -> &str {
        match &self.content {
            UnitContent::Card(card) => &card.badge,
            UnitContent::Prerendered(unit) => unit.fields().category.as_str(),
        }
    }

    fn price(&self) -> u64 {
        match &self.content {
            UnitContent::Card(card) => card.price_amount,
            UnitContent::Prerendered(unit) => unit.fields().price,
        }
    }
}

/// The "no products found" indicator and its live-region state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyIndicator {
    pub visible: bool,
}

impl EmptyIndicator {
    /// Value of the indicator's `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(self) -> &'static str {
        if self.visible { "false" } else { "true" }
    }
}

/// The catalog display surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    units: Vec<DisplayUnit>,
    status: String,
    empty: EmptyIndicator,
}

impl Page {
    /// A page whose grid starts with the given units.
    #[must_use]
    pub fn with_units(units: Vec<DisplayUnit>) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    /// Grid units in display order.
    #[must_use]
    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    /// Remove every unit from the grid, returning them in display order.
    pub fn take_units(&mut self) -> Vec<DisplayUnit> {
        std::mem::take(&mut self.units)
    }

    /// Replace the grid contents.
    pub fn replace_units(&mut self, units: Vec<DisplayUnit>) {
        self.units = units;
    }

    /// Whether the grid holds units that came from markup.
    #[must_use]
    pub fn has_prerendered_units(&self) -> bool {
        self.units
            .iter()
            .any(|u| matches!(u.content, UnitContent::Prerendered(_)))
    }

    /// Visible units in display order.
    pub fn visible_units(&self) -> impl Iterator<Item = &DisplayUnit> {
        self.units.iter().filter(|u| !u.hidden)
    }

    /// Hidden units.
    pub fn hidden_units(&self) -> impl Iterator<Item = &DisplayUnit> {
        self.units.iter().filter(|u| u.hidden)
    }

    /// The count line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub const fn empty_indicator(&self) -> EmptyIndicator {
        self.empty
    }

    /// Update the count line and empty indicator after a render pass.
    pub fn finish_pass(&mut self, count: usize) {
        self.status = format!("Showing {count} products");
        self.empty.visible = count == 0;
    }

    /// Activate the action control of the unit with `key`.
    ///
    /// Returns the acknowledgment when the unit is visible and its control is
    /// enabled with a handler attached.
    #[must_use]
    pub fn activate(&self, key: &str) -> Option<Notice> {
        let unit = self.visible_units().find(|u| u.key.as_str() == key)?;
        let action = unit.action.as_ref()?;
        if action.disabled {
            return None;
        }
        action.handler.as_ref().map(Acknowledge::notice)
    }
}

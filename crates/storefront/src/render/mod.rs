//! Render/sync layer: writes a pipeline result onto the page.
//!
//! Two strategies implement [`Renderer`]:
//!
//! - [`DataRenderer`] rebuilds the grid from product records on every pass
//! - [`MarkupRenderer`] hides, reveals and reorders units that already exist
//!   in the page markup
//!
//! The strategy is chosen once at startup by [`select_renderer`], based on
//! whether the page template carries pre-rendered units.

mod data;
mod markup;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::ProductStore;
use crate::catalog::engine::FilterState;
use crate::page::Page;

pub use data::DataRenderer;
pub use markup::MarkupRenderer;

/// Which strategy renders the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    DataDriven,
    MarkupDriven,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataDriven => write!(f, "data-driven"),
            Self::MarkupDriven => write!(f, "markup-driven"),
        }
    }
}

/// A render strategy.
pub trait Renderer: Send + Sync {
    fn mode(&self) -> RenderMode;

    /// Apply the visible set for `state` to the page grid.
    ///
    /// Returns the number of visible units.
    fn render(&self, page: &mut Page, state: &FilterState) -> usize;
}

/// One full pass: render the grid, then update the count line and the empty
/// indicator.
pub fn run_pass(renderer: &dyn Renderer, page: &mut Page, state: &FilterState) -> usize {
    let count = renderer.render(page, state);
    page.finish_pass(count);
    count
}

/// Choose the strategy for the page template.
#[must_use]
pub fn select_renderer(store: &ProductStore, template: &Page) -> Arc<dyn Renderer> {
    if template.has_prerendered_units() {
        Arc::new(MarkupRenderer)
    } else {
        Arc::new(DataRenderer::new(store.clone()))
    }
}

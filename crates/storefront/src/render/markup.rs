//! Markup-driven rendering over pre-rendered units.

use super::{RenderMode, Renderer};
use crate::catalog::engine::{self, FilterState};
use crate::page::{DisplayUnit, Page};

/// Hides, reveals and reorders the units already on the page.
///
/// The pipeline always runs over the units in their markup order, so
/// `SortOrder::None` restores the original arrangement. Matching units move
/// to the front in pipeline order; the rest stay behind them, hidden.
pub struct MarkupRenderer;

impl Renderer for MarkupRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::MarkupDriven
    }

    fn render(&self, page: &mut Page, state: &FilterState) -> usize {
        let mut units = page.take_units();
        units.sort_by_key(|u| u.position);

        let order = engine::select(&units, state);
        let count = order.len();

        let mut slots: Vec<Option<DisplayUnit>> = units.into_iter().map(Some).collect();
        let mut arranged = Vec::with_capacity(slots.len());

        for index in order {
            if let Some(mut unit) = slots.get_mut(index).and_then(Option::take) {
                unit.reveal();
                arranged.push(unit);
            }
        }
        for mut unit in slots.into_iter().flatten() {
            unit.hidden = true;
            arranged.push(unit);
        }

        page.replace_units(arranged);
        count
    }
}

//! Product catalog: data store, filter/sort pipeline and startup wiring.

pub mod engine;
pub mod fallback;
pub mod store;

use std::sync::Arc;

use showcase_core::Category;

pub use store::{LoadError, LoadOutcome, ProductSource, ProductStore};

use crate::config::CatalogConfig;
use crate::page::{Page, load_grid};
use crate::render::{RenderMode, Renderer, run_pass, select_renderer};
use engine::FilterState;

/// Everything a session needs, established once at startup.
#[derive(Clone)]
pub struct CatalogContext {
    store: ProductStore,
    renderer: Arc<dyn Renderer>,
    template: Page,
}

impl CatalogContext {
    /// Build the context around an already loaded store and page template.
    #[must_use]
    pub fn new(store: ProductStore, template: Page) -> Self {
        let renderer = select_renderer(&store, &template);
        Self {
            store,
            renderer,
            template,
        }
    }

    /// Load the product store and the optional pre-rendered grid, then pick
    /// the render strategy.
    ///
    /// A grid that cannot be read or parsed is logged and the page runs
    /// data-driven.
    pub async fn initialize(config: &CatalogConfig, client: &reqwest::Client) -> Self {
        let (store, outcome) =
            ProductStore::load(&config.products_source, client, config.load_timeout).await;

        let template = match &config.prerendered_grid {
            Some(path) => match load_grid(path).await {
                Ok(units) if !units.is_empty() => Page::with_units(units),
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "Pre-rendered grid has no units");
                    Page::default()
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "Could not read pre-rendered grid");
                    Page::default()
                }
            },
            None => Page::default(),
        };

        let context = Self::new(store, template);
        tracing::info!(
            mode = %context.mode(),
            products = context.store.len(),
            fallback = outcome == LoadOutcome::Fallback,
            "Catalog ready"
        );
        context
    }

    #[must_use]
    pub const fn store(&self) -> &ProductStore {
        &self.store
    }

    #[must_use]
    pub fn renderer(&self) -> Arc<dyn Renderer> {
        Arc::clone(&self.renderer)
    }

    /// The page every session starts from.
    #[must_use]
    pub const fn template(&self) -> &Page {
        &self.template
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.renderer.mode()
    }

    /// Category options for the filter control.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        match self.mode() {
            RenderMode::DataDriven => self.store.categories(),
            RenderMode::MarkupDriven => {
                let mut seen = Vec::new();
                for unit in self.template.units() {
                    let category = Category::new(engine::Listing::category(unit));
                    if !category.as_str().is_empty() && !seen.contains(&category) {
                        seen.push(category);
                    }
                }
                seen
            }
        }
    }

    /// A fresh page with the default pass applied.
    #[must_use]
    pub fn first_paint(&self) -> Page {
        self.paint(&FilterState::default())
    }

    /// A fresh page with one pass for `state` applied.
    #[must_use]
    pub fn paint(&self, state: &FilterState) -> Page {
        let mut page = self.template.clone();
        run_pass(self.renderer.as_ref(), &mut page, state);
        page
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::page::parse_grid;

    fn config(source: &str, grid: Option<PathBuf>) -> CatalogConfig {
        CatalogConfig {
            products_source: ProductSource::parse(source),
            prerendered_grid: grid,
            load_timeout: Duration::from_millis(500),
            ..CatalogConfig::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_falls_back_and_runs_data_driven() {
        let context = CatalogContext::initialize(
            &config("/nonexistent/products.json", None),
            &reqwest::Client::new(),
        )
        .await;
        assert_eq!(context.mode(), RenderMode::DataDriven);
        assert_eq!(context.store().len(), 6);

        let page = context.first_paint();
        assert_eq!(page.units().len(), 6);
        assert_eq!(page.status(), "Showing 6 products");
    }

    #[tokio::test]
    async fn test_unreadable_grid_uses_data_driven() {
        let context = CatalogContext::initialize(
            &config(
                "/nonexistent/products.json",
                Some(PathBuf::from("/nonexistent/grid.html")),
            ),
            &reqwest::Client::new(),
        )
        .await;
        assert_eq!(context.mode(), RenderMode::DataDriven);
    }

    #[test]
    fn test_markup_categories_in_first_seen_order() {
        let units = parse_grid(
            r#"<div>
              <div class="card" data-category="Watches"><h3>A</h3></div>
              <div class="card" data-category="shoes"><h3>B</h3></div>
              <div class="card" data-category="watches"><h3>C</h3></div>
              <div class="card"><h3>D</h3></div>
            </div>"#,
        )
        .unwrap();
        let context = CatalogContext::new(ProductStore::fallback(), Page::with_units(units));
        assert_eq!(context.mode(), RenderMode::MarkupDriven);
        let names: Vec<String> = context.categories().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["watches", "shoes"]);
    }

    #[test]
    fn test_first_paint_does_not_touch_template() {
        let context = CatalogContext::new(ProductStore::fallback(), Page::default());
        let page = context.first_paint();
        assert!(context.template().units().is_empty());
        assert_eq!(page.units().len(), 6);
    }
}

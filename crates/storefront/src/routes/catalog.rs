//! Catalog page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use showcase_core::{CategoryFilter, Product};
use tracing::instrument;

use crate::catalog::engine::{FilterState, SortOrder};
use crate::error::{AppError, Result};
use crate::page::{DisplayUnit, Page};
use crate::render::RenderMode;
use crate::state::AppState;

/// One `<option>` of a filter select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Full catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct IndexTemplate {
    pub page: Page,
    pub search_text: String,
    pub categories: Vec<SelectOption>,
    pub sort_orders: Vec<SelectOption>,
    pub mode: RenderMode,
}

/// Product grid fragment template.
///
/// Card units are rendered from their view data; pre-rendered units are
/// re-emitted as they appeared in the markup, keyed and with `hidden` applied.
#[derive(Template)]
#[template(path = "partials/grid.html")]
pub struct GridTemplate<'a> {
    pub units: &'a [DisplayUnit],
}

/// Filter controls as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl FilterQuery {
    /// Convert into a filter state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown sort order.
    pub fn into_state(self) -> Result<FilterState> {
        let sort_order = match self.sort.as_deref() {
            Some(raw) => raw
                .parse::<SortOrder>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => SortOrder::default(),
        };
        let category = self
            .category
            .as_deref()
            .and_then(|raw| raw.parse::<CategoryFilter>().ok())
            .unwrap_or_default();

        Ok(FilterState {
            search_text: self.search.unwrap_or_default(),
            category,
            sort_order,
        })
    }
}

/// Display the catalog page.
///
/// # Errors
///
/// Returns 400 if the `sort` parameter is not a known order.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<IndexTemplate> {
    let filter = query.into_state()?;
    let catalog = state.catalog();

    let mut categories = vec![SelectOption {
        value: CategoryFilter::All.to_string(),
        label: "All categories".to_string(),
        selected: filter.category == CategoryFilter::All,
    }];
    categories.extend(catalog.categories().into_iter().map(|category| SelectOption {
        value: category.to_string(),
        label: capitalize(category.as_str()),
        selected: filter.category == CategoryFilter::Only(category),
    }));

    let sort_orders = SortOrder::ALL
        .iter()
        .map(|order| SelectOption {
            value: order.as_str().to_string(),
            label: order.label().to_string(),
            selected: *order == filter.sort_order,
        })
        .collect();

    Ok(IndexTemplate {
        page: catalog.paint(&filter),
        search_text: filter.search_text,
        categories,
        sort_orders,
        mode: catalog.mode(),
    })
}

/// Render only the product grid for the given filters.
///
/// # Errors
///
/// Returns 400 for an unknown sort order, 500 if the fragment fails to render.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Html<String>> {
    let filter = query.into_state()?;
    let page = state.catalog().paint(&filter);
    let html = GridTemplate {
        units: page.units(),
    }
    .render()?;
    Ok(Html(html))
}

/// The active product list.
pub async fn products_json(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().store().as_slice().to_vec())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_defaults() {
        let state = FilterQuery::default().into_state().unwrap();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_filter_query_values() {
        let state = FilterQuery {
            search: Some("watch".to_string()),
            category: Some("Watches".to_string()),
            sort: Some("low".to_string()),
        }
        .into_state()
        .unwrap();
        assert_eq!(state.search_text, "watch");
        assert_eq!(state.category.as_str(), "watches");
        assert_eq!(state.sort_order, SortOrder::LowToHigh);
    }

    #[test]
    fn test_filter_query_unknown_sort() {
        let result = FilterQuery {
            sort: Some("rating".to_string()),
            ..FilterQuery::default()
        }
        .into_state();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("phones"), "Phones");
        assert_eq!(capitalize(""), "");
    }
}

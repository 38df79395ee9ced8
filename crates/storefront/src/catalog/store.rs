//! Product store: the catalog loaded once at startup.
//!
//! The store is read from a JSON resource (an HTTP URL or a local file). Any
//! failure, including a read that outlives the load timeout, is logged and
//! replaced by the built-in fallback catalog so the page is never empty.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use showcase_core::{Category, Product, ProductId};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use super::fallback::fallback_products;

/// Errors that can occur while reading the product resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Local file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload is not a list of product records.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// The read did not settle in time.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// Where the product list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSource {
    Http(Url),
    File(PathBuf),
}

impl ProductSource {
    /// Interpret a configured value: `http(s)` URLs are fetched, anything else
    /// is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            _ => Self::File(PathBuf::from(raw)),
        }
    }
}

impl fmt::Display for ProductSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which list became the active store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Fetched,
    Fallback,
}

/// Immutable product list, cheap to clone.
#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Arc<[Product]>,
}

impl ProductStore {
    /// Build a store, rejecting lists with duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::DuplicateId` for the first repeated id.
    pub fn new(products: Vec<Product>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(LoadError::DuplicateId(duplicate.id));
        }
        Ok(Self {
            products: products.into(),
        })
    }

    /// The built-in fallback catalog.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            products: fallback_products().into(),
        }
    }

    /// Load the store from `source`, falling back to the built-in catalog.
    ///
    /// Never fails: errors are logged and downgrade to the fallback list.
    #[instrument(skip(source, client), fields(source = %source))]
    pub async fn load(
        source: &ProductSource,
        client: &reqwest::Client,
        timeout: Duration,
    ) -> (Self, LoadOutcome) {
        let read = async {
            let products = fetch(source, client).await?;
            Self::new(products)
        };

        let result = match tokio::time::timeout(timeout, read).await {
            Ok(result) => result,
            Err(_) => Err(LoadError::TimedOut(timeout)),
        };

        match result {
            Ok(store) => {
                tracing::info!(count = store.len(), "Loaded product list");
                (store, LoadOutcome::Fetched)
            }
            Err(error) => {
                tracing::warn!(error = %error, "Could not load product list, using fallback data");
                (Self::fallback(), LoadOutcome::Fallback)
            }
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for product in self.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}

/// Read and parse the product list from its source.
async fn fetch(source: &ProductSource, client: &reqwest::Client) -> Result<Vec<Product>, LoadError> {
    let body = match source {
        ProductSource::Http(url) => {
            let response = client
                .get(url.clone())
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            response.text().await?
        }
        ProductSource::File(path) => tokio::fs::read_to_string(path).await?,
    };

    Ok(serde_json::from_str(&body)?)
}

//! Product categories and the category filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// A product category such as `shoes` or `watches`.
///
/// Values are trimmed and lowercased on construction so that categories read
/// from hand-written markup compare equal to the select-box values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category, normalizing case and surrounding whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_lowercase())
    }

    /// The normalized category value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The category selection of a filter state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep only records whose category equals this one.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a record with the given category passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.as_str() == category,
        }
    }

    /// The wire value (`all` or the category).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = Category::new(s);
        if category.as_str().is_empty() || category.as_str() == ALL_CATEGORIES {
            Ok(Self::All)
        } else {
            Ok(Self::Only(category))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(filter) = raw.parse::<Self>();
        Ok(filter)
    }
}

use crate::model::MenuItem;
use std::path::Path;
use thiserror::Error;

/// How many popular dishes the customer view features.
pub const FEATURED_COUNT: usize = 4;

/// Category tag that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse menu file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The read-only list of dishes, in a stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Loads a JSON array of menu items.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let items = serde_json::from_str(&raw).map_err(|source| MenuError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(items))
    }

    pub fn list_items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items tagged `tag`, or everything for [`ALL_CATEGORIES`].
    pub fn filter_by_category(&self, tag: &str) -> Vec<MenuItem> {
        if tag == ALL_CATEGORIES {
            return self.items.clone();
        }
        self.items
            .iter()
            .filter(|item| item.category == tag)
            .cloned()
            .collect()
    }

    /// The first `n` popular items in catalog order.
    pub fn top_popular(&self, n: usize) -> Vec<MenuItem> {
        self.items
            .iter()
            .filter(|item| item.popular)
            .take(n)
            .cloned()
            .collect()
    }

    /// Distinct category tags in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category) {
                seen.push(item.category.clone());
            }
        }
        seen
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: &str, category: &str, popular: bool) -> MenuItem {
        let item = MenuItem::new(id, id, Decimal::new(500, 2), category);
        if popular {
            item.popular()
        } else {
            item
        }
    }

    #[test]
    fn test_all_passes_through() {
        let catalog = MenuCatalog::new(vec![item("a", "mains", false), item("b", "sides", false)]);
        assert_eq!(catalog.filter_by_category(ALL_CATEGORIES).len(), 2);
        assert_eq!(catalog.filter_by_category("sides")[0].id, "b");
        assert!(catalog.filter_by_category("drinks").is_empty());
    }

    #[test]
    fn test_top_popular_keeps_catalog_order() {
        let catalog = MenuCatalog::new(vec![
            item("a", "mains", true),
            item("b", "mains", false),
            item("c", "mains", true),
            item("d", "mains", true),
            item("e", "mains", true),
            item("f", "mains", true),
        ]);
        let ids: Vec<String> = catalog
            .top_popular(FEATURED_COUNT)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_top_popular_returns_fewer_when_short() {
        let catalog = MenuCatalog::new(vec![item("a", "mains", true), item("b", "mains", false)]);
        assert_eq!(catalog.top_popular(FEATURED_COUNT).len(), 1);
    }

    #[test]
    fn test_empty_catalog_yields_empty_sequences() {
        let catalog = MenuCatalog::default();
        assert!(catalog.list_items().is_empty());
        assert!(catalog.filter_by_category("mains").is_empty());
        assert!(catalog.top_popular(FEATURED_COUNT).is_empty());
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = MenuCatalog::new(vec![
            item("a", "mains", false),
            item("b", "desserts", false),
            item("c", "mains", false),
        ]);
        assert_eq!(catalog.categories(), vec!["mains", "desserts"]);
        assert_eq!(catalog.get("c").map(|i| i.category.as_str()), Some("mains"));
        assert!(catalog.get("z").is_none());
    }
}

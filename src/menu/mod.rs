//! # Menu Catalog
//!
//! The static list of dishes served by `GET /api/menu` and pushed to every dashboard when it
//! connects. The catalog is built once at startup, either from the built-in demo menu or from
//! the JSON file named by `MENU_PATH`, and is shared read-only afterwards.

pub mod catalog;
pub mod seed;

pub use catalog::{MenuCatalog, MenuError, ALL_CATEGORIES, FEATURED_COUNT};

impl MenuCatalog {
    /// The built-in demo menu.
    pub fn seed() -> Self {
        Self::new(seed::seed_items())
    }
}

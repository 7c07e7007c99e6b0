use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish on the menu.
///
/// Loaded once at startup and never mutated. Orders keep their own copy of every item they
/// contain (see [`CartLine`](crate::model::CartLine)), so a later catalog change does not
/// reach placed orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Minutes.
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub popular: bool,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            image: String::new(),
            prep_time: 0,
            popular: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time = minutes;
        self
    }

    pub fn popular(mut self) -> Self {
        self.popular = true;
        self
    }
}

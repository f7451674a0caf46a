//! The storefront's coffee menu.
//!
//! The catalog is static for the lifetime of the process; it is not persisted.

use crate::entities::{LineItem, NewOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[schema(example = "latte")]
    pub id: String,
    #[schema(example = "Latte")]
    pub title: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64, example = 4.0)]
    pub price: Decimal,
    pub img_url: String,
}

impl MenuItem {
    pub fn new(id: &str, title: &str, price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            price,
            img_url: format!("/images/{id}.png"),
        }
    }

    /// One of this item, billed at its menu price.
    pub fn single_item_order(&self, name: String, address: String) -> NewOrder {
        NewOrder {
            name,
            address,
            items: vec![LineItem::new(self.title.clone(), 1, self.price)],
            total_price: self.price,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn all(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new(vec![
            MenuItem::new("espresso", "Espresso", Decimal::new(3, 0)),
            MenuItem::new("americano", "Americano", Decimal::new(35, 1)),
            MenuItem::new("cappuccino", "Cappuccino", Decimal::new(45, 1)),
            MenuItem::new("latte", "Latte", Decimal::new(4, 0)),
            MenuItem::new("mocha", "Mocha", Decimal::new(5, 0)),
            MenuItem::new("flat-white", "Flat White", Decimal::new(45, 1)),
        ])
    }
}

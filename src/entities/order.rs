use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, FromJsonQueryResult, Set};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted customer order.
///
/// Serialized with the storefront's wire names: `_id`, `totalPrice`, `createdAt`.
#[derive(
    Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
#[schema(as = Order)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Client name
    pub name: String,

    /// Delivery address
    #[sea_orm(column_type = "Text")]
    pub address: String,

    #[sea_orm(column_type = "Json")]
    pub items: LineItems,

    /// Not derived from `items`
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_price: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.id {
                active_model.id = Set(Uuid::new_v4());
            }
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(Utc::now());
            }
        }

        Ok(active_model)
    }
}

/// Ordered line items, stored as a single JSON document column.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(transparent)]
pub struct LineItems(pub Vec<LineItem>);

impl LineItems {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<LineItem>> for LineItems {
    fn from(items: Vec<LineItem>) -> Self {
        Self(items)
    }
}

/// A single product entry within an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub name: String,

    /// Accepts a JSON number or a numeric string
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,

    /// Accepts a JSON number or a numeric string
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u32),
        Text(String),
    }

    match Quantity::deserialize(deserializer)? {
        Quantity::Number(n) => Ok(n),
        Quantity::Text(raw) => raw.trim().parse().map_err(|_| {
            de::Error::custom(format!("quantity `{raw}` is not a non-negative integer"))
        }),
    }
}

/// Validated input for inserting a new order.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub address: String,
    pub items: Vec<LineItem>,
    pub total_price: Decimal,
}

impl NewOrder {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            address: Set(self.address),
            items: Set(LineItems(self.items)),
            total_price: Set(self.total_price),
            ..Default::default()
        }
    }
}

/// The fields of an order that may be changed after creation.
///
/// Keys outside this set (`_id`, `createdAt`, anything else) are ignored when
/// deserializing, so the identifier and creation time cannot be overwritten.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub total_price: Option<Decimal>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.items.is_none()
            && self.total_price.is_none()
    }

    /// Copies every submitted field onto the active model, leaving the rest untouched.
    pub fn apply(self, active_model: &mut ActiveModel) {
        if let Some(name) = self.name {
            active_model.name = Set(name);
        }
        if let Some(address) = self.address {
            active_model.address = Set(address);
        }
        if let Some(items) = self.items {
            active_model.items = Set(LineItems(items));
        }
        if let Some(total_price) = self.total_price {
            active_model.total_price = Set(total_price);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn line_item_accepts_numeric_strings() {
        let item: LineItem =
            serde_json::from_value(json!({"name": "Latte", "quantity": "2", "price": "4.50"}))
                .unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, Decimal::from_str("4.50").unwrap());
    }

    #[test]
    fn line_item_rejects_non_numeric_quantity() {
        let result: Result<LineItem, _> =
            serde_json::from_value(json!({"name": "Latte", "quantity": "two", "price": 4}));
        assert!(result.is_err());
    }

    #[test]
    fn model_serializes_with_storefront_keys() {
        let model = Model {
            id: Uuid::nil(),
            name: "Alice".into(),
            address: "1 Main St".into(),
            items: vec![LineItem::new("Latte", 1, Decimal::new(4, 0))].into(),
            total_price: Decimal::new(4, 0),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["_id"], json!(Uuid::nil().to_string()));
        assert_eq!(value["totalPrice"].as_f64(), Some(4.0));
        assert_eq!(value["items"][0]["quantity"], json!(1));
        assert_eq!(value["items"][0]["price"].as_f64(), Some(4.0));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("total_price").is_none());
    }

    #[test]
    fn order_changes_ignore_immutable_keys() {
        let changes: OrderChanges = serde_json::from_value(json!({
            "_id": "abc",
            "createdAt": "2024-01-01T00:00:00Z",
            "__v": 0,
            "address": "2 Side St",
        }))
        .unwrap();

        assert_eq!(changes.address.as_deref(), Some("2 Side St"));
        assert!(changes.name.is_none());
        assert!(changes.total_price.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn order_changes_apply_only_submitted_fields() {
        let mut active_model = <ActiveModel as Default>::default();
        OrderChanges {
            total_price: Some(Decimal::new(9, 0)),
            ..Default::default()
        }
        .apply(&mut active_model);

        assert!(matches!(
            &active_model.total_price,
            ActiveValue::Set(price) if *price == Decimal::new(9, 0)
        ));
        assert!(matches!(active_model.name, ActiveValue::NotSet));
        assert!(matches!(active_model.items, ActiveValue::NotSet));
    }
}

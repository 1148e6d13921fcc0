//! Storefront records: cart, orders, returns and reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(alias = "product_id")]
    pub product_id: EntityId,
    pub name: String,
    #[serde(alias = "unit_price")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 { self.unit_price * f64::from(self.quantity) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    #[serde(default, alias = "_id")]
    pub id: EntityId,
    #[serde(default, alias = "items")]
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn subtotal(&self) -> f64 { self.lines.iter().map(CartLine::line_total).sum() }

    pub fn item_count(&self) -> u32 { self.lines.iter().map(|l| l.quantity).sum() }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub product_id: EntityId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// An order as the tracking page sees it. Each stage timestamp is set by the
/// backend when the order reaches that stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub placed_at: DateTime<Utc>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub packed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn item(&self, item_id: &str) -> Option<&OrderItem> { self.items.iter().find(|i| i.id == item_id) }

    pub fn is_delivered(&self) -> bool { self.delivered_at.is_some() && self.cancelled_at.is_none() }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Requested,
    Approved,
    Rejected,
    PickedUp,
    Refunded,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    pub order_item_id: EntityId,
    pub quantity: u32,
}

/// Body posted to open a return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewReturn {
    pub items: Vec<ReturnItem>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub order_id: EntityId,
    pub status: ReturnStatus,
    #[serde(default)]
    pub items: Vec<ReturnItem>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body posted to publish a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: EntityId,
    pub order_id: EntityId,
    pub rating: u8,
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub product_id: EntityId,
    pub rating: u8,
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

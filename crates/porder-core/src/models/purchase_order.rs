//! Plain purchase order record.

use serde::{Deserialize, Serialize};

/// A purchase order as seen through the builder callbacks.
///
/// Scalar fields stay `None` until the document supplies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Purchase order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Order date, unparsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Delivery address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,

    /// Party requesting the goods.
    #[serde(default, skip_serializing_if = "Party::is_empty")]
    pub requestor: Party,

    /// Party supplying the goods.
    #[serde(default, skip_serializing_if = "Party::is_empty")]
    pub provider: Party,

    /// Products in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl PurchaseOrder {
    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.date.is_none()
            && self.delivery_address.is_none()
            && self.requestor.is_empty()
            && self.provider.is_empty()
            && self.products.is_empty()
    }
}

/// Requestor or provider of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Mexican tax identifier (RFC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Party {
    /// Check if the party has any data.
    pub fn is_empty(&self) -> bool {
        self.rfc.is_none() && self.name.is_none()
    }
}

/// A single ordered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: String,

    /// Ordered quantity, unparsed.
    pub quantity: String,

    /// Product description.
    pub description: String,
}

impl Product {
    /// Create a product with the default quantity and its id as description.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            description: id.clone(),
            quantity: crate::order::DEFAULT_QUANTITY.to_string(),
            id,
        }
    }
}

//! Mapping of (line, column) positions to order fields.

use std::fmt;

use super::PurchaseOrderBuilder;
use crate::error::Result;

/// What a line of the document describes, decided by its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Line 0: order number, date, delivery address.
    Header,
    /// Line 1: requestor RFC and name.
    Requestor,
    /// Line 2: provider RFC and name.
    Provider,
    /// Line 3 onwards: one product per line.
    Product,
}

impl LineRole {
    /// Classify a zero-based line index.
    pub fn classify(index: usize) -> Self {
        match index {
            0 => LineRole::Header,
            1 => LineRole::Requestor,
            2 => LineRole::Provider,
            _ => LineRole::Product,
        }
    }

    /// Field held by `column` on a line of this role, if any.
    ///
    /// Columns past the last known one are ignored rather than rejected.
    pub fn field(self, column: usize) -> Option<OrderField> {
        let field = match (self, column) {
            (LineRole::Header, 0) => OrderField::OrderNumber,
            (LineRole::Header, 1) => OrderField::Date,
            (LineRole::Header, 2) => OrderField::DeliveryAddress,
            (LineRole::Requestor, 0) => OrderField::RequestorId,
            (LineRole::Requestor, 1) => OrderField::RequestorName,
            (LineRole::Provider, 0) => OrderField::ProviderId,
            (LineRole::Provider, 1) => OrderField::ProviderName,
            (LineRole::Product, 0) => OrderField::ProductId,
            (LineRole::Product, 1) => OrderField::ProductQuantity,
            (LineRole::Product, 2) => OrderField::ProductDescription,
            _ => return None,
        };
        Some(field)
    }
}

/// A single semantic field of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    OrderNumber,
    Date,
    DeliveryAddress,
    RequestorId,
    RequestorName,
    ProviderId,
    ProviderName,
    /// Starts a new product.
    ProductId,
    ProductQuantity,
    ProductDescription,
}

impl OrderField {
    /// Forward `value` to the builder callback for this field.
    pub fn apply<B>(self, builder: &mut B, value: &str) -> Result<()>
    where
        B: PurchaseOrderBuilder + ?Sized,
    {
        match self {
            OrderField::OrderNumber => builder.set_order_number(value),
            OrderField::Date => builder.set_date(value),
            OrderField::DeliveryAddress => builder.set_delivery_address(value),
            OrderField::RequestorId => builder.set_requestor_id(value),
            OrderField::RequestorName => builder.set_requestor_name(value),
            OrderField::ProviderId => builder.set_provider_id(value),
            OrderField::ProviderName => builder.set_provider_name(value),
            OrderField::ProductId => builder.begin_product(value),
            OrderField::ProductQuantity => builder.set_product_quantity(value),
            OrderField::ProductDescription => builder.set_product_description(value),
        }
    }

    /// Stable snake_case name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            OrderField::OrderNumber => "order_number",
            OrderField::Date => "date",
            OrderField::DeliveryAddress => "delivery_address",
            OrderField::RequestorId => "requestor_id",
            OrderField::RequestorName => "requestor_name",
            OrderField::ProviderId => "provider_id",
            OrderField::ProviderName => "provider_name",
            OrderField::ProductId => "product_id",
            OrderField::ProductQuantity => "product_quantity",
            OrderField::ProductDescription => "product_description",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

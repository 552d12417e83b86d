//! Purchase order text parsing.
//!
//! The input is a `\n`-separated list of `|`-separated fields. Line position
//! decides what a line describes and column position decides which field it
//! is; see [`LineRole`] and [`OrderField`]. The parser never builds an order
//! itself, it drives a [`PurchaseOrderBuilder`] through one callback per
//! present field.

mod dispatch;
mod fields;
mod parser;

pub use dispatch::{LineRole, OrderField};
pub use fields::{split_fields, split_lines, FIELD_SEPARATOR, LINE_SEPARATOR};
pub use parser::PurchaseOrderParser;

use crate::error::Result;

/// Default quantity of a product whose line carries no quantity.
pub const DEFAULT_QUANTITY: &str = "0";

/// Target of the parser's callbacks, one implementation per output format.
///
/// Calls arrive in document order: header fields, then requestor fields,
/// then provider fields, then products. Within a product line the id always
/// comes first, so [`set_product_quantity`](Self::set_product_quantity) and
/// [`set_product_description`](Self::set_product_description) refer to the
/// product most recently passed to [`begin_product`](Self::begin_product).
/// A product may never receive a quantity or a description.
///
/// Implementations must not assume they are only ever driven by
/// [`PurchaseOrderParser`]: product setters called before any product was
/// begun should fail with [`BuildError::NoCurrentProduct`](crate::error::BuildError).
pub trait PurchaseOrderBuilder {
    /// Set the purchase order number.
    fn set_order_number(&mut self, number: &str) -> Result<()>;

    /// Set the order date, verbatim.
    fn set_date(&mut self, date: &str) -> Result<()>;

    /// Set the delivery address.
    fn set_delivery_address(&mut self, address: &str) -> Result<()>;

    /// Set the requestor's RFC.
    fn set_requestor_id(&mut self, rfc: &str) -> Result<()>;

    /// Set the requestor's display name.
    fn set_requestor_name(&mut self, name: &str) -> Result<()>;

    /// Set the provider's RFC.
    fn set_provider_id(&mut self, rfc: &str) -> Result<()>;

    /// Set the provider's display name.
    fn set_provider_name(&mut self, name: &str) -> Result<()>;

    /// Start a new product; it becomes the current product.
    fn begin_product(&mut self, id: &str) -> Result<()>;

    /// Set the quantity of the current product.
    fn set_product_quantity(&mut self, quantity: &str) -> Result<()>;

    /// Set the description of the current product.
    fn set_product_description(&mut self, description: &str) -> Result<()>;
}

//! Builder that records the order as a plain [`PurchaseOrder`].

use std::fmt::Write as _;

use tracing::trace;

use crate::error::{BuildError, PorderError, RenderError, Result};
use crate::models::purchase_order::{Product, PurchaseOrder};
use crate::order::PurchaseOrderBuilder;

/// Accumulates a [`PurchaseOrder`] value.
///
/// [`dump`](Self::dump) gives a canonical line-per-field text form, one
/// `KEY:value` line per recorded field.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    order: PurchaseOrder,
    current_product: Option<usize>,
}

impl RecordBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The order recorded so far.
    pub fn order(&self) -> &PurchaseOrder {
        &self.order
    }

    /// Consume the builder, returning the order.
    pub fn into_order(self) -> PurchaseOrder {
        self.order
    }

    fn current_product(&mut self, field: &'static str) -> Result<&mut Product> {
        self.current_product
            .and_then(|index| self.order.products.get_mut(index))
            .ok_or(PorderError::Build(BuildError::NoCurrentProduct { field }))
    }

    /// Canonical text dump of the recorded order.
    ///
    /// Keys: `N` number, `D` date, `ADD` address, `R-R`/`R-N` requestor RFC
    /// and name, `P-R`/`P-N` provider RFC and name, and `P<n>-ID`, `P<n>-Q`,
    /// `P<n>-D` for the n-th product (1-based). Absent fields are omitted.
    pub fn dump(&self) -> String {
        let order = &self.order;
        let mut out = String::new();

        let scalars = [
            ("N", &order.number),
            ("D", &order.date),
            ("ADD", &order.delivery_address),
            ("R-R", &order.requestor.rfc),
            ("R-N", &order.requestor.name),
            ("P-R", &order.provider.rfc),
            ("P-N", &order.provider.name),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                let _ = writeln!(out, "{}:{}", key, value);
            }
        }

        for (i, product) in order.products.iter().enumerate() {
            let n = i + 1;
            let _ = writeln!(out, "P{}-ID:{}", n, product.id);
            let _ = writeln!(out, "P{}-Q:{}", n, product.quantity);
            let _ = writeln!(out, "P{}-D:{}", n, product.description);
        }

        out
    }

    /// Recorded order as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.order)
        } else {
            serde_json::to_string(&self.order)
        };
        Ok(json.map_err(|e| RenderError::Json(e.to_string()))?)
    }
}

impl PurchaseOrderBuilder for RecordBuilder {
    fn set_order_number(&mut self, number: &str) -> Result<()> {
        self.order.number = Some(number.to_string());
        Ok(())
    }

    fn set_date(&mut self, date: &str) -> Result<()> {
        self.order.date = Some(date.to_string());
        Ok(())
    }

    fn set_delivery_address(&mut self, address: &str) -> Result<()> {
        self.order.delivery_address = Some(address.to_string());
        Ok(())
    }

    fn set_requestor_id(&mut self, rfc: &str) -> Result<()> {
        self.order.requestor.rfc = Some(rfc.to_string());
        Ok(())
    }

    fn set_requestor_name(&mut self, name: &str) -> Result<()> {
        self.order.requestor.name = Some(name.to_string());
        Ok(())
    }

    fn set_provider_id(&mut self, rfc: &str) -> Result<()> {
        self.order.provider.rfc = Some(rfc.to_string());
        Ok(())
    }

    fn set_provider_name(&mut self, name: &str) -> Result<()> {
        self.order.provider.name = Some(name.to_string());
        Ok(())
    }

    fn begin_product(&mut self, id: &str) -> Result<()> {
        self.order.products.push(Product::new(id));
        self.current_product = Some(self.order.products.len() - 1);
        trace!("Recorded product #{}: {}", self.order.products.len(), id);
        Ok(())
    }

    fn set_product_quantity(&mut self, quantity: &str) -> Result<()> {
        self.current_product("quantity")?.quantity = quantity.to_string();
        Ok(())
    }

    fn set_product_description(&mut self, description: &str) -> Result<()> {
        self.current_product("description")?.description = description.to_string();
        Ok(())
    }
}

//! Positional purchase order parser.

use tracing::{debug, trace, warn};

use super::dispatch::{LineRole, OrderField};
use super::fields::{split_fields, split_lines};
use super::PurchaseOrderBuilder;
use crate::error::Result;

/// Drives a [`PurchaseOrderBuilder`] from purchase order text.
///
/// The parser keeps no state between calls; everything it learns goes to the
/// builder. Use a fresh builder per document.
pub struct PurchaseOrderParser<'b, B: PurchaseOrderBuilder + ?Sized> {
    builder: &'b mut B,
}

impl<'b, B: PurchaseOrderBuilder + ?Sized> PurchaseOrderParser<'b, B> {
    /// Create a parser feeding `builder`.
    pub fn new(builder: &'b mut B) -> Self {
        Self { builder }
    }

    /// Parse a document, dispatching every present field to the builder.
    ///
    /// `None` behaves exactly like an empty document. A quantity or
    /// description that appears before any product id has nothing to apply
    /// to; it is skipped with a warning. The first builder error aborts the
    /// parse and is returned unchanged.
    pub fn parse<'t>(&mut self, text: impl Into<Option<&'t str>>) -> Result<()> {
        let Some(text) = text.into() else {
            debug!("No purchase order text given");
            return Ok(());
        };

        let mut line_count = 0;
        let mut dispatched = 0;
        let mut product_begun = false;

        for (index, line) in split_lines(text).enumerate() {
            line_count += 1;
            dispatched +=
                self.parse_line(LineRole::classify(index), index, line, &mut product_begun)?;
        }

        debug!(
            "Parsed purchase order: {} lines, {} fields dispatched",
            line_count, dispatched
        );

        Ok(())
    }

    fn parse_line(
        &mut self,
        role: LineRole,
        index: usize,
        line: &str,
        product_begun: &mut bool,
    ) -> Result<usize> {
        let mut dispatched = 0;

        for (column, value) in split_fields(line) {
            let Some(field) = role.field(column) else {
                trace!("Ignoring column {} of {:?} line {}", column, role, index);
                continue;
            };

            match field {
                OrderField::ProductId => *product_begun = true,
                OrderField::ProductQuantity | OrderField::ProductDescription
                    if !*product_begun =>
                {
                    warn!("Line {}: {} {:?} has no product id, skipping", index, field, value);
                    continue;
                }
                _ => {}
            }

            trace!("Line {} column {}: {} = {:?}", index, column, field, value);
            field.apply(&mut *self.builder, value)?;
            dispatched += 1;
        }

        Ok(dispatched)
    }
}

//! Core library for purchase order conversion.
//!
//! This crate provides:
//! - A positional parser for the `|`/newline purchase order text format
//! - The [`PurchaseOrderBuilder`] callback contract the parser drives
//! - Builders for a plain record, XML, HTML and a tabular grid (text, CSV
//!   or `.xlsx` workbook)
//! - Configuration for output settings and labels

pub mod builders;
pub mod convert;
pub mod error;
pub mod models;
pub mod order;

pub use builders::{HtmlBuilder, RecordBuilder, TableBuilder, XmlBuilder};
pub use convert::{convert, convert_to_bytes, convert_with_config};
pub use error::{BuildError, PorderError, RenderError, Result};
pub use models::config::{LabelConfig, OutputConfig, OutputFormat, PorderConfig};
pub use models::purchase_order::{Party, Product, PurchaseOrder};
pub use order::{LineRole, OrderField, PurchaseOrderBuilder, PurchaseOrderParser};

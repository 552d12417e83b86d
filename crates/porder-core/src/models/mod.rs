//! Data models.

pub mod config;
pub mod purchase_order;

pub use config::{LabelConfig, OutputConfig, OutputFormat, PorderConfig};
pub use purchase_order::{Party, Product, PurchaseOrder};

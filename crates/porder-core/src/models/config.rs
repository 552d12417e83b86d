//! Configuration structures for conversion.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PorderError, Result};

/// Main configuration for porder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorderConfig {
    /// Output configuration.
    pub output: OutputConfig,

    /// Labels used by the HTML and table renderers.
    pub labels: LabelConfig,
}

/// Target representation of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Hierarchical XML document.
    #[default]
    Xml,
    /// HTML page with headings and a product table.
    Html,
    /// Grid rendered as CSV.
    Csv,
    /// Grid rendered as `|`-separated text rows.
    Text,
    /// Grid rendered as an Excel workbook.
    Xlsx,
    /// Plain record as JSON.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }

    /// Whether the rendered output is binary rather than UTF-8 text.
    pub fn is_binary(self) -> bool {
        matches!(self, OutputFormat::Xlsx)
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Indent XML output.
    pub pretty: bool,

    /// Emit the `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xml,
            pretty: false,
            xml_declaration: true,
        }
    }
}

/// User-visible labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub order_number: String,
    pub date: String,
    pub deliver_to: String,
    pub requestor: String,
    pub provider: String,
    pub products: String,
    pub rfc: String,
    pub name: String,
    pub id: String,
    pub description: String,
    pub quantity: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            order_number: "Purchase order number".to_string(),
            date: "Date".to_string(),
            deliver_to: "Deliver to".to_string(),
            requestor: "Requestor".to_string(),
            provider: "Provider".to_string(),
            products: "Products".to_string(),
            rfc: "RFC".to_string(),
            name: "Name".to_string(),
            id: "ID".to_string(),
            description: "Description".to_string(),
            quantity: "Quantity".to_string(),
        }
    }
}

impl LabelConfig {
    /// Spanish labels.
    pub fn spanish() -> Self {
        Self {
            order_number: "Número de orden de compra".to_string(),
            date: "Fecha".to_string(),
            deliver_to: "Entregar en".to_string(),
            requestor: "Solicitante".to_string(),
            provider: "Proveedor".to_string(),
            products: "Productos".to_string(),
            rfc: "RFC".to_string(),
            name: "Nombre".to_string(),
            id: "ID".to_string(),
            description: "Descripción".to_string(),
            quantity: "Cantidad".to_string(),
        }
    }
}

impl PorderConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PorderError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(config_error)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Look up a value by dotted key, e.g. `output.format`.
    pub fn get_value(&self, key: &str) -> Result<serde_json::Value> {
        let json = serde_json::to_value(self).map_err(config_error)?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part).ok_or_else(|| key_not_found(key))?;
        }

        Ok(current.clone())
    }

    /// Set a value by dotted key.
    ///
    /// `raw` is parsed as JSON first and taken as a plain string when that
    /// fails, so `true` and `"true"` differ but `xml` needs no quoting.
    /// Returns the value that was stored.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));

        let mut json = serde_json::to_value(&*self).map_err(config_error)?;

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };

        let mut current = &mut json;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current.get_mut(part).ok_or_else(|| key_not_found(key))?;
        }

        let object = current.as_object_mut().ok_or_else(|| {
            PorderError::Config(format!("cannot set value at non-object path: {}", key))
        })?;
        if !object.contains_key(leaf) {
            return Err(key_not_found(key));
        }
        object.insert(leaf.to_string(), value.clone());

        *self = serde_json::from_value(json)
            .map_err(|e| PorderError::Config(format!("invalid value for {}: {}", key, e)))?;

        Ok(value)
    }
}

fn config_error(e: serde_json::Error) -> PorderError {
    PorderError::Config(e.to_string())
}

fn key_not_found(key: &str) -> PorderError {
    PorderError::Config(format!("configuration key not found: {}", key))
}

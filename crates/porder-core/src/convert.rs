//! One-call conversion from purchase order text to a rendered format.

use std::time::Instant;

use tracing::debug;

use crate::builders::{HtmlBuilder, RecordBuilder, TableBuilder, XmlBuilder};
use crate::error::{RenderError, Result};
use crate::models::config::{LabelConfig, OutputConfig, OutputFormat, PorderConfig};
use crate::order::PurchaseOrderParser;

/// Convert `text` to `output.format`.
///
/// Fails with [`RenderError::Binary`] for binary formats; use
/// [`convert_to_bytes`] for those.
pub fn convert(text: &str, output: &OutputConfig, labels: &LabelConfig) -> Result<String> {
    let start = Instant::now();

    let rendered = match output.format {
        OutputFormat::Xml => {
            let mut builder = XmlBuilder::with_config(output);
            PurchaseOrderParser::new(&mut builder).parse(text)?;
            builder.to_xml_string()?
        }
        OutputFormat::Html => {
            let mut builder = HtmlBuilder::with_labels(labels.clone());
            PurchaseOrderParser::new(&mut builder).parse(text)?;
            builder.to_html_string()
        }
        OutputFormat::Csv | OutputFormat::Text => {
            let mut builder = TableBuilder::with_labels(labels.clone());
            PurchaseOrderParser::new(&mut builder).parse(text)?;
            if output.format == OutputFormat::Csv {
                builder.to_csv()?
            } else {
                builder.to_text()
            }
        }
        OutputFormat::Json => {
            let mut builder = RecordBuilder::new();
            PurchaseOrderParser::new(&mut builder).parse(text)?;
            builder.to_json(output.pretty)?
        }
        OutputFormat::Xlsx => {
            return Err(RenderError::Binary(output.format.extension()).into());
        }
    };

    debug!(
        "Converted {} bytes to {:?} in {:?}",
        text.len(),
        output.format,
        start.elapsed()
    );

    Ok(rendered)
}

/// Convert `text` to `output.format` as raw bytes. Works for every format.
pub fn convert_to_bytes(
    text: &str,
    output: &OutputConfig,
    labels: &LabelConfig,
) -> Result<Vec<u8>> {
    if output.format != OutputFormat::Xlsx {
        return convert(text, output, labels).map(String::into_bytes);
    }

    let start = Instant::now();
    let mut builder = TableBuilder::with_labels(labels.clone());
    PurchaseOrderParser::new(&mut builder).parse(text)?;
    let workbook = builder.to_xlsx()?;

    debug!(
        "Converted {} bytes to a {} byte workbook in {:?}",
        text.len(),
        workbook.len(),
        start.elapsed()
    );

    Ok(workbook)
}

/// Convert `text` using the output and label settings of `config`.
pub fn convert_with_config(text: &str, config: &PorderConfig) -> Result<String> {
    convert(text, &config.output, &config.labels)
}

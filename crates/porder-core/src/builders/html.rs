//! Display-oriented HTML builder.

use std::fmt::Write as _;

use html_escape::encode_text;
use tracing::trace;

use crate::error::{BuildError, PorderError, Result};
use crate::models::config::LabelConfig;
use crate::order::{PurchaseOrderBuilder, DEFAULT_QUANTITY};

/// A top-level element of the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// `<h1>`..`<h6>` with plain text.
    Heading { level: u8, text: String },
    /// `<h3>` introducing a requestor or provider.
    Party {
        label: String,
        rfc: Option<String>,
        name: Option<String>,
    },
    /// `<hr>`.
    Rule,
    /// Product table; each row is `[id, description, quantity]`.
    Table { rows: Vec<[String; 3]> },
}

const ID: usize = 0;
const DESCRIPTION: usize = 1;
const QUANTITY: usize = 2;

/// Builds an HTML page: headings for the header fields, one section per
/// party and a product table.
///
/// The blocks that later callbacks mutate are tracked by index, never found
/// again by walking the page.
#[derive(Debug)]
pub struct HtmlBuilder {
    labels: LabelConfig,
    body: Vec<Block>,
    requestor: Option<usize>,
    provider: Option<usize>,
    /// Index of the table block, set once the first product arrives.
    table: Option<usize>,
    current_row: Option<usize>,
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlBuilder {
    /// Create a builder with the default labels.
    pub fn new() -> Self {
        Self::with_labels(LabelConfig::default())
    }

    /// Create a builder using custom labels.
    pub fn with_labels(labels: LabelConfig) -> Self {
        Self {
            labels,
            body: Vec::new(),
            requestor: None,
            provider: None,
            table: None,
            current_row: None,
        }
    }

    fn heading(&mut self, level: u8, text: String) {
        self.body.push(Block::Heading { level, text });
    }

    /// Party section for `role`, creating the rule and heading on first use.
    fn party(&mut self, role: Role) -> (&mut Option<String>, &mut Option<String>) {
        let existing = match role {
            Role::Requestor => self.requestor,
            Role::Provider => self.provider,
        };

        let index = existing.unwrap_or_else(|| {
            let label = match role {
                Role::Requestor => self.labels.requestor.clone(),
                Role::Provider => self.labels.provider.clone(),
            };
            self.body.push(Block::Rule);
            self.body.push(Block::Party {
                label,
                rfc: None,
                name: None,
            });
            let index = self.body.len() - 1;
            match role {
                Role::Requestor => self.requestor = Some(index),
                Role::Provider => self.provider = Some(index),
            }
            index
        });

        match &mut self.body[index] {
            Block::Party { rfc, name, .. } => (rfc, name),
            _ => unreachable!("party index always points at a party block"),
        }
    }

    fn table_rows(&mut self) -> &mut Vec<[String; 3]> {
        let index = match self.table {
            Some(index) => index,
            None => {
                trace!("Starting product table");
                self.body.push(Block::Table { rows: Vec::new() });
                let index = self.body.len() - 1;
                self.table = Some(index);
                index
            }
        };

        match &mut self.body[index] {
            Block::Table { rows } => rows,
            _ => unreachable!("table index always points at a table block"),
        }
    }

    fn current_cell(&mut self, column: usize, field: &'static str) -> Result<&mut String> {
        let missing = PorderError::Build(BuildError::NoCurrentProduct { field });
        let (Some(table), Some(row)) = (self.table, self.current_row) else {
            return Err(missing);
        };

        match &mut self.body[table] {
            Block::Table { rows } => rows
                .get_mut(row)
                .map(|cells| &mut cells[column])
                .ok_or(missing),
            _ => Err(missing),
        }
    }

    /// Render the page.
    pub fn to_html_string(&self) -> String {
        let mut out = String::new();
        out.push_str("<html>\n<head>\n");
        out.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">\n");
        out.push_str("</head>\n");

        if self.body.is_empty() {
            out.push_str("<body></body>\n");
        } else {
            out.push_str("<body>\n");
            for block in &self.body {
                self.write_block(&mut out, block);
            }
            out.push_str("</body>\n");
        }

        out.push_str("</html>\n");
        out
    }

    fn write_block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                let _ = writeln!(out, "<h{0}>{1}</h{0}>", level, encode_text(text));
            }
            Block::Party { label, rfc, name } => {
                let text = match (rfc, name) {
                    (Some(rfc), Some(name)) => format!("{}: {} - {}", label, rfc, name),
                    (Some(value), None) | (None, Some(value)) => format!("{}: {}", label, value),
                    (None, None) => format!("{}:", label),
                };
                let _ = writeln!(out, "<h3>{}</h3>", encode_text(&text));
            }
            Block::Rule => out.push_str("<hr>\n"),
            Block::Table { rows } => {
                let header = [
                    self.labels.id.as_str(),
                    self.labels.description.as_str(),
                    self.labels.quantity.as_str(),
                ];
                out.push_str("<table>\n<thead>\n");
                write_row(out, "th", header);
                out.push_str("</thead>\n<tbody>\n");
                for row in rows {
                    write_row(
                        out,
                        "td",
                        [row[ID].as_str(), row[DESCRIPTION].as_str(), row[QUANTITY].as_str()],
                    );
                }
                out.push_str("</tbody>\n</table>\n");
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Role {
    Requestor,
    Provider,
}

fn write_row(out: &mut String, tag: &str, cells: [&str; 3]) {
    out.push_str("<tr>\n");
    for cell in cells {
        let _ = write!(out, "<{0}>{1}</{0}>", tag, encode_text(cell));
    }
    out.push_str("\n</tr>\n");
}

impl PurchaseOrderBuilder for HtmlBuilder {
    fn set_order_number(&mut self, number: &str) -> Result<()> {
        self.heading(1, number.to_string());
        Ok(())
    }

    fn set_date(&mut self, date: &str) -> Result<()> {
        self.heading(3, date.to_string());
        Ok(())
    }

    fn set_delivery_address(&mut self, address: &str) -> Result<()> {
        let text = format!("{}: {}", self.labels.deliver_to, address);
        self.heading(3, text);
        Ok(())
    }

    fn set_requestor_id(&mut self, rfc: &str) -> Result<()> {
        *self.party(Role::Requestor).0 = Some(rfc.to_string());
        Ok(())
    }

    fn set_requestor_name(&mut self, name: &str) -> Result<()> {
        *self.party(Role::Requestor).1 = Some(name.to_string());
        Ok(())
    }

    fn set_provider_id(&mut self, rfc: &str) -> Result<()> {
        *self.party(Role::Provider).0 = Some(rfc.to_string());
        Ok(())
    }

    fn set_provider_name(&mut self, name: &str) -> Result<()> {
        *self.party(Role::Provider).1 = Some(name.to_string());
        Ok(())
    }

    fn begin_product(&mut self, id: &str) -> Result<()> {
        let rows = self.table_rows();
        rows.push([id.to_string(), id.to_string(), DEFAULT_QUANTITY.to_string()]);
        let row = rows.len() - 1;
        self.current_row = Some(row);
        Ok(())
    }

    fn set_product_quantity(&mut self, quantity: &str) -> Result<()> {
        *self.current_cell(QUANTITY, "quantity")? = quantity.to_string();
        Ok(())
    }

    fn set_product_description(&mut self, description: &str) -> Result<()> {
        *self.current_cell(DESCRIPTION, "description")? = description.to_string();
        Ok(())
    }
}

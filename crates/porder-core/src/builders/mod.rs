//! Output builders, one per target representation.

mod html;
mod record;
mod table;
mod xml;

pub use html::HtmlBuilder;
pub use record::RecordBuilder;
pub use table::TableBuilder;
pub use xml::{Element, XmlBuilder};

//! Hierarchical XML builder.
//!
//! Produces one `PurchaseOrder` element carrying the header fields as
//! attributes, optional `Requestor` and `Provider` children and a `Products`
//! container with one `Product` per product line:
//!
//! ```text
//! <PurchaseOrder date="..." deliveryTo="..." number="...">
//!   <Requestor name="..." rfc="..."/>
//!   <Provider name="..." rfc="..."/>
//!   <Products>
//!     <Product description="..." id="..." quantity="..."/>
//!   </Products>
//! </PurchaseOrder>
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::trace;

use crate::error::{BuildError, PorderError, RenderError, Result};
use crate::models::config::OutputConfig;
use crate::order::{PurchaseOrderBuilder, DEFAULT_QUANTITY};

/// An element of the XML tree. Attributes are kept sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    attributes: BTreeMap<&'static str, String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Element name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Value of an attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements in insertion order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn set(&mut self, name: &'static str, value: &str) {
        self.attributes.insert(name, value.to_string());
    }

    fn push(&mut self, child: Element) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }
}

/// Builds a `PurchaseOrder` XML tree.
#[derive(Debug)]
pub struct XmlBuilder {
    root: Element,
    requestor: Option<usize>,
    provider: Option<usize>,
    products: Option<usize>,
    current_product: Option<usize>,
    declaration: bool,
    indent: bool,
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBuilder {
    /// Create a builder holding an empty `PurchaseOrder` element.
    pub fn new() -> Self {
        Self {
            root: Element::new("PurchaseOrder"),
            requestor: None,
            provider: None,
            products: None,
            current_product: None,
            declaration: true,
            indent: false,
        }
    }

    /// Create a builder using the declaration and indentation settings of
    /// `config`.
    pub fn with_config(config: &OutputConfig) -> Self {
        Self::new()
            .with_declaration(config.xml_declaration)
            .with_indent(config.pretty)
    }

    /// Set whether to write the XML declaration.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Set whether to indent nested elements.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Root element of the document.
    pub fn document(&self) -> &Element {
        &self.root
    }

    fn party(&mut self, slot: Slot) -> &mut Element {
        let (name, index) = match slot {
            Slot::Requestor => ("Requestor", self.requestor),
            Slot::Provider => ("Provider", self.provider),
        };

        let index = match index {
            Some(index) => index,
            None => {
                let index = self.root.push(Element::new(name));
                match slot {
                    Slot::Requestor => self.requestor = Some(index),
                    Slot::Provider => self.provider = Some(index),
                }
                index
            }
        };

        &mut self.root.children[index]
    }

    fn current_product(&mut self, field: &'static str) -> Result<&mut Element> {
        let missing = PorderError::Build(BuildError::NoCurrentProduct { field });
        let (Some(products), Some(product)) = (self.products, self.current_product) else {
            return Err(missing);
        };

        self.root.children[products]
            .children
            .get_mut(product)
            .ok_or(missing)
    }

    /// Serialize the document.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = if self.indent {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };

        if self.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))
                .map_err(xml_error)?;
        }

        write_element(&mut writer, &self.root)?;

        String::from_utf8(writer.into_inner()).map_err(|_| RenderError::Utf8.into())
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Requestor,
    Provider,
}

fn xml_error(e: impl Display) -> PorderError {
    RenderError::Xml(e.to_string()).into()
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name);
    for (name, value) in &element.attributes {
        start.push_attribute((*name, value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name)))
        .map_err(xml_error)?;

    Ok(())
}

impl PurchaseOrderBuilder for XmlBuilder {
    fn set_order_number(&mut self, number: &str) -> Result<()> {
        self.root.set("number", number);
        Ok(())
    }

    fn set_date(&mut self, date: &str) -> Result<()> {
        self.root.set("date", date);
        Ok(())
    }

    fn set_delivery_address(&mut self, address: &str) -> Result<()> {
        self.root.set("deliveryTo", address);
        Ok(())
    }

    fn set_requestor_id(&mut self, rfc: &str) -> Result<()> {
        self.party(Slot::Requestor).set("rfc", rfc);
        Ok(())
    }

    fn set_requestor_name(&mut self, name: &str) -> Result<()> {
        self.party(Slot::Requestor).set("name", name);
        Ok(())
    }

    fn set_provider_id(&mut self, rfc: &str) -> Result<()> {
        self.party(Slot::Provider).set("rfc", rfc);
        Ok(())
    }

    fn set_provider_name(&mut self, name: &str) -> Result<()> {
        self.party(Slot::Provider).set("name", name);
        Ok(())
    }

    fn begin_product(&mut self, id: &str) -> Result<()> {
        let products = match self.products {
            Some(index) => index,
            None => {
                trace!("Creating Products element");
                let index = self.root.push(Element::new("Products"));
                self.products = Some(index);
                index
            }
        };

        let mut product = Element::new("Product");
        product.set("id", id);
        product.set("quantity", DEFAULT_QUANTITY);
        product.set("description", id);

        self.current_product = Some(self.root.children[products].push(product));
        Ok(())
    }

    fn set_product_quantity(&mut self, quantity: &str) -> Result<()> {
        self.current_product("quantity")?.set("quantity", quantity);
        Ok(())
    }

    fn set_product_description(&mut self, description: &str) -> Result<()> {
        self.current_product("description")?.set("description", description);
        Ok(())
    }
}

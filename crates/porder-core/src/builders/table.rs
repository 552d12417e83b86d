//! Tabular grid builder.

use rust_xlsxwriter::Workbook;
use tracing::trace;

use crate::error::{BuildError, PorderError, RenderError, Result};
use crate::models::config::LabelConfig;
use crate::order::{PurchaseOrderBuilder, DEFAULT_QUANTITY};

/// Builds a flat grid of text rows, as a spreadsheet would hold them.
///
/// Header fields become `label | value` rows. Requestor, provider and
/// products each get a section: a blank row, the section label, a row of
/// column names and the data rows. A section only appears once one of its
/// fields is set.
#[derive(Debug)]
pub struct TableBuilder {
    labels: LabelConfig,
    rows: Vec<Vec<String>>,
    requestor: Option<usize>,
    provider: Option<usize>,
    products_started: bool,
    current_row: Option<usize>,
}

const RFC: usize = 0;
const NAME: usize = 1;
const ID: usize = 0;
const DESCRIPTION: usize = 1;
const QUANTITY: usize = 2;

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Create a builder with the default labels.
    pub fn new() -> Self {
        Self::with_labels(LabelConfig::default())
    }

    /// Create a builder using custom labels.
    pub fn with_labels(labels: LabelConfig) -> Self {
        Self {
            labels,
            rows: Vec::new(),
            requestor: None,
            provider: None,
            products_started: false,
            current_row: None,
        }
    }

    /// Rows built so far. Rows may have different lengths.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn push_row<I, S>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self.rows.len() - 1
    }

    fn start_section(&mut self, label: String, columns: Vec<String>) {
        trace!("Starting table section {:?}", label);
        self.push_row(Vec::<String>::new());
        self.push_row([label]);
        self.push_row(columns);
    }

    /// Data row of the party section for `role`, creating the section first.
    fn party_row(&mut self, role: Role) -> usize {
        let existing = match role {
            Role::Requestor => self.requestor,
            Role::Provider => self.provider,
        };
        if let Some(row) = existing {
            return row;
        }

        let label = match role {
            Role::Requestor => self.labels.requestor.clone(),
            Role::Provider => self.labels.provider.clone(),
        };
        let columns = vec![self.labels.rfc.clone(), self.labels.name.clone()];
        self.start_section(label, columns);

        let row = self.push_row(Vec::<String>::new());
        match role {
            Role::Requestor => self.requestor = Some(row),
            Role::Provider => self.provider = Some(row),
        }
        row
    }

    /// Set a cell, padding the row with empty cells as needed.
    fn set_cell(&mut self, row: usize, column: usize, value: &str) {
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.to_string();
    }

    fn set_product_cell(&mut self, column: usize, value: &str, field: &'static str) -> Result<()> {
        let row = self
            .current_row
            .ok_or(PorderError::Build(BuildError::NoCurrentProduct { field }))?;
        self.set_cell(row, column, value);
        Ok(())
    }

    /// Render the grid as `|`-separated cells, one row per line.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("|"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the grid as CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);

        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|e| RenderError::Csv(e.to_string()))?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| RenderError::Csv(e.to_string()))?;
        String::from_utf8(data).map_err(|_| RenderError::Utf8.into())
    }

    /// Render the grid as an `.xlsx` workbook with a single sheet.
    ///
    /// Every cell is written as a string, quantities included. Empty cells
    /// are left blank.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (r, row) in self.rows.iter().enumerate() {
            let r = u32::try_from(r).map_err(|e| RenderError::Xlsx(e.to_string()))?;
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let c = u16::try_from(c).map_err(|e| RenderError::Xlsx(e.to_string()))?;
                sheet
                    .write_string(r, c, cell)
                    .map_err(|e| RenderError::Xlsx(e.to_string()))?;
            }
        }

        Ok(workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Xlsx(e.to_string()))?)
    }
}

#[derive(Clone, Copy)]
enum Role {
    Requestor,
    Provider,
}

impl PurchaseOrderBuilder for TableBuilder {
    fn set_order_number(&mut self, number: &str) -> Result<()> {
        let label = self.labels.order_number.clone();
        self.push_row([label, number.to_string()]);
        Ok(())
    }

    fn set_date(&mut self, date: &str) -> Result<()> {
        let label = self.labels.date.clone();
        self.push_row([label, date.to_string()]);
        Ok(())
    }

    fn set_delivery_address(&mut self, address: &str) -> Result<()> {
        let label = self.labels.deliver_to.clone();
        self.push_row([label, address.to_string()]);
        Ok(())
    }

    fn set_requestor_id(&mut self, rfc: &str) -> Result<()> {
        let row = self.party_row(Role::Requestor);
        self.set_cell(row, RFC, rfc);
        Ok(())
    }

    fn set_requestor_name(&mut self, name: &str) -> Result<()> {
        let row = self.party_row(Role::Requestor);
        self.set_cell(row, NAME, name);
        Ok(())
    }

    fn set_provider_id(&mut self, rfc: &str) -> Result<()> {
        let row = self.party_row(Role::Provider);
        self.set_cell(row, RFC, rfc);
        Ok(())
    }

    fn set_provider_name(&mut self, name: &str) -> Result<()> {
        let row = self.party_row(Role::Provider);
        self.set_cell(row, NAME, name);
        Ok(())
    }

    fn begin_product(&mut self, id: &str) -> Result<()> {
        if !self.products_started {
            let label = self.labels.products.clone();
            let columns = vec![
                self.labels.id.clone(),
                self.labels.description.clone(),
                self.labels.quantity.clone(),
            ];
            self.start_section(label, columns);
            self.products_started = true;
        }

        let mut cells = vec![String::new(); 3];
        cells[ID] = id.to_string();
        cells[DESCRIPTION] = id.to_string();
        cells[QUANTITY] = DEFAULT_QUANTITY.to_string();
        let row = self.push_row(cells);
        self.current_row = Some(row);
        Ok(())
    }

    fn set_product_quantity(&mut self, quantity: &str) -> Result<()> {
        self.set_product_cell(QUANTITY, quantity, "quantity")
    }

    fn set_product_description(&mut self, description: &str) -> Result<()> {
        self.set_product_cell(DESCRIPTION, description, "description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::PurchaseOrderParser;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "10001|2021-10-22 17:13:31|Ofificina";
    const PARTIES: &str = "FOC140516174|Focaltec S.A.P.I. de C.V.\n\
                           MOSA8311152G0|Alberto Montellano Sandoval";

    fn table_with(labels: LabelConfig, text: Option<&str>) -> TableBuilder {
        let mut builder = TableBuilder::with_labels(labels);
        PurchaseOrderParser::new(&mut builder).parse(text).unwrap();
        builder
    }

    fn spanish(text: &str) -> String {
        table_with(LabelConfig::spanish(), Some(text)).to_text()
    }

    #[test]
    fn test_null_and_empty_generate_empty_grid() {
        assert!(table_with(LabelConfig::default(), None).rows().is_empty());
        assert_eq!(spanish(""), "");
    }

    #[test]
    fn test_header_with_number_only() {
        assert_eq!(spanish("10001"), "Número de orden de compra|10001");
    }

    #[test]
    fn test_full_header() {
        assert_eq!(
            spanish(HEADER),
            "Número de orden de compra|10001\n\
             Fecha|2021-10-22 17:13:31\n\
             Entregar en|Ofificina"
        );
    }

    #[test]
    fn test_requestor_with_rfc_only() {
        assert_eq!(
            spanish(&format!("{}\nFOC140516174", HEADER)),
            "Número de orden de compra|10001\n\
             Fecha|2021-10-22 17:13:31\n\
             Entregar en|Ofificina\n\
             \n\
             Solicitante\n\
             RFC|Nombre\n\
             FOC140516174"
        );
    }

    #[test]
    fn test_party_name_without_rfc() {
        assert_eq!(
            spanish("\n|Focaltec"),
            "\nSolicitante\nRFC|Nombre\n|Focaltec"
        );
    }

    #[test]
    fn test_product_with_id_only_gets_defaults() {
        assert_eq!(
            spanish(&format!("{}\n{}\nP1234567890", HEADER, PARTIES)),
            "Número de orden de compra|10001\n\
             Fecha|2021-10-22 17:13:31\n\
             Entregar en|Ofificina\n\
             \n\
             Solicitante\n\
             RFC|Nombre\n\
             FOC140516174|Focaltec S.A.P.I. de C.V.\n\
             \n\
             Proveedor\n\
             RFC|Nombre\n\
             MOSA8311152G0|Alberto Montellano Sandoval\n\
             \n\
             Productos\n\
             ID|Descripción|Cantidad\n\
             P1234567890|P1234567890|0"
        );
    }

    #[test]
    fn test_three_products() {
        let text = format!(
            "{}\n{}\nP1234567890|5|Caja de 100 tornillos\n\
             P0000012345|5|Caja de 100 tuercas\n\
             P0000056789|5|Caja de 100 arandelas\n",
            HEADER, PARTIES
        );

        let out = spanish(&text);
        assert!(out.ends_with(
            "\n\nProductos\n\
             ID|Descripción|Cantidad\n\
             P1234567890|Caja de 100 tornillos|5\n\
             P0000012345|Caja de 100 tuercas|5\n\
             P0000056789|Caja de 100 arandelas|5"
        ));
        assert_eq!(out.matches("Productos").count(), 1);
    }

    #[test]
    fn test_default_labels() {
        let builder = table_with(LabelConfig::default(), Some("10001\n\n\nP1|2"));
        assert_eq!(
            builder.to_text(),
            "Purchase order number|10001\n\
             \n\
             Products\n\
             ID|Description|Quantity\n\
             P1|P1|2"
        );
    }

    #[test]
    fn test_to_csv() {
        let builder = table_with(
            LabelConfig::default(),
            Some("10001|2021-10-22 17:13:31|Calle 5, Centro"),
        );
        assert_eq!(
            builder.to_csv().unwrap(),
            "Purchase order number,10001\n\
             Date,2021-10-22 17:13:31\n\
             Deliver to,\"Calle 5, Centro\"\n"
        );
    }

    #[test]
    fn test_to_csv_with_sections() {
        let builder = table_with(LabelConfig::default(), Some("1\nR|n\n\nP1|2|Tornillos"));

        // csv quotes an empty record so the blank separator row survives.
        assert_eq!(
            builder.to_csv().unwrap(),
            "Purchase order number,1\n\
             \"\"\n\
             Requestor\n\
             RFC,Name\n\
             R,n\n\
             \"\"\n\
             Products\n\
             ID,Description,Quantity\n\
             P1,Tornillos,2\n"
        );
    }

    /// Cell text of the first sheet, with trailing blank cells dropped.
    fn sheet_rows(bytes: Vec<u8>) -> Vec<Vec<String>> {
        use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

        let mut workbook: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();

        range
            .rows()
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => panic!("unexpected cell {:?}", other),
                    })
                    .collect();
                while cells.last().is_some_and(String::is_empty) {
                    cells.pop();
                }
                cells
            })
            .collect()
    }

    #[test]
    fn test_to_xlsx_matches_grid() {
        let text = format!(
            "{}\n{}\nP1234567890|5|Caja de 100 tornillos\nP0000012345|5",
            HEADER, PARTIES
        );
        let builder = table_with(LabelConfig::spanish(), Some(&text));

        let rows = sheet_rows(builder.to_xlsx().unwrap());

        assert_eq!(rows, builder.rows());
        assert_eq!(rows[0], vec!["Número de orden de compra", "10001"]);
        assert_eq!(rows[14], vec!["P1234567890", "Caja de 100 tornillos", "5"]);
        assert_eq!(rows[15], vec!["P0000012345", "P0000012345", "5"]);
    }

    #[test]
    fn test_to_xlsx_keeps_name_only_party_column() {
        let builder = table_with(LabelConfig::default(), Some("1\n|Focaltec"));

        let rows = sheet_rows(builder.to_xlsx().unwrap());

        assert_eq!(rows[4], vec!["", "Focaltec"]);
    }

    #[test]
    fn test_product_setters_without_product_fail() {
        let mut builder = TableBuilder::new();
        assert!(builder.set_product_quantity("1").is_err());
        assert!(builder.set_product_description("x").is_err());
        assert!(builder.rows().is_empty());
    }
}

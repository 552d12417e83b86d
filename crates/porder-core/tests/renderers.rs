//! Behaviour shared by every builder when driven by the parser.

use porder_core::{
    HtmlBuilder, LabelConfig, PurchaseOrderBuilder, PurchaseOrderParser, RecordBuilder,
    TableBuilder, XmlBuilder,
};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "10001|2021-10-22 17:13:31|Ofificina\n\
                      FOC140516174|Focaltec S.A.P.I. de C.V.\n\
                      MOSA8311152G0|Alberto Montellano Sandoval\n\
                      P1234567890|5|Caja de 100 tornillos";

fn run<B: PurchaseOrderBuilder>(mut builder: B, text: Option<&str>) -> B {
    PurchaseOrderParser::new(&mut builder).parse(text).unwrap();
    builder
}

/// Every rendering of `text`, in a fixed order.
fn render_all(text: Option<&str>) -> Vec<String> {
    vec![
        run(RecordBuilder::new(), text).dump(),
        run(XmlBuilder::new(), text).to_xml_string().unwrap(),
        run(HtmlBuilder::new(), text).to_html_string(),
        run(TableBuilder::new(), text).to_text(),
    ]
}

#[test]
fn none_and_empty_text_render_identically() {
    assert_eq!(render_all(None), render_all(Some("")));
}

#[test]
fn separator_only_document_renders_like_empty() {
    assert_eq!(render_all(Some("||\n|\n|\n||\n")), render_all(Some("")));
}

#[test]
fn header_only_document_has_no_sections() {
    let [record, xml, html, table]: [String; 4] =
        render_all(Some("10001")).try_into().unwrap();

    assert_eq!(record, "N:10001\n");
    assert!(xml.ends_with(r#"<PurchaseOrder number="10001"/>"#));
    assert!(html.contains("<body>\n<h1>10001</h1>\n</body>"));
    assert!(!html.contains("<hr>"));
    assert!(!html.contains("<table>"));
    assert_eq!(table, "Purchase order number|10001");
}

#[test]
fn sample_round_trips_through_record_builder() {
    let record = run(RecordBuilder::new(), Some(SAMPLE));
    let dump = record.dump();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(
        lines,
        vec![
            "N:10001",
            "D:2021-10-22 17:13:31",
            "ADD:Ofificina",
            "R-R:FOC140516174",
            "R-N:Focaltec S.A.P.I. de C.V.",
            "P-R:MOSA8311152G0",
            "P-N:Alberto Montellano Sandoval",
            "P1-ID:P1234567890",
            "P1-Q:5",
            "P1-D:Caja de 100 tornillos",
        ]
    );
}

#[test]
fn second_product_defaults_description_to_id() {
    let text = format!("{}\nP0000012345|5", SAMPLE);
    let before = run(RecordBuilder::new(), Some(SAMPLE)).dump();
    let after = run(RecordBuilder::new(), Some(&text)).dump();

    assert_eq!(
        after,
        format!("{}P2-ID:P0000012345\nP2-Q:5\nP2-D:P0000012345\n", before)
    );
}

#[test]
fn product_fields_without_an_id_are_dropped_before_the_first_product() {
    assert_eq!(render_all(Some("1\n\n\n|5|desc")), render_all(Some("1")));
}

#[test]
fn product_fields_without_an_id_apply_to_the_current_product() {
    let dump = run(RecordBuilder::new(), Some("1\n\n\n|5\nA|2\n||Tornillos")).dump();

    assert_eq!(dump, "N:1\nP1-ID:A\nP1-Q:2\nP1-D:Tornillos\n");
}

#[test]
fn products_keep_input_order_across_missing_fields() {
    let ids: Vec<String> = (1..=20).map(|n| format!("P{:03}", n)).collect();
    let mut text = String::from("1\n\n");
    for (i, id) in ids.iter().enumerate() {
        match i % 4 {
            0 => text.push_str(&format!("\n{}", id)),
            1 => text.push_str(&format!("\n{}|{}", id, i)),
            2 => text.push_str(&format!("\n{}||d{}", id, i)),
            _ => text.push_str(&format!("\n{}|{}|d{}|extra", id, i, i)),
        }
    }

    let order = run(RecordBuilder::new(), Some(&text)).into_order();
    let parsed: Vec<&str> = order.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(parsed, ids.iter().map(String::as_str).collect::<Vec<_>>());

    for (i, product) in order.products.iter().enumerate() {
        let expected_quantity = if i % 4 == 1 || i % 4 == 3 {
            i.to_string()
        } else {
            "0".to_string()
        };
        let expected_description = if i % 4 >= 2 {
            format!("d{}", i)
        } else {
            product.id.clone()
        };
        assert_eq!(product.quantity, expected_quantity);
        assert_eq!(product.description, expected_description);
    }
}

#[test]
fn builders_agree_on_product_values() {
    let text = "\n\n\nA\nB|3\nC||Tuercas\nD|9|Clavos";
    let order = run(RecordBuilder::new(), Some(text)).into_order();
    let xml = run(XmlBuilder::new(), Some(text));
    let table = run(TableBuilder::new(), Some(text));
    let html = run(HtmlBuilder::new(), Some(text)).to_html_string();

    let products = &xml.document().children()[0];
    let data_rows = &table.rows()[3..];

    assert_eq!(products.children().len(), order.products.len());
    assert_eq!(data_rows.len(), order.products.len());

    for (i, product) in order.products.iter().enumerate() {
        let element = &products.children()[i];
        assert_eq!(element.attribute("id"), Some(product.id.as_str()));
        assert_eq!(element.attribute("quantity"), Some(product.quantity.as_str()));
        assert_eq!(element.attribute("description"), Some(product.description.as_str()));

        assert_eq!(
            data_rows[i],
            vec![
                product.id.clone(),
                product.description.clone(),
                product.quantity.clone()
            ]
        );

        assert!(html.contains(&format!(
            "<td>{}</td><td>{}</td><td>{}</td>",
            product.id, product.description, product.quantity
        )));
    }
}

#[test]
fn custom_labels_flow_into_renderers() {
    let labels = LabelConfig {
        requestor: "Buyer".to_string(),
        provider: "Seller".to_string(),
        ..LabelConfig::default()
    };
    let text = "1\nR|Ana\nS|Luis";

    let html = run(HtmlBuilder::with_labels(labels.clone()), Some(text)).to_html_string();
    assert!(html.contains("<h3>Buyer: R - Ana</h3>"));
    assert!(html.contains("<h3>Seller: S - Luis</h3>"));

    let table = run(TableBuilder::with_labels(labels), Some(text)).to_text();
    assert!(table.contains("\nBuyer\nRFC|Name\nR|Ana"));
    assert!(table.contains("\nSeller\nRFC|Name\nS|Luis"));
}

//! Integration tests reading and writing .odt containers on disk.

use std::io::{Cursor, Write};

use odf_golden_odt::{Document, ElementKind, OdtError, OdtReader, TableShape};
use pretty_assertions::assert_eq;

const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
<office:body><office:text>
<table:table table:name="Inventory">
<table:table-row><table:table-cell><text:p>Item</text:p></table:table-cell><table:table-cell><text:p>Qty</text:p></table:table-cell></table:table-row>
<table:table-row><table:table-cell><text:p>Bolts</text:p></table:table-cell><table:table-cell><text:p>12</text:p></table:table-cell></table:table-row>
<table:table-row><table:table-cell><text:p>Nuts</text:p></table:table-cell><table:covered-table-cell/></table:table-row>
</table:table>
<table:table table:name="Empty"/>
</office:text></office:body>
</office:document-content>"#;

#[test]
fn test_save_and_open_preserves_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.odt");

    let doc = Document::from_content_xml(CONTENT).unwrap();
    doc.save(&path).unwrap();

    let loaded = Document::open(&path).unwrap();
    assert_eq!(
        loaded.mimetype(),
        Some("application/vnd.oasis.opendocument.text")
    );
    assert_eq!(
        loaded.table_shapes(),
        vec![
            TableShape {
                name: Some("Inventory".into()),
                row_cells: vec![2, 2, 1],
            },
            TableShape {
                name: Some("Empty".into()),
                row_cells: vec![],
            },
        ]
    );

    let cells: Vec<String> = loaded.tables()[0]
        .descendants_of_kind(ElementKind::TableCell)
        .into_iter()
        .map(odf_golden_odt::cell_text)
        .collect();
    assert_eq!(cells, vec!["Item", "Qty", "Bolts", "12", "Nuts"]);
}

#[test]
fn test_missing_content_part() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        zip.start_file("mimetype", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"application/vnd.oasis.opendocument.text")
            .unwrap();
        zip.finish().unwrap();
    }

    let err = OdtReader::read(Cursor::new(&buf)).unwrap_err();
    assert!(
        matches!(err, OdtError::MissingPart(ref part) if part == "content.xml"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_not_a_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.odt");
    std::fs::write(&path, "definitely not a zip archive").unwrap();

    let err = Document::open(&path).unwrap_err();
    assert!(matches!(err, OdtError::Zip(_)), "unexpected error: {err}");
}

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
<office:master-styles><style:master-page style:name="Standard"><style:header>
<table:table table:name="Header"><table:table-row><table:table-cell><text:p>Page header</text:p></table:table-cell></table:table-row></table:table>
</style:header></style:master-page></office:master-styles>
</office:document-styles>"#;

fn archive_with(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in parts {
            zip.start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn test_header_table_in_styles_part() {
    let with_header = archive_with(&[("styles.xml", STYLES), ("content.xml", CONTENT)]);
    let without_header = archive_with(&[("content.xml", CONTENT)]);

    let doc = OdtReader::read(Cursor::new(&with_header)).unwrap();
    let names: Vec<Option<String>> = doc.table_shapes().into_iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            Some("Header".to_string()),
            Some("Inventory".to_string()),
            Some("Empty".to_string()),
        ]
    );
    assert!(doc.styles().is_some());

    let doc = OdtReader::read(Cursor::new(&without_header)).unwrap();
    assert_eq!(doc.tables().len(), 2);
    assert!(doc.styles().is_none());
}

#[test]
fn test_save_keeps_styles_part() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("with_header.odt");

    let styles = OdtReader::parse_part_xml(STYLES, "styles.xml").unwrap();
    Document::from_content_xml(CONTENT)
        .unwrap()
        .with_styles(styles)
        .save(&path)
        .unwrap();

    let loaded = Document::open(&path).unwrap();
    assert_eq!(loaded.tables().len(), 3);
    assert_eq!(loaded.tables()[0].attribute("table:name"), Some("Header"));
}

//! Positional comparison of two documents' tables.
//!
//! Tables, rows and cells are paired by their order of appearance only. If the
//! two documents hold the same tables in a different order, the first pair
//! that differs is reported as a mismatch. Reported indices are 1-based.

use std::fmt;

use odf_golden_odt::{cell_text, Document, Element, ElementKind};

/// First difference found between a generated and an expected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Documents hold a different number of tables
    TableCount { generated: usize, expected: usize },
    /// Table counts differ (found by the dimensions check)
    DimensionsTableCount { generated: usize, expected: usize },
    /// A table pair has different row counts
    RowCount {
        table: usize,
        generated: usize,
        expected: usize,
    },
    /// A row pair has different cell counts (found by the dimensions check)
    CellCount {
        table: usize,
        row: usize,
        generated: usize,
        expected: usize,
    },
    /// A row pair has different cell counts (found by the content check)
    ContentCellCount {
        table: usize,
        row: usize,
        generated: usize,
        expected: usize,
    },
    /// A cell pair has different text
    CellText {
        table: usize,
        row: usize,
        column: usize,
        generated: String,
        expected: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::TableCount {
                generated,
                expected,
            } => write!(
                f,
                "Different numbers of Tables. Test: {generated} != Expected: {expected}"
            ),
            Mismatch::DimensionsTableCount { .. } => f.write_str(
                "Number of tables do not match between test and expected files.",
            ),
            Mismatch::RowCount {
                table,
                generated,
                expected,
            } => write!(
                f,
                "Row count mismatch in Table {table}. Test: {generated} != Expected: {expected}."
            ),
            Mismatch::CellCount {
                table,
                row,
                generated,
                expected,
            } => write!(
                f,
                "Column count mismatch in Table {table}, Row {row}. Test: {generated} != Expected: {expected}."
            ),
            Mismatch::ContentCellCount {
                table,
                row,
                generated,
                expected,
            } => write!(
                f,
                "Column count mismatch in table {table}, row {row}. Test: {generated} != Expected: {expected}"
            ),
            Mismatch::CellText {
                table,
                row,
                column,
                generated,
                expected,
            } => write!(
                f,
                "Cell content mismatch at table {table}, row {row}, column {column}. Test: '{generated}' != Expected: '{expected}'"
            ),
        }
    }
}

impl std::error::Error for Mismatch {}

/// Compare the number of tables.
pub fn compare_table_count(generated: &Document, expected: &Document) -> Result<(), Mismatch> {
    let generated = generated.tables().len();
    let expected = expected.tables().len();
    if generated != expected {
        return Err(Mismatch::TableCount {
            generated,
            expected,
        });
    }
    Ok(())
}

/// Compare table count, then rows per table, then cells per row.
pub fn compare_table_dimensions(
    generated: &Document,
    expected: &Document,
) -> Result<(), Mismatch> {
    compare_table_count(generated, expected).map_err(|mismatch| match mismatch {
        Mismatch::TableCount {
            generated,
            expected,
        } => Mismatch::DimensionsTableCount {
            generated,
            expected,
        },
        other => other,
    })?;

    for (table_index, (table1, table2)) in generated
        .tables()
        .into_iter()
        .zip(expected.tables())
        .enumerate()
    {
        let table = table_index + 1;
        let rows1 = table1.descendants_of_kind(ElementKind::TableRow);
        let rows2 = table2.descendants_of_kind(ElementKind::TableRow);
        if rows1.len() != rows2.len() {
            return Err(Mismatch::RowCount {
                table,
                generated: rows1.len(),
                expected: rows2.len(),
            });
        }

        for (row_index, (row1, row2)) in rows1.into_iter().zip(rows2).enumerate() {
            let cells1 = cell_count(row1);
            let cells2 = cell_count(row2);
            if cells1 != cells2 {
                return Err(Mismatch::CellCount {
                    table,
                    row: row_index + 1,
                    generated: cells1,
                    expected: cells2,
                });
            }
        }
    }
    Ok(())
}

/// Compare the text of every positionally paired cell.
///
/// Table and row counts are not checked: pairs past the end of the shorter
/// list are skipped. Cell counts are checked per row before the cells of that
/// row are compared.
pub fn compare_cell_content(generated: &Document, expected: &Document) -> Result<(), Mismatch> {
    for (table, (table1, table2)) in (1..).zip(generated.tables().into_iter().zip(expected.tables()))
    {
        let rows1 = table1.descendants_of_kind(ElementKind::TableRow);
        let rows2 = table2.descendants_of_kind(ElementKind::TableRow);

        for (row, (row1, row2)) in (1..).zip(rows1.into_iter().zip(rows2)) {
            let cells1 = row1.descendants_of_kind(ElementKind::TableCell);
            let cells2 = row2.descendants_of_kind(ElementKind::TableCell);
            if cells1.len() != cells2.len() {
                return Err(Mismatch::ContentCellCount {
                    table,
                    row,
                    generated: cells1.len(),
                    expected: cells2.len(),
                });
            }

            for (column, (cell1, cell2)) in (1..).zip(cells1.into_iter().zip(cells2)) {
                let text1 = cell_text(cell1);
                let text2 = cell_text(cell2);
                log::info!(
                    "Comparing cell at Table{table}({row}, {column}). Test: '{text1}' | Expected: '{text2}'"
                );
                if text1 != text2 {
                    return Err(Mismatch::CellText {
                        table,
                        row,
                        column,
                        generated: text1,
                        expected: text2,
                    });
                }
            }
        }
    }
    Ok(())
}

fn cell_count(row: &Element) -> usize {
    row.descendants_of_kind(ElementKind::TableCell).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a text document holding one table per entry of `tables`.
    fn doc(tables: &[&[&[&str]]]) -> Document {
        let mut xml = String::from(
            r#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text>"#,
        );
        for rows in tables {
            xml.push_str("<table:table>");
            for cells in rows.iter() {
                xml.push_str("<table:table-row>");
                for cell in cells.iter() {
                    xml.push_str(&format!(
                        "<table:table-cell><text:p>{cell}</text:p></table:table-cell>"
                    ));
                }
                xml.push_str("</table:table-row>");
            }
            xml.push_str("</table:table>");
        }
        xml.push_str("</office:text></office:body></office:document-content>");
        Document::from_content_xml(&xml).unwrap()
    }

    #[test]
    fn test_identical_documents_pass_every_comparison() {
        let a = doc(&[&[&["Item", "Qty"], &["Bolts", "12"]], &[&["x"]]]);
        compare_table_count(&a, &a).unwrap();
        compare_table_dimensions(&a, &a).unwrap();
        compare_cell_content(&a, &a).unwrap();
    }

    #[test]
    fn test_table_count_mismatch() {
        let generated = doc(&[&[&["a"]], &[&["b"]], &[&["c"]]]);
        let expected = doc(&[&[&["a"]], &[&["b"]]]);

        let err = compare_table_count(&generated, &expected).unwrap_err();
        assert_eq!(
            err,
            Mismatch::TableCount {
                generated: 3,
                expected: 2
            }
        );
        assert!(err.to_string().contains("Test: 3 != Expected: 2"));

        // The dimensions check repeats the table count check first.
        let err = compare_table_dimensions(&generated, &expected).unwrap_err();
        assert_eq!(
            err,
            Mismatch::DimensionsTableCount {
                generated: 3,
                expected: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "Number of tables do not match between test and expected files."
        );
    }

    #[test]
    fn test_header_tables_take_part_in_comparison() {
        let with_header = || {
            let styles = Document::from_content_xml(
                r#"<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:master-styles><style:master-page><style:header><table:table><table:table-row><table:table-cell><text:p>Page 1</text:p></table:table-cell></table:table-row></table:table></style:header></style:master-page></office:master-styles></office:document-styles>"#,
            )
            .unwrap();
            doc(&[&[&["body"]]]).with_styles(styles.root().clone())
        };
        let without_header = doc(&[&[&["body"]]]);

        let err = compare_table_count(&with_header(), &without_header).unwrap_err();
        assert!(err.to_string().contains("Test: 2 != Expected: 1"), "{err}");

        // Header tables pair first, so the body table is compared against the header.
        let err = compare_cell_content(&with_header(), &without_header).unwrap_err();
        assert!(
            matches!(&err, Mismatch::CellText { table: 1, generated, .. } if generated == "Page 1"),
            "{err}"
        );
        compare_cell_content(&with_header(), &with_header()).unwrap();
    }

    #[test]
    fn test_row_count_mismatch() {
        let generated = doc(&[&[&["a"]], &[&["b"], &["c"]]]);
        let expected = doc(&[&[&["a"]], &[&["b"]]]);

        let err = compare_table_dimensions(&generated, &expected).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Row count mismatch in Table 2. Test: 2 != Expected: 1."
        );
    }

    #[test]
    fn test_cell_count_mismatch() {
        let generated = doc(&[&[&["a", "b", "c"], &["d", "e", "f"]]]);
        let expected = doc(&[&[&["a", "b", "c"], &["d", "e", "f", "g"]]]);

        let err = compare_table_dimensions(&generated, &expected).unwrap_err();
        assert_eq!(
            err,
            Mismatch::CellCount {
                table: 1,
                row: 2,
                generated: 3,
                expected: 4
            }
        );
        let message = err.to_string();
        assert!(message.contains("Table 1, Row 2"), "{message}");
        assert!(message.contains("Test: 3 != Expected: 4"), "{message}");

        let err = compare_cell_content(&generated, &expected).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column count mismatch in table 1, row 2. Test: 3 != Expected: 4"
        );
    }

    #[test]
    fn test_cell_text_mismatch() {
        let generated = doc(&[&[&["Total: 42"]]]);
        let expected = doc(&[&[&["Total: 41"]]]);

        compare_table_dimensions(&generated, &expected).unwrap();
        let err = compare_cell_content(&generated, &expected).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cell content mismatch at table 1, row 1, column 1. Test: 'Total: 42' != Expected: 'Total: 41'"
        );
    }

    #[test]
    fn test_content_ignores_extra_tables() {
        let generated = doc(&[&[&["same"]], &[&["extra"]]]);
        let expected = doc(&[&[&["same"]]]);
        compare_cell_content(&generated, &expected).unwrap();
    }

    #[test]
    fn test_only_first_paragraph_is_compared() {
        let wrap = |second: &str| {
            Document::from_content_xml(&format!(
                r#"<t:table xmlns:t="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:p="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><t:table-row><t:table-cell><p:p>head</p:p><p:p>{second}</p:p></t:table-cell></t:table-row></t:table>"#
            ))
            .unwrap()
        };
        compare_cell_content(&wrap("one"), &wrap("two")).unwrap();
    }

    #[test]
    fn test_reordered_tables_are_reported() {
        let generated = doc(&[&[&["first"]], &[&["second"]]]);
        let expected = doc(&[&[&["second"]], &[&["first"]]]);
        let err = compare_cell_content(&generated, &expected).unwrap_err();
        assert!(matches!(err, Mismatch::CellText { table: 1, .. }), "{err}");
    }
}

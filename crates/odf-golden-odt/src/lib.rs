//! # odf-golden-odt
//!
//! OpenDocument Text (ODT) element tree reader and writer for odf-golden.
//!
//! Only `content.xml` is modelled. Elements are classified into the
//! structural kinds the comparator cares about (tables, rows, cells and
//! paragraphs) and can be queried by kind in document order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use odf_golden_odt::{cell_text, ElementKind, OdtReader};
//!
//! let doc = OdtReader::read_file("report.odt").unwrap();
//! for table in doc.tables() {
//!     for row in table.descendants_of_kind(ElementKind::TableRow) {
//!         for cell in row.descendants_of_kind(ElementKind::TableCell) {
//!             println!("{}", cell_text(cell));
//!         }
//!     }
//! }
//! ```

pub mod error;
pub mod reader;
pub mod tree;
pub mod writer;

pub use error::{OdtError, OdtResult};
pub use reader::OdtReader;
pub use tree::{cell_text, Document, Element, ElementKind, Node, TableShape};
pub use writer::OdtWriter;

impl Document {
    /// Load a document from an `.odt` file
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> OdtResult<Self> {
        OdtReader::read_file(path)
    }

    /// Parse a document from a `content.xml` string
    pub fn from_content_xml(xml: &str) -> OdtResult<Self> {
        OdtReader::parse_content_xml(xml)
    }

    /// Save the document as an `.odt` file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> OdtResult<()> {
        OdtWriter::write_file(self, path)
    }
}

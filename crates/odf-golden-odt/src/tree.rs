//! Element tree of an ODT document.
//!
//! The tree mirrors `content.xml` (and `styles.xml`) node for node: elements keep their qualified
//! names and attributes verbatim so they can be written back out, and text is
//! stored literally (unescaped, never trimmed).

use std::fmt;

/// OpenDocument table namespace
pub const TABLE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";

/// OpenDocument text namespace
pub const TEXT_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";

/// Structural kind of an element, resolved from its namespace URI and local name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `table:table`
    Table,
    /// `table:table-row`
    TableRow,
    /// `table:table-cell`
    TableCell,
    /// `text:p`
    Paragraph,
    /// Any other element
    Other,
}

impl ElementKind {
    /// Classify an element by namespace URI and local name.
    ///
    /// Classification ignores the prefix, so a document that binds the table
    /// namespace to `tbl:` still yields tables.
    pub fn resolve(namespace: &[u8], local_name: &[u8]) -> Self {
        if namespace == TABLE_NS.as_bytes() {
            match local_name {
                b"table" => ElementKind::Table,
                b"table-row" => ElementKind::TableRow,
                b"table-cell" => ElementKind::TableCell,
                _ => ElementKind::Other,
            }
        } else if namespace == TEXT_NS.as_bytes() && local_name == b"p" {
            ElementKind::Paragraph
        } else {
            ElementKind::Other
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Table => "Table",
            ElementKind::TableRow => "TableRow",
            ElementKind::TableCell => "TableCell",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (text or CDATA)
    Text(String),
}

impl Node {
    /// Whether this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Literal data of a text node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

/// An XML element with its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    kind: ElementKind,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with a qualified name (e.g. `table:table`)
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified name as written in the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structural kind
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Attributes in source order, including namespace declarations
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append an attribute
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Append a child node
    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// All descendant elements of `kind`, in document order.
    ///
    /// The element itself is never included. Nested structures are: a table
    /// inside a cell shows up both in the document's tables and, through its
    /// rows, in the enclosing table's rows.
    pub fn descendants_of_kind(&self, kind: ElementKind) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_descendants(self, kind, &mut found);
        found
    }

    /// Concatenated data of the direct text-node children.
    ///
    /// Text inside nested elements (spans, links, ...) is not included.
    pub fn direct_text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }
}

fn collect_descendants<'a>(element: &'a Element, kind: ElementKind, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if let Node::Element(child) = child {
            if child.kind == kind {
                found.push(child);
            }
            collect_descendants(child, kind, found);
        }
    }
}

/// Displayable text of a table cell.
///
/// Takes the first paragraph inside the cell and joins its direct text nodes.
/// A cell without any paragraph has empty text. Paragraphs after the first are
/// ignored.
pub fn cell_text(cell: &Element) -> String {
    cell.descendants_of_kind(ElementKind::Paragraph)
        .first()
        .map(|paragraph| paragraph.direct_text())
        .unwrap_or_default()
}

/// Row and cell counts of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    /// Value of `table:name`, if present
    pub name: Option<String>,
    /// Cell count of each row, in row order
    pub row_cells: Vec<usize>,
}

impl TableShape {
    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_cells.len()
    }

    /// Widest row
    pub fn max_cells(&self) -> usize {
        self.row_cells.iter().copied().max().unwrap_or(0)
    }
}

/// A loaded ODT document.
///
/// Holds the tree of `content.xml` and, when the container has one, the tree
/// of `styles.xml`. Whole-document queries visit the styles part first, so
/// tables in page headers and footers (`office:master-styles`) come before the
/// tables of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) mimetype: Option<String>,
    pub(crate) styles: Option<Element>,
    pub(crate) content: Element,
}

impl Document {
    /// Create a document from the root of `content.xml`
    pub fn new(content: Element) -> Self {
        Self {
            mimetype: None,
            styles: None,
            content,
        }
    }

    /// Attach the root of `styles.xml` (`office:document-styles`)
    pub fn with_styles(mut self, styles: Element) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Value of the container's `mimetype` entry, if it had one
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Root element of `content.xml` (`office:document-content`)
    pub fn root(&self) -> &Element {
        &self.content
    }

    /// Root element of `styles.xml`, if the document has one
    pub fn styles(&self) -> Option<&Element> {
        self.styles.as_ref()
    }

    /// All elements of `kind` in the document, in document order
    pub fn elements_by_kind(&self, kind: ElementKind) -> Vec<&Element> {
        let mut found = Vec::new();
        for part in self.styles.iter().chain(std::iter::once(&self.content)) {
            if part.kind == kind {
                found.push(part);
            }
            collect_descendants(part, kind, &mut found);
        }
        found
    }

    /// All tables, in document order
    pub fn tables(&self) -> Vec<&Element> {
        self.elements_by_kind(ElementKind::Table)
    }

    /// Row/cell inventory of every table
    pub fn table_shapes(&self) -> Vec<TableShape> {
        self.tables()
            .into_iter()
            .map(|table| TableShape {
                name: table.attribute("table:name").map(str::to_owned),
                row_cells: table
                    .descendants_of_kind(ElementKind::TableRow)
                    .into_iter()
                    .map(|row| row.descendants_of_kind(ElementKind::TableCell).len())
                    .collect(),
            })
            .collect()
    }
}

//! ODT reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::{OdtError, OdtResult};
use crate::tree::{Document, Element, ElementKind, Node};

/// Name of the main content part
pub const CONTENT_PART: &str = "content.xml";

/// Name of the styles part (page styles, headers and footers)
pub const STYLES_PART: &str = "styles.xml";

/// Name of the mimetype entry
pub const MIMETYPE_PART: &str = "mimetype";

/// ODT file reader
pub struct OdtReader;

impl OdtReader {
    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> OdtResult<Document> {
        let path = path.as_ref();
        log::debug!("Loading ODT document {}", path.display());
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a document from a reader
    pub fn read<R: Read + Seek>(reader: R) -> OdtResult<Document> {
        let mut archive = zip::ZipArchive::new(reader)?;

        let mimetype = match Self::read_part(&mut archive, MIMETYPE_PART) {
            Ok(mimetype) => Some(mimetype.trim().to_string()),
            Err(OdtError::MissingPart(_)) => None,
            Err(e) => return Err(e),
        };
        if let Some(mimetype) = &mimetype {
            if !mimetype.starts_with("application/vnd.oasis.opendocument") {
                log::warn!("Unexpected ODF mimetype: {mimetype}");
            }
        }

        let styles = match Self::read_part(&mut archive, STYLES_PART) {
            Ok(xml) => Some(Self::parse_part_xml(&xml, STYLES_PART)?),
            Err(OdtError::MissingPart(_)) => None,
            Err(e) => return Err(e),
        };

        let content = Self::read_part(&mut archive, CONTENT_PART)?;
        let mut document = Self::parse_content_xml(&content)?;
        document.mimetype = mimetype;
        document.styles = styles;
        Ok(document)
    }

    /// Parse a `content.xml` string (or a flat ODF document) into a tree
    pub fn parse_content_xml(xml: &str) -> OdtResult<Document> {
        Self::parse_part_xml(xml, CONTENT_PART).map(Document::new)
    }

    /// Parse one XML part of the container into its root element.
    ///
    /// `part` only names the part in errors.
    pub fn parse_part_xml(xml: &str, part: &str) -> OdtResult<Element> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_resolved_event()? {
                (ns, Event::Start(e)) => {
                    let element = Self::open_element(&ns, &e)?;
                    stack.push(element);
                }
                (ns, Event::Empty(e)) => {
                    let element = Self::open_element(&ns, &e)?;
                    Self::attach(&mut stack, &mut root, element, part)?;
                }
                (_, Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        OdtError::InvalidFormat(format!("Unbalanced end tag in {part}"))
                    })?;
                    Self::attach(&mut stack, &mut root, element, part)?;
                }
                (_, Event::Text(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape()?;
                        parent.push_child(Node::Text(text.into_owned()));
                    }
                }
                (_, Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8(e.into_inner().into_owned()).map_err(
                            |source| OdtError::Utf8 {
                                part: part.into(),
                                source,
                            },
                        )?;
                        parent.push_child(Node::Text(text));
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(OdtError::InvalidFormat(format!(
                "Unclosed element <{}> in {part}",
                open.name()
            )));
        }

        let root = root
            .ok_or_else(|| OdtError::InvalidFormat(format!("{part} has no root element")))?;
        log::trace!("Parsed {part} root <{}>", root.name());
        Ok(root)
    }

    fn read_part<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        name: &str,
    ) -> OdtResult<String> {
        let mut file = match archive.by_name(name) {
            Ok(f) => f,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OdtError::MissingPart(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        String::from_utf8(bytes).map_err(|source| OdtError::Utf8 {
            part: name.to_string(),
            source,
        })
    }

    fn open_element(
        ns: &ResolveResult,
        e: &quick_xml::events::BytesStart,
    ) -> OdtResult<Element> {
        let namespace: &[u8] = match ns {
            ResolveResult::Bound(Namespace(uri)) => *uri,
            _ => b"",
        };
        let kind = ElementKind::resolve(namespace, e.local_name().as_ref());
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let mut element = Element::new(name, kind);
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.push_attribute(key, value);
        }
        Ok(element)
    }

    fn attach(
        stack: &mut [Element],
        root: &mut Option<Element>,
        element: Element,
        part: &str,
    ) -> OdtResult<()> {
        if let Some(parent) = stack.last_mut() {
            parent.push_child(Node::Element(element));
        } else if root.is_none() {
            *root = Some(element);
        } else {
            return Err(OdtError::InvalidFormat(format!(
                "{part} has more than one root element"
            )));
        }
        Ok(())
    }
}

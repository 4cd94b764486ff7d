//! ODT writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::OdtResult;
use crate::reader::{CONTENT_PART, MIMETYPE_PART, STYLES_PART};
use crate::tree::{Document, Element, Node};

/// Mimetype of OpenDocument Text
pub const ODT_MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

/// ODT file writer
///
/// Produces the smallest container LibreOffice and odfpy accept: the stored
/// `mimetype` entry first, a manifest, `styles.xml` when the document has a
/// styles tree, and `content.xml`.
pub struct OdtWriter;

impl OdtWriter {
    /// Write a document to a file path
    pub fn write_file<P: AsRef<Path>>(document: &Document, path: P) -> OdtResult<()> {
        let file = File::create(path)?;
        Self::write(document, file)
    }

    /// Write a document to a writer
    pub fn write<W: Write + Seek>(document: &Document, writer: W) -> OdtResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let mimetype = document.mimetype().unwrap_or(ODT_MIMETYPE);

        // Write mimetype (must be first and uncompressed)
        let stored = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file(MIMETYPE_PART, stored)?;
        zip.write_all(mimetype.as_bytes())?;

        // Write META-INF/manifest.xml
        Self::write_manifest(&mut zip, mimetype, document.styles().is_some())?;

        // Write styles.xml (if present)
        if let Some(styles) = document.styles() {
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file(STYLES_PART, options)?;
            zip.write_all(&Self::part_xml(styles)?)?;
        }

        // Write content.xml
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(CONTENT_PART, options)?;
        zip.write_all(&Self::content_xml(document)?)?;

        zip.finish()?;
        Ok(())
    }

    /// Serialize the element tree as a `content.xml` document
    pub fn content_xml(document: &Document) -> OdtResult<Vec<u8>> {
        Self::part_xml(document.root())
    }

    fn part_xml(root: &Element) -> OdtResult<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Self::write_element(&mut writer, root)?;
        Ok(writer.into_inner())
    }

    fn write_manifest<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        mimetype: &str,
        has_styles: bool,
    ) -> OdtResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("META-INF/manifest.xml", options)?;

        let styles_entry = if has_styles {
            "\n <manifest:file-entry manifest:full-path=\"styles.xml\" manifest:media-type=\"text/xml\"/>"
        } else {
            ""
        };
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:media-type="{mimetype}"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>{styles_entry}
</manifest:manifest>"#
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> OdtResult<()> {
        let mut start = BytesStart::new(element.name());
        for (key, value) in element.attributes() {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.children().is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in element.children() {
            match child {
                Node::Element(child) => Self::write_element(writer, child)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(element.name())))?;
        Ok(())
    }
}

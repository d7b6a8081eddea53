//! Minimal element tree for the SUMO input files and an indented writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::OutputResult;

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Root element declaring the schema it conforms to.
    pub fn with_schema(name: &str, schema_location: &str) -> Self {
        Self::new(name)
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xsi:noNamespaceSchemaLocation", schema_location)
    }

    pub fn attr(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    fn write_into<W: Write>(&self, writer: &mut Writer<W>) -> OutputResult<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// Writes `root` to `file_path` with a declaration and 4-space indentation,
/// replacing any previous file.
pub fn write_xml(root: &XmlElement, file_path: &Path) -> OutputResult<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    root.write_into(&mut writer)?;

    let mut output = writer.into_inner();
    output.write_all(b"\n")?;
    output.flush()?;
    debug!("Wrote <{}> to {}", root.name(), file_path.display());
    Ok(())
}

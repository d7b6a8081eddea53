use std::path::Path;

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub type Attributes = IndexMap<String, String>;

fn attributes_of(tag: &BytesStart) -> Attributes {
    tag.attributes()
        .map(|attr| {
            let attr = attr.expect("malformed attribute");
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().expect("bad escape").into_owned();
            (key, value)
        })
        .collect()
}

fn visit(file_path: &Path, mut on_tag: impl FnMut(&BytesStart)) {
    let mut reader = Reader::from_file(file_path).expect("Failed to create XML reader");
    let mut buffer = Vec::new();
    loop {
        match reader.read_event_into(&mut buffer) {
            Err(error) => panic!(
                "Failed to read xml at position {} with error {:?}",
                reader.buffer_position(),
                error
            ),
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) | Ok(Event::Empty(tag)) => on_tag(&tag),
            _ => {}
        }
        buffer.clear();
    }
}

/// Attributes of every `name` element in document order.
pub fn read_elements(file_path: &Path, name: &str) -> Vec<Attributes> {
    let mut found = Vec::new();
    visit(file_path, |tag| {
        if tag.name().as_ref() == name.as_bytes() {
            found.push(attributes_of(tag));
        }
    });
    found
}

/// Names of all elements in document order.
pub fn element_names(file_path: &Path) -> Vec<String> {
    let mut names = Vec::new();
    visit(file_path, |tag| {
        names.push(String::from_utf8_lossy(tag.name().as_ref()).into_owned())
    });
    names
}

pub fn root_attributes(file_path: &Path) -> Attributes {
    let mut root = None;
    visit(file_path, |tag| {
        if root.is_none() {
            root = Some(attributes_of(tag));
        }
    });
    root.unwrap_or_default()
}

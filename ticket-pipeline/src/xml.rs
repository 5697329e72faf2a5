//! Conversion between XML documents and `serde_json::Value` trees.
//!
//! Parsing follows the usual XML-to-dict conventions:
//!
//! - an element with only text becomes a string, an empty element becomes `null`
//! - an element with children becomes an object keyed by child name
//! - repeated sibling elements collapse into an array
//! - attributes become `@name` keys and text next to children becomes `#text`
//!
//! Element names keep their namespace prefix (`soapenv:Body`). Writing is the
//! reverse mapping, with an XML declaration and tab indentation.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};
use thiserror::Error;

const ATTRIBUTE_PREFIX: char = '@';
const TEXT_KEY: &str = "#text";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("unclosed element <{0}>")]
    Unclosed(String),

    #[error("closing tag without a matching opening tag")]
    UnexpectedEnd,

    #[error("text outside the root element")]
    StrayText,

    #[error("invalid XML name {0:?}")]
    InvalidName(String),

    #[error("expected an object with exactly one root key")]
    InvalidRoot,

    #[error("failed to write XML: {0}")]
    Write(String),
}

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                String::from_utf8_lossy(attribute.key.as_ref())
            );
            let value = attribute.unescape_value()?.into_owned();
            attributes.insert(key, Value::String(value));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn finish(self) -> (String, Value) {
        if self.attributes.is_empty() && self.children.is_empty() {
            let value = if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            };
            return (self.name, value);
        }

        let mut object = self.attributes;
        object.extend(self.children);
        if !self.text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(object))
    }
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn close(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
) -> Result<(), XmlError> {
    let (name, value) = frame.finish();
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some((name, value)),
    }
    Ok(())
}

fn push_text(stack: &mut [Frame], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(frame) => frame.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::StrayText),
    }
    Ok(())
}

/// Parses an XML document into a single-key object `{root_name: value}`.
pub fn xml_to_value(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                close(frame, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                close(frame, &mut stack, &mut root)?;
            }
            Event::Text(text) => push_text(&mut stack, &text.unescape()?)?,
            Event::CData(data) => push_text(&mut stack, &String::from_utf8_lossy(&data))?,
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed(open.name.clone()));
    }

    let (name, value) = root.ok_or(XmlError::NoRoot)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// Looks up a child by local name, ignoring any namespace prefix.
pub fn child_by_local_name<'a>(value: &'a Value, local_name: &str) -> Option<&'a Value> {
    value.as_object()?.iter().find_map(|(key, child)| {
        let local = key.rsplit(':').next().unwrap_or(key);
        (local == local_name).then_some(child)
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    if !is_valid_name(name) {
        return Err(XmlError::InvalidName(name.to_string()));
    }

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Null => emit(writer, Event::Empty(BytesStart::new(name)))?,
        Value::Object(fields) => {
            let mut start = BytesStart::new(name);
            let mut text = None;
            let mut children = Vec::new();

            for (key, field) in fields {
                if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                    if !is_valid_name(attribute) {
                        return Err(XmlError::InvalidName(key.clone()));
                    }
                    start.push_attribute((attribute, scalar_text(field).as_str()));
                } else if key == TEXT_KEY {
                    text = Some(scalar_text(field));
                } else {
                    children.push((key.as_str(), field));
                }
            }

            if text.is_none() && children.is_empty() {
                return emit(writer, Event::Empty(start));
            }

            emit(writer, Event::Start(start))?;
            if let Some(text) = text {
                emit(writer, Event::Text(BytesText::new(&text)))?;
            }
            for (child_name, child) in children {
                write_element(writer, child_name, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            let text = scalar_text(scalar);
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(name)))?;
        }
    }

    Ok(())
}

/// Serializes a single-key object `{root_name: value}` into an XML document.
pub fn value_to_xml(document: &Value) -> Result<String, XmlError> {
    let (root_name, root) = match document.as_object() {
        Some(fields) if fields.len() == 1 => fields.iter().next().ok_or(XmlError::InvalidRoot)?,
        _ => return Err(XmlError::InvalidRoot),
    };

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_element(&mut writer, root_name, root)?;

    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

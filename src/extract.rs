//! Streaming extraction of xpath-like keys from a single descriptor.
//!
//! One pass over the document's pull events maintains an explicit stack
//! of open elements. When an element closes, it contributes its keys:
//! the plain ancestor path (root elided), one `path/attr` key per
//! attribute, and any synthetic keys the special rules yield. `meta`
//! elements with a `name` attribute instead contribute the single key
//! `path[name-value]`, since for those only the name carries meaning.

use std::collections::HashSet;

use anyhow::{Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::special::SpecialRule;

/// Element whose `name` attribute is folded into the path key.
const META_TAG: &str = "meta";

/// One open element on the traversal stack.
struct Frame {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Text directly after the start tag, before any child element.
    text: Option<String>,
    saw_child: bool,
}

impl Frame {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn open_frame(start: &BytesStart<'_>) -> Result<Frame> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(Frame {
        tag,
        attrs,
        text: None,
        saw_child: false,
    })
}

fn record_text(stack: &mut [Frame], raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    if let Some(frame) = stack.last_mut() {
        // Tail text after a child belongs to the child's position in the
        // document, not to this element's value. Before the first child,
        // adjacent text and CDATA segments concatenate.
        if !frame.saw_child {
            frame.text.get_or_insert_with(String::new).push_str(trimmed);
        }
    }
}

/// Pop the innermost open element and add its keys.
fn close_frame(stack: &mut Vec<Frame>, keys: &mut HashSet<String>, rules: &[SpecialRule]) {
    let Some(frame) = stack.pop() else { return };

    // Ancestor chain with the document root elided; empty for the root
    // element itself.
    let mut path: Vec<&str> = stack.iter().skip(1).map(|f| f.tag.as_str()).collect();
    if !stack.is_empty() {
        path.push(&frame.tag);
    }

    if frame.tag == META_TAG {
        if let Some(name) = frame.attr("name").filter(|n| !n.is_empty()) {
            keys.insert(format!("{}[{}]", path.join("/"), name));
            return;
        }
    }

    if path.is_empty() {
        return;
    }

    keys.insert(path.join("/"));
    for rule in rules {
        rule.apply(&frame.tag, frame.text.as_deref(), &frame.attrs, keys);
    }
    for (attr_name, attr_value) in &frame.attrs {
        keys.insert(format!("{}/{}", path.join("/"), attr_name));
        for rule in rules {
            rule.apply(attr_name, Some(attr_value), &frame.attrs, keys);
        }
    }
}

/// Collect the set of xpath-like keys occurring in one document.
///
/// Fails on markup that cannot be traversed as a tree; there is no
/// partial recovery, callers skip the whole document.
pub fn gather_paths(xml: &[u8], rules: &[SpecialRule]) -> Result<HashSet<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut keys = HashSet::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                if let Some(parent) = stack.last_mut() {
                    parent.saw_child = true;
                }
                stack.push(open_frame(&start)?);
            }
            Event::Empty(start) => {
                if let Some(parent) = stack.last_mut() {
                    parent.saw_child = true;
                }
                stack.push(open_frame(&start)?);
                close_frame(&mut stack, &mut keys, rules);
            }
            Event::End(_) => close_frame(&mut stack, &mut keys, rules),
            Event::Text(text) => {
                let text = text.unescape()?;
                record_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                record_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        bail!("document ended with unclosed element <{}>", open.tag);
    }

    Ok(keys)
}

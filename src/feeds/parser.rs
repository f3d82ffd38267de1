//! Streaming RSS/Atom entry extraction.
//!
//! Walks the document with `quick_xml::Reader` and only looks at direct
//! children of `<item>` / `<entry>`, so nested elements such as
//! `<media:content><media:title>` never overwrite the headline. Element names
//! are compared by local name, which makes `dc:date` and `date` the same
//! thing.

use crate::error::FetchError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};

/// One feed entry before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Raw publish date exactly as the feed wrote it.
    pub published: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Published,
    Updated,
}

impl Field {
    fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "link" => Some(Field::Link),
            "pubDate" | "date" | "published" | "issued" => Some(Field::Published),
            "updated" | "modified" => Some(Field::Updated),
            _ => None,
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    title: Option<String>,
    link: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

impl EntryBuilder {
    fn set(&mut self, field: Field, value: String) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    fn finish(self) -> RawEntry {
        RawEntry {
            title: self.title,
            link: self.link,
            published: self.published.or(self.updated),
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// `href` of an Atom `<link>` that points at the article itself.
fn atom_href(e: &BytesStart<'_>) -> Option<String> {
    let rel = e
        .try_get_attribute("rel")
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()));
    if !matches!(rel.as_deref(), None | Some("alternate")) {
        return None;
    }
    e.try_get_attribute("href")
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// The five XML entities plus the HTML ones headline writers actually use.
fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "aacute" => "á",
        "eacute" => "é",
        "iacute" => "í",
        "oacute" => "ó",
        "uacute" => "ú",
        "Aacute" => "Á",
        "Eacute" => "É",
        "Iacute" => "Í",
        "Oacute" => "Ó",
        "Uacute" => "Ú",
        "ntilde" => "ñ",
        "Ntilde" => "Ñ",
        "uuml" => "ü",
        "ouml" => "ö",
        "auml" => "ä",
        "ccedil" => "ç",
        "iexcl" => "¡",
        "iquest" => "¿",
        "laquo" => "«",
        "raquo" => "»",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "middot" => "·",
        "euro" => "€",
        "pound" => "£",
        "deg" => "°",
        "copy" => "©",
        "reg" => "®",
        _ => return None,
    })
}

/// Unescape a text node. Entities neither XML nor [`resolve_entity`] knows
/// are kept verbatim while everything around them is still decoded.
fn unescape_text(e: &BytesText<'_>) -> String {
    if let Ok(text) = e.unescape_with(resolve_entity) {
        return text.into_owned();
    }
    let raw = String::from_utf8_lossy(e);
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw.as_ref();
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi > 1 && semi <= 32)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|d| (d, semi)));
        match decoded {
            Some((text, semi)) => {
                out.push_str(&text);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_entity(name).map(str::to_string)
}

fn is_feed_root(name: &str) -> bool {
    matches!(name, "rss" | "feed" | "RDF")
}

/// Extract entries from an RSS 2.0, RSS 1.0 (RDF) or Atom document, in
/// document order.
///
/// # Errors
///
/// [`FetchError::Xml`] for malformed XML and [`FetchError::NotAFeed`] when
/// the root element is not a feed (an HTML error page, for instance).
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>, FetchError> {
    // Text is trimmed per field, not per node, so `a <![CDATA[b]]> c` keeps
    // its inner spaces.
    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut entry_depth: Option<usize> = None;
    let mut current = EntryBuilder::default();
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = local_name(&e);
                if !seen_root {
                    seen_root = true;
                    if !is_feed_root(&name) {
                        return Err(FetchError::NotAFeed(name));
                    }
                }
                match entry_depth {
                    None if name == "item" || name == "entry" => {
                        entry_depth = Some(depth);
                        current = EntryBuilder::default();
                    }
                    Some(d) if depth == d + 1 => {
                        field = Field::from_local_name(&name);
                        text.clear();
                        if field == Some(Field::Link) {
                            if let Some(href) = atom_href(&e) {
                                current.set(Field::Link, href);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                if !seen_root {
                    seen_root = true;
                    if !is_feed_root(&name) {
                        return Err(FetchError::NotAFeed(name));
                    }
                }
                if entry_depth == Some(depth) && name == "link" {
                    if let Some(href) = atom_href(&e) {
                        current.set(Field::Link, href);
                    }
                }
            }
            Event::Text(e) => {
                if field.is_some() {
                    text.push_str(&unescape_text(&e));
                }
            }
            Event::CData(e) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                if let Some(d) = entry_depth {
                    if depth == d + 1 {
                        if let Some(f) = field.take() {
                            current.set(f, std::mem::take(&mut text));
                        }
                    } else if depth == d {
                        entries.push(std::mem::take(&mut current).finish());
                        entry_depth = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(FetchError::NotAFeed("empty document".to_string()));
    }
    Ok(entries)
}

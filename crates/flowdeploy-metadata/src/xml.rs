//! Narrow field extraction for SOAP payloads.
//!
//! Only what the metadata responses need: find an element by local name
//! (any namespace prefix), read its text, and escape values going out.

use std::{borrow::Cow, ops::Range};

struct Span {
    outer: Range<usize>,
    inner: Range<usize>,
}

fn local_name(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

fn find(xml: &str, tag: &str, from: usize) -> Option<Span> {
    let mut pos = from;
    while let Some(rel) = xml[pos..].find('<') {
        let open = pos + rel;
        pos = open + 1;

        let rest = &xml[open + 1..];
        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let qname = &rest[..name_len];
        if qname.is_empty() || local_name(qname) != tag {
            continue;
        }

        let gt = open + 1 + rest.find('>')?;
        if xml[..gt].ends_with('/') {
            return Some(Span {
                outer: open..gt + 1,
                inner: gt + 1..gt + 1,
            });
        }

        let close = format!("</{qname}>");
        let close_at = gt + 1 + xml[gt + 1..].find(&close)?;
        return Some(Span {
            outer: open..close_at + close.len(),
            inner: gt + 1..close_at,
        });
    }
    None
}

/// Raw content of the first element named `tag`.
pub(crate) fn element<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    find(xml, tag, 0).map(|s| &xml[s.inner])
}

/// Raw content of every element named `tag`, in document order.
pub(crate) fn elements<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut from = 0;
    while let Some(span) = find(xml, tag, from) {
        out.push(&xml[span.inner.clone()]);
        from = span.outer.end;
    }
    out
}

/// Decoded, trimmed text of the first element named `tag`.
pub(crate) fn text(xml: &str, tag: &str) -> Option<String> {
    element(xml, tag).map(|raw| unescape(raw.trim()).into_owned())
}

/// `xml` with every element named `tag` cut out.
pub(crate) fn without(xml: &str, tag: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut from = 0;
    while let Some(span) = find(xml, tag, from) {
        out.push_str(&xml[from..span.outer.start]);
        from = span.outer.end;
    }
    out.push_str(&xml[from..]);
    out
}

pub(crate) fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

pub(crate) fn unescape(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

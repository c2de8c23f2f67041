//! Best-effort markup tokenizer.
//!
//! Produces a flat list of open/close tags, text spans, and raw-text blocks
//! (`<script>`, `<style>`). Never fails: an unterminated construct ends the
//! scan and everything after it is treated as "not found".

use std::ops::Range;

use smallvec::SmallVec;

/// A single attribute on an open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Offset just past the attribute name.
    pub name_end: usize,
    /// Raw value without quotes; `None` for boolean attributes.
    pub value: Option<String>,
    /// Byte range of the value inside the source, quotes excluded.
    pub value_span: Option<Range<usize>>,
    /// JSX expression value (`onClick={handler}`).
    pub expression: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct Tag {
    /// Lowercased tag name.
    pub name: String,
    pub kind: TagKind,
    /// Offset of the `<`.
    pub start: usize,
    /// Offset just past the `>`.
    pub end: usize,
    /// Offset just past the tag name; attribute insertion point.
    pub name_end: usize,
    pub self_closing: bool,
    pub attrs: SmallVec<[Attribute; 4]>,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// String value of an attribute. JSX expressions are returned verbatim.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|a| a.value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is_open(&self) -> bool {
        self.kind == TagKind::Open
    }
}

/// Body of a raw-text element, keyed by the index of its open tag.
#[derive(Debug, Clone)]
pub struct RawBlock {
    pub tag: usize,
    pub span: Range<usize>,
}

#[derive(Debug, Default)]
pub struct Tokens {
    pub doctype: Option<usize>,
    pub tags: Vec<Tag>,
    pub text: Vec<Range<usize>>,
    pub raw_blocks: Vec<RawBlock>,
}

/// Elements whose content is never scanned for tags.
const RAW_TEXT: &[&str] = &["script", "style"];
/// Elements whose content is text only.
const TEXT_ONLY: &[&str] = &["textarea", "title"];

pub fn tokenize(src: &str) -> Tokens {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut out = Tokens::default();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < len {
        let Some(rel) = src[pos..].find('<') else {
            break;
        };
        let lt = pos + rel;

        match bytes.get(lt + 1).copied() {
            Some(b'!') => {
                push_text(&mut out, text_start, lt);
                if src[lt..].starts_with("<!--") {
                    pos = match src[lt + 4..].find("-->") {
                        Some(r) => lt + 4 + r + 3,
                        None => len,
                    };
                } else {
                    let Some(r) = src[lt..].find('>') else {
                        text_start = len;
                        break;
                    };
                    if out.doctype.is_none() && starts_with_ignore_case(&bytes[lt + 2..], b"doctype")
                    {
                        out.doctype = Some(lt);
                    }
                    pos = lt + r + 1;
                }
                text_start = pos;
            }
            Some(b'?') => {
                push_text(&mut out, text_start, lt);
                let Some(r) = src[lt..].find('>') else {
                    text_start = len;
                    break;
                };
                pos = lt + r + 1;
                text_start = pos;
            }
            Some(b'/') if bytes.get(lt + 2).is_some_and(u8::is_ascii_alphabetic) => {
                let name_end = scan_name(bytes, lt + 2);
                let Some(r) = src[name_end..].find('>') else {
                    push_text(&mut out, text_start, lt);
                    text_start = len;
                    break;
                };
                push_text(&mut out, text_start, lt);
                let end = name_end + r + 1;
                out.tags.push(Tag {
                    name: src[lt + 2..name_end].to_ascii_lowercase(),
                    kind: TagKind::Close,
                    start: lt,
                    end,
                    name_end,
                    self_closing: false,
                    attrs: SmallVec::new(),
                });
                pos = end;
                text_start = pos;
            }
            Some(b) if b.is_ascii_alphabetic() => {
                push_text(&mut out, text_start, lt);
                let Some(tag) = parse_open_tag(src, lt) else {
                    text_start = len;
                    break;
                };
                let end = tag.end;
                let raw = !tag.self_closing && RAW_TEXT.contains(&tag.name.as_str());
                let text_only = !tag.self_closing && TEXT_ONLY.contains(&tag.name.as_str());
                let content_end = (raw || text_only).then(|| find_close(bytes, end, &tag.name).unwrap_or(len));
                let idx = out.tags.len();
                out.tags.push(tag);
                pos = end;

                if let Some(content_end) = content_end {
                    if raw {
                        out.raw_blocks.push(RawBlock {
                            tag: idx,
                            span: end..content_end,
                        });
                    } else {
                        push_text(&mut out, end, content_end);
                    }
                    pos = content_end;
                }
                text_start = pos;
            }
            _ => {
                // Literal '<' in text.
                pos = lt + 1;
            }
        }
    }

    push_text(&mut out, text_start, len);
    out
}

fn push_text(out: &mut Tokens, start: usize, end: usize) {
    if start < end {
        out.text.push(start..end);
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_' | b'.')
}

fn scan_name(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

/// Finds the `</name` that closes a raw-text element, case-insensitively.
fn find_close(bytes: &[u8], from: usize, name: &str) -> Option<usize> {
    let name = name.as_bytes();
    let mut i = from;
    while i + 1 < bytes.len() {
        if bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && starts_with_ignore_case(&bytes[i + 2..], name)
            && !bytes.get(i + 2 + name.len()).is_some_and(|b| is_name_byte(*b))
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Skips a balanced `{...}` JSX expression starting at `i`; returns the
/// offset just past the closing brace.
fn skip_braces(bytes: &[u8], mut i: usize) -> Option<usize> {
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            q @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != q {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_open_tag(src: &str, lt: usize) -> Option<Tag> {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let name_end = scan_name(bytes, lt + 1);
    let name = src[lt + 1..name_end].to_ascii_lowercase();
    let mut attrs: SmallVec<[Attribute; 4]> = SmallVec::new();
    let mut i = name_end;

    loop {
        i = skip_ws(bytes, i);
        match *bytes.get(i)? {
            b'>' => {
                return Some(Tag {
                    name,
                    kind: TagKind::Open,
                    start: lt,
                    end: i + 1,
                    name_end,
                    self_closing: false,
                    attrs,
                });
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(Tag {
                    name,
                    kind: TagKind::Open,
                    start: lt,
                    end: i + 2,
                    name_end,
                    self_closing: true,
                    attrs,
                });
            }
            b'/' | b'=' => i += 1,
            b'{' => i = skip_braces(bytes, i)?,
            _ => {
                let an_start = i;
                while i < len {
                    let b = bytes[i];
                    if b.is_ascii_whitespace()
                        || b == b'='
                        || b == b'>'
                        || (b == b'/' && bytes.get(i + 1) == Some(&b'>'))
                    {
                        break;
                    }
                    i += 1;
                }
                let attr_name = src[an_start..i].to_ascii_lowercase();
                let j = skip_ws(bytes, i);

                let mut attr = Attribute {
                    name: attr_name,
                    name_end: i,
                    value: None,
                    value_span: None,
                    expression: false,
                };

                if bytes.get(j) == Some(&b'=') {
                    let v = skip_ws(bytes, j + 1);
                    match *bytes.get(v)? {
                        q @ (b'"' | b'\'') => {
                            let close = v + 1 + src[v + 1..].find(q as char)?;
                            attr.value = Some(src[v + 1..close].to_string());
                            attr.value_span = Some(v + 1..close);
                            i = close + 1;
                        }
                        b'{' => {
                            let end = skip_braces(bytes, v)?;
                            attr.value = Some(src[v..end].to_string());
                            attr.value_span = Some(v..end);
                            attr.expression = true;
                            i = end;
                        }
                        _ => {
                            let mut k = v;
                            while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                                k += 1;
                            }
                            attr.value = Some(src[v..k].to_string());
                            attr.value_span = Some(v..k);
                            i = k;
                        }
                    }
                }
                attrs.push(attr);
            }
        }
    }
}

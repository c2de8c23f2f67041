//! DocumentModel: read-only structural view over a markup string.

use std::ops::Range;

use rustc_hash::FxHashMap;

use super::lines::LineIndex;
use super::tokenizer::{self, RawBlock, Tag, TagKind};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Best-effort structural facts about a markup string.
///
/// Built fresh from any string and never patched; fixes rebuild it after
/// every transform.
#[derive(Debug)]
pub struct DocumentModel<'a> {
    source: &'a str,
    doctype: Option<usize>,
    tags: Vec<Tag>,
    /// Index of the matching close tag for each open tag.
    closers: Vec<Option<usize>>,
    /// Index of the next open tag with the same name.
    next_same: Vec<Option<usize>>,
    text: Vec<Range<usize>>,
    raw_blocks: Vec<RawBlock>,
    lines: LineIndex,
}

impl<'a> DocumentModel<'a> {
    pub fn parse(source: &'a str) -> Self {
        let tokens = tokenizer::tokenize(source);
        let closers = match_closers(&tokens.tags);
        let next_same = match_next_same(&tokens.tags);
        Self {
            source,
            doctype: tokens.doctype,
            tags: tokens.tags,
            closers,
            next_same,
            text: tokens.text,
            raw_blocks: tokens.raw_blocks,
            lines: LineIndex::new(source),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn doctype_offset(&self) -> Option<usize> {
        self.doctype
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, idx: usize) -> &Tag {
        &self.tags[idx]
    }

    /// Open tags with the given (lowercase) name, in document order.
    pub fn open_tags<'s>(&'s self, name: &'s str) -> impl Iterator<Item = (usize, &'s Tag)> + 's {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.kind == TagKind::Open && t.name == name)
    }

    pub fn first_open(&self, name: &str) -> Option<(usize, &Tag)> {
        self.tags
            .iter()
            .enumerate()
            .find(|(_, t)| t.kind == TagKind::Open && t.name == name)
    }

    /// Byte ranges of text between tags, in document order.
    pub fn text_spans(&self) -> &[Range<usize>] {
        &self.text
    }

    pub fn closing_index(&self, idx: usize) -> Option<usize> {
        self.closers.get(idx).copied().flatten()
    }

    /// Byte range covered by the element opened at `idx`. Unclosed elements
    /// extend to the end of the document.
    pub fn element_range(&self, idx: usize) -> Range<usize> {
        let open = &self.tags[idx];
        if open.self_closing || is_void(&open.name) {
            return open.start..open.end;
        }
        match self.closing_index(idx) {
            Some(c) => open.start..self.tags[c].end,
            None => open.start..self.source.len(),
        }
    }

    /// Byte range between the open tag and its closing tag, cut short at
    /// the next element of the same name. Nested links and buttons are
    /// invalid markup, and the cut keeps text extraction linear overall.
    fn content_range(&self, idx: usize) -> Range<usize> {
        let open = &self.tags[idx];
        if open.self_closing || is_void(&open.name) {
            return open.end..open.end;
        }
        let close = self
            .closing_index(idx)
            .map_or(self.source.len(), |c| self.tags[c].start);
        let next = self
            .next_same
            .get(idx)
            .copied()
            .flatten()
            .map_or(self.source.len(), |n| self.tags[n].start);
        open.end..close.min(next).max(open.end)
    }

    /// Visible text inside an element, whitespace-collapsed.
    pub fn inner_text(&self, idx: usize) -> String {
        let range = self.content_range(idx);
        let first = self.text.partition_point(|s| s.start < range.start);
        let raw: String = self.text[first..]
            .iter()
            .take_while(|s| s.end <= range.end)
            .map(|s| &self.source[s.clone()])
            .collect::<Vec<_>>()
            .join(" ");
        normalize_text(&raw)
    }

    /// Text plus the `alt` of nested images; what a screen reader announces
    /// for links and buttons absent ARIA overrides.
    pub fn accessible_text(&self, idx: usize) -> String {
        let mut text = self.inner_text(idx);
        let range = self.content_range(idx);
        let first = self.tags.partition_point(|t| t.start < range.start);
        for tag in self.tags[first..].iter().take_while(|t| t.start < range.end) {
            if tag.is_open() && tag.name == "img" {
                if let Some(alt) = tag.attr_value("alt") {
                    if !alt.trim().is_empty() {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                        text.push_str(alt.trim());
                    }
                }
            }
        }
        text
    }

    /// Whether the tag at `idx` lies inside an element named `ancestor`.
    pub fn is_inside(&self, idx: usize, ancestor: &str) -> bool {
        let start = self.tags[idx].start;
        self.open_tags(ancestor)
            .take_while(|(i, _)| *i < idx)
            .any(|(i, _)| self.element_range(i).contains(&start))
    }

    pub fn head_range(&self) -> Option<Range<usize>> {
        let (idx, _) = self.first_open("head")?;
        let range = self.element_range(idx);
        // An unclosed head ends where the body begins.
        if self.closing_index(idx).is_none() {
            if let Some((_, body)) = self.first_open("body") {
                return Some(range.start..body.start.max(range.start));
            }
        }
        Some(range)
    }

    pub fn body_range(&self) -> Option<Range<usize>> {
        let (idx, _) = self.first_open("body")?;
        Some(self.element_range(idx))
    }

    pub fn in_head(&self, offset: usize) -> bool {
        self.head_range().is_some_and(|r| r.contains(&offset))
    }

    /// Bodies of raw-text elements with the given name as
    /// `(open tag index, body offset, body)`.
    pub fn raw_blocks<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = (usize, usize, &'a str)> + 's {
        let source = self.source;
        self.raw_blocks
            .iter()
            .filter(move |b| self.tags[b.tag].name == name)
            .map(move |b| (b.tag, b.span.start, &source[b.span.clone()]))
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, offset: usize) -> u32 {
        self.lines.line_of(offset)
    }
}

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Pairs every close tag with the nearest unclosed open tag of the same name.
fn match_closers(tags: &[Tag]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tags.len()];
    let mut stacks: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, tag) in tags.iter().enumerate() {
        match tag.kind {
            TagKind::Open if !tag.self_closing && !is_void(&tag.name) => {
                stacks.entry(tag.name.as_str()).or_default().push(i);
            }
            TagKind::Open => {}
            TagKind::Close => {
                if let Some(open) = stacks.get_mut(tag.name.as_str()).and_then(Vec::pop) {
                    closers[open] = Some(i);
                }
            }
        }
    }
    closers
}

/// For every open tag, the next open tag with the same name.
fn match_next_same(tags: &[Tag]) -> Vec<Option<usize>> {
    let mut next = vec![None; tags.len()];
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, tag) in tags.iter().enumerate().rev() {
        if tag.kind == TagKind::Open {
            next[i] = seen.insert(tag.name.as_str(), i);
        }
    }
    next
}

/// Collapses whitespace and decodes the handful of entities that matter for
/// text comparisons.
fn normalize_text(raw: &str) -> String {
    let decoded = raw
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Above-the-fold classifier for images.
//!
//! Shared by the lazy-loading rule and its transform so that detection and
//! repair always agree on which images may be deferred.

use std::ops::Range;

use aho_corasick::AhoCorasick;
use pagegate_core::config::AutoFixConfig;
use pagegate_core::errors::CatalogError;

use crate::catalog::ids;
use crate::document::DocumentModel;

/// Attributes searched for above-the-fold keywords.
const KEYWORD_ATTRS: &[&str] = &["class", "classname", "id", "alt"];

/// Tags the structural fixes insert; they never count toward content position.
const INSERTED_TAGS: &[&str] = &["html", "head", "meta"];

#[derive(Debug, Clone)]
pub struct AboveFoldClassifier {
    keywords: AhoCorasick,
    leading_images: usize,
    ratio: f64,
}

impl AboveFoldClassifier {
    pub fn new(keywords: &[String], leading_images: usize, ratio: f64) -> Result<Self, CatalogError> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords)
            .map_err(|e| CatalogError::InvalidPattern {
                rule_id: ids::IMG_LAZY_LOADING.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            keywords: matcher,
            leading_images,
            ratio,
        })
    }

    pub fn from_config(config: &AutoFixConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.effective_above_fold_keywords(),
            config.effective_above_fold_image_count(),
            config.effective_above_fold_ratio(),
        )
    }

    /// Indices of `<img>` tags without `loading` that are not above the fold.
    pub fn deferrable_images(&self, doc: &DocumentModel<'_>) -> Vec<usize> {
        let layout = ContentLayout::new(doc);
        let mut preceding = 0;
        let mut deferrable = Vec::new();
        for (idx, tag) in doc.open_tags("img") {
            let in_scope = layout.scope.contains(&tag.start);
            if !tag.has_attr("loading") && !self.protects(doc, &layout, idx, in_scope.then_some(preceding)) {
                deferrable.push(idx);
            }
            if in_scope {
                preceding += 1;
            }
        }
        deferrable
    }

    /// `preceding` is the number of earlier images in the fold scope, or
    /// `None` when the image lies outside it.
    fn protects(&self, doc: &DocumentModel<'_>, layout: &ContentLayout, idx: usize, preceding: Option<usize>) -> bool {
        let tag = doc.tag(idx);

        let keyword_hit = KEYWORD_ATTRS
            .iter()
            .filter_map(|name| tag.attr_value(name))
            .any(|value| self.keywords.is_match(value));
        if keyword_hit || doc.is_inside(idx, "header") {
            return true;
        }

        let Some(preceding) = preceding else {
            return false;
        };
        preceding < self.leading_images
            || (layout.positions[idx] as f64) < layout.total as f64 * self.ratio
    }
}

/// Content position of every tag within the fold scope: the body, or the
/// whole document when there is none.
///
/// Text counts its non-whitespace bytes and each tag its name and
/// delimiters. Attribute edits and head insertions leave every position
/// unchanged, so fixing never moves an image across the fold.
struct ContentLayout {
    scope: Range<usize>,
    positions: Vec<usize>,
    total: usize,
}

impl ContentLayout {
    fn new(doc: &DocumentModel<'_>) -> Self {
        let scope = doc.body_range().unwrap_or(0..doc.len());
        let source = doc.source();
        let text_units = |span: &Range<usize>| {
            if scope.contains(&span.start) {
                source.get(span.clone()).map_or(0, content_bytes)
            } else {
                0
            }
        };

        let mut positions = Vec::with_capacity(doc.tags().len());
        let mut units = 0;
        let mut spans = doc.text_spans().iter().peekable();
        for tag in doc.tags() {
            while let Some(span) = spans.next_if(|s| s.start < tag.start) {
                units += text_units(span);
            }
            positions.push(units);
            if scope.contains(&tag.start) && !INSERTED_TAGS.contains(&tag.name.as_str()) {
                units += tag.name.len() + if tag.is_open() { 2 } else { 3 };
            }
        }
        units += spans.map(text_units).sum::<usize>();

        Self {
            scope,
            positions,
            total: units,
        }
    }
}

fn content_bytes(text: &str) -> usize {
    text.bytes().filter(|b| !b.is_ascii_whitespace()).count()
}

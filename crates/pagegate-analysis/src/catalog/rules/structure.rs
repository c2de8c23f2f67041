//! Document-structure rules: doctype, charset, viewport, lang, title, headings.

use std::ops::Range;

use pagegate_core::errors::RuleError;

use super::{attr_is, is_blank, Rule, RuleContext};
use crate::catalog::meta;
use crate::catalog::types::{Finding, RuleMeta};
use crate::document::DocumentModel;

pub struct DoctypeRule;

impl Rule for DoctypeRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::DOCTYPE
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        if ctx.doc.doctype_offset().is_some() {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            self.meta(),
            "Missing <!DOCTYPE html> declaration",
            None,
        )])
    }
}

/// One charset declaration found in a `<meta>` tag.
#[derive(Debug, Clone)]
pub struct CharsetDecl {
    pub tag: usize,
    pub value: String,
    /// Byte span of the charset value itself, when it can be rewritten.
    pub value_span: Option<Range<usize>>,
}

impl CharsetDecl {
    pub fn is_utf8(&self) -> bool {
        is_utf8(&self.value)
    }
}

pub fn is_utf8(value: &str) -> bool {
    let v = value.trim().trim_matches(|c| c == '"' || c == '\'');
    v.eq_ignore_ascii_case("utf-8") || v.eq_ignore_ascii_case("utf8")
}

/// Every `<meta charset>` and `http-equiv="content-type"` declaration.
pub fn charset_declarations(doc: &DocumentModel<'_>) -> Vec<CharsetDecl> {
    let mut decls = Vec::new();
    for (idx, tag) in doc.open_tags("meta") {
        if let Some(attr) = tag.attr("charset") {
            if attr.expression {
                continue;
            }
            decls.push(CharsetDecl {
                tag: idx,
                value: attr.value.clone().unwrap_or_default(),
                value_span: attr.value_span.clone(),
            });
            continue;
        }
        if !attr_is(tag.attr_value("http-equiv"), "content-type") {
            continue;
        }
        let Some(content) = tag.attr("content") else {
            continue;
        };
        let (Some(value), Some(span)) = (content.value.as_deref(), content.value_span.as_ref())
        else {
            continue;
        };
        if let Some(rel) = charset_param(value) {
            decls.push(CharsetDecl {
                tag: idx,
                value: value[rel.clone()].to_string(),
                value_span: Some(span.start + rel.start..span.start + rel.end),
            });
        }
    }
    decls
}

/// Span of the `charset=` parameter value within a content-type string.
fn charset_param(content: &str) -> Option<Range<usize>> {
    let lower = content.to_ascii_lowercase();
    let key = lower.find("charset=")?;
    let start = key + "charset=".len();
    let len = content[start..]
        .find(|c: char| c == ';' || c.is_whitespace())
        .unwrap_or(content.len() - start);
    Some(start..start + len)
}

pub struct CharsetRule;

impl Rule for CharsetRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::CHARSET
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let decls = charset_declarations(ctx.doc);
        if decls.iter().any(CharsetDecl::is_utf8) {
            return Ok(Vec::new());
        }
        let finding = match decls.first() {
            Some(decl) => ctx.finding_at(
                self.meta(),
                ctx.doc.tag(decl.tag).start,
                format!("Declared charset '{}' is not UTF-8", decl.value.trim()),
            ),
            None => Finding::new(self.meta(), "Missing <meta charset=\"UTF-8\">", None),
        };
        Ok(vec![finding])
    }
}

/// The first `<meta name="viewport">` with non-blank content.
pub fn viewport_meta(doc: &DocumentModel<'_>) -> Option<usize> {
    doc.open_tags("meta")
        .find(|(_, t)| attr_is(t.attr_value("name"), "viewport") && !is_blank(t.attr_value("content")))
        .map(|(i, _)| i)
}

pub struct ViewportRule;

impl Rule for ViewportRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::VIEWPORT
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        if viewport_meta(ctx.doc).is_some() {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            self.meta(),
            "Missing <meta name=\"viewport\"> with content",
            None,
        )])
    }
}

pub struct HtmlLangRule;

impl Rule for HtmlLangRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::HTML_LANG
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let finding = match ctx.doc.first_open("html") {
            None => Finding::new(
                self.meta(),
                "No <html> element to carry a lang attribute",
                None,
            ),
            Some((_, tag)) => match tag.attr("lang") {
                Some(attr) if attr.expression => return Ok(Vec::new()),
                Some(attr) if !is_blank(attr.value.as_deref()) => return Ok(Vec::new()),
                Some(_) => ctx.finding_at(self.meta(), tag.start, "<html> has a blank lang attribute"),
                None => ctx.finding_at(self.meta(), tag.start, "<html> is missing a lang attribute"),
            },
        };
        Ok(vec![finding])
    }
}

pub struct TitleRule;

impl Rule for TitleRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::TITLE
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let finding = match ctx.doc.first_open("title") {
            Some((idx, tag)) => {
                if !ctx.doc.inner_text(idx).is_empty() {
                    return Ok(Vec::new());
                }
                ctx.finding_at(self.meta(), tag.start, "<title> is empty")
            }
            None => Finding::new(self.meta(), "Missing <title>", None),
        };
        Ok(vec![finding])
    }
}

pub struct SingleH1Rule;

impl Rule for SingleH1Rule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::SINGLE_H1
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let h1s: Vec<usize> = ctx.doc.open_tags("h1").map(|(_, t)| t.start).collect();
        let finding = match h1s.as_slice() {
            [] => Finding::new(self.meta(), "Missing <h1> heading", None),
            [_] => return Ok(Vec::new()),
            [_, second, ..] => ctx.finding_at(
                self.meta(),
                *second,
                format!("Found {} <h1> elements; expected exactly one", h1s.len()),
            ),
        };
        Ok(vec![finding])
    }
}

pub struct HeadingHierarchyRule;

impl Rule for HeadingHierarchyRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::HEADING_HIERARCHY
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        let mut previous: Option<u8> = None;
        for tag in ctx.doc.tags().iter().filter(|t| t.is_open()) {
            let Some(level) = heading_level(&tag.name) else {
                continue;
            };
            if let Some(prev) = previous {
                if level > prev + 1 {
                    findings.push(ctx.finding_at(
                        self.meta(),
                        tag.start,
                        format!("Heading level skips from h{prev} to h{level}"),
                    ));
                }
            }
            previous = Some(level);
        }
        Ok(findings)
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_charset_is_located() {
        let src = r#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        let doc = DocumentModel::parse(src);
        let decls = charset_declarations(&doc);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].value, "ISO-8859-1");
        let span = decls[0].value_span.clone().unwrap();
        assert_eq!(&src[span], "ISO-8859-1");
    }

    #[test]
    fn utf8_spellings() {
        assert!(is_utf8("UTF-8"));
        assert!(is_utf8(" utf8 "));
        assert!(!is_utf8("latin1"));
    }

    #[test]
    fn heading_levels() {
        assert_eq!(heading_level("h3"), Some(3));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }
}

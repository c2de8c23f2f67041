//! The fix transforms. Each is a pure function from one markup string to the
//! next: parse a fresh model, compute edits, apply them in one batch.

use pagegate_core::errors::FixError;

use super::above_fold::AboveFoldClassifier;
use super::edit::{apply_edits, Edit};
use crate::catalog::rules::performance::lazy_candidates;
use crate::catalog::rules::security::{missing_rel_tokens, REQUIRED_REL};
use crate::catalog::rules::structure::{charset_declarations, viewport_meta, CharsetDecl};
use crate::catalog::FixKind;
use crate::document::DocumentModel;

pub const DOCTYPE_DECL: &str = "<!DOCTYPE html>\n";
pub const CHARSET_META: &str = "<meta charset=\"UTF-8\">";
pub const VIEWPORT_META: &str =
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">";

/// Result of one transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub html: String,
    pub applied: bool,
    pub description: Option<String>,
}

impl FixOutcome {
    fn unchanged(html: &str) -> Self {
        Self {
            html: html.to_string(),
            applied: false,
            description: None,
        }
    }

    fn applied(html: String, description: impl Into<String>) -> Self {
        Self {
            html,
            applied: true,
            description: Some(description.into()),
        }
    }
}

/// Settings transforms need from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct FixContext<'a> {
    pub classifier: &'a AboveFoldClassifier,
    pub default_lang: &'a str,
}

pub fn run_transform(kind: FixKind, html: &str, ctx: &FixContext<'_>) -> Result<FixOutcome, FixError> {
    match kind {
        FixKind::InsertDoctype => insert_doctype(html),
        FixKind::InsertCharset => insert_charset(html),
        FixKind::InsertViewport => insert_viewport(html),
        FixKind::InsertLang => insert_lang(html, ctx.default_lang),
        FixKind::LazyLoadImages => lazy_load_images(html, ctx.classifier),
        FixKind::SecureTargetBlank => secure_target_blank(html),
    }
}

pub fn insert_doctype(html: &str) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    if doc.doctype_offset().is_some() {
        return Ok(FixOutcome::unchanged(html));
    }
    let fixed = apply_edits(FixKind::InsertDoctype, html, vec![Edit::insert(0, DOCTYPE_DECL)])?;
    Ok(FixOutcome::applied(fixed, "Added <!DOCTYPE html> declaration"))
}

/// Where a new `<head>` element belongs: right after `<head>`, or after
/// `<html>` wrapped in a new head, or after the doctype, or at the very start.
fn head_insertion(doc: &DocumentModel<'_>, element: &str) -> Edit {
    if let Some((_, head)) = doc.first_open("head") {
        return Edit::insert(head.end, element);
    }
    if let Some((_, html)) = doc.first_open("html") {
        return Edit::insert(html.end, format!("<head>{element}</head>"));
    }
    let after_doctype = doc
        .doctype_offset()
        .and_then(|off| doc.source()[off..].find('>').map(|r| off + r + 1))
        .unwrap_or(0);
    Edit::insert(after_doctype, element)
}

pub fn insert_charset(html: &str) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    let decls = charset_declarations(&doc);
    if decls.iter().any(CharsetDecl::is_utf8) {
        return Ok(FixOutcome::unchanged(html));
    }

    if let Some((decl, span)) = decls
        .iter()
        .find_map(|d| d.value_span.clone().map(|span| (d, span)))
    {
        let previous = decl.value.trim().to_string();
        let fixed = apply_edits(FixKind::InsertCharset, html, vec![Edit::replace(span, "UTF-8")])?;
        return Ok(FixOutcome::applied(
            fixed,
            format!("Changed declared charset from '{previous}' to UTF-8"),
        ));
    }

    let edit = head_insertion(&doc, CHARSET_META);
    let fixed = apply_edits(FixKind::InsertCharset, html, vec![edit])?;
    Ok(FixOutcome::applied(fixed, "Added <meta charset=\"UTF-8\">"))
}

pub fn insert_viewport(html: &str) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    if viewport_meta(&doc).is_some() {
        return Ok(FixOutcome::unchanged(html));
    }

    let decls = charset_declarations(&doc);
    let anchor = decls
        .iter()
        .find(|d| d.is_utf8())
        .or_else(|| decls.first())
        .map(|d| doc.tag(d.tag).end);
    let edit = match anchor {
        Some(at) => Edit::insert(at, VIEWPORT_META),
        None => head_insertion(&doc, VIEWPORT_META),
    };
    let fixed = apply_edits(FixKind::InsertViewport, html, vec![edit])?;
    Ok(FixOutcome::applied(fixed, "Added responsive viewport meta tag"))
}

/// Fragments without `<html>` are left alone rather than wrapped.
pub fn insert_lang(html: &str, lang: &str) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    let Some((_, tag)) = doc.first_open("html") else {
        return Ok(FixOutcome::unchanged(html));
    };

    let edit = match tag.attr("lang") {
        None => Edit::insert(tag.name_end, format!(" lang=\"{lang}\"")),
        Some(attr) if attr.expression => return Ok(FixOutcome::unchanged(html)),
        Some(attr) if attr.value.as_deref().is_some_and(|v| !v.trim().is_empty()) => {
            return Ok(FixOutcome::unchanged(html));
        }
        Some(attr) => match &attr.value_span {
            Some(span) => Edit::replace(span.clone(), lang),
            None => Edit::insert(attr.name_end, format!("=\"{lang}\"")),
        },
    };
    let fixed = apply_edits(FixKind::InsertLang, html, vec![edit])?;
    Ok(FixOutcome::applied(fixed, format!("Added lang=\"{lang}\" to <html>")))
}

/// Classification ignores attributes, so one pass leaves no candidate behind.
pub fn lazy_load_images(html: &str, classifier: &AboveFoldClassifier) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    let edits: Vec<Edit> = lazy_candidates(&doc, classifier)
        .into_iter()
        .map(|idx| Edit::insert(doc.tag(idx).name_end, " loading=\"lazy\""))
        .collect();
    if edits.is_empty() {
        return Ok(FixOutcome::unchanged(html));
    }
    let count = edits.len();
    let fixed = apply_edits(FixKind::LazyLoadImages, html, edits)?;
    Ok(FixOutcome::applied(
        fixed,
        format!("Added loading=\"lazy\" to {count} below-the-fold {}", plural(count, "image")),
    ))
}

pub fn secure_target_blank(html: &str) -> Result<FixOutcome, FixError> {
    let doc = DocumentModel::parse(html);
    let mut edits = Vec::new();
    for (_, tag) in doc.open_tags("a") {
        let missing = missing_rel_tokens(tag);
        if missing.is_empty() {
            continue;
        }
        let edit = match tag.attr("rel") {
            None => Edit::insert(tag.name_end, format!(" rel=\"{}\"", REQUIRED_REL.join(" "))),
            Some(attr) => {
                let mut tokens: Vec<&str> = attr
                    .value
                    .as_deref()
                    .unwrap_or("")
                    .split_whitespace()
                    .collect();
                tokens.extend(missing.iter().copied());
                let merged = tokens.join(" ");
                match &attr.value_span {
                    Some(span) if is_quoted(html, span.start) => Edit::replace(span.clone(), merged),
                    Some(span) => Edit::replace(span.clone(), format!("\"{merged}\"")),
                    None => Edit::insert(attr.name_end, format!("=\"{merged}\"")),
                }
            }
        };
        edits.push(edit);
    }
    if edits.is_empty() {
        return Ok(FixOutcome::unchanged(html));
    }
    let count = edits.len();
    let fixed = apply_edits(FixKind::SecureTargetBlank, html, edits)?;
    Ok(FixOutcome::applied(
        fixed,
        format!(
            "Added rel=\"noopener noreferrer\" to {count} external {}",
            plural(count, "link")
        ),
    ))
}

fn is_quoted(html: &str, value_start: usize) -> bool {
    value_start > 0 && matches!(html.as_bytes()[value_start - 1], b'"' | b'\'')
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_goes_after_head() {
        let out = insert_charset("<html><head><title>t</title></head></html>").unwrap();
        assert_eq!(
            out.html,
            "<html><head><meta charset=\"UTF-8\"><title>t</title></head></html>"
        );
    }

    #[test]
    fn charset_wraps_missing_head() {
        let out = insert_charset("<html><body></body></html>").unwrap();
        assert_eq!(
            out.html,
            "<html><head><meta charset=\"UTF-8\"></head><body></body></html>"
        );
    }

    #[test]
    fn charset_value_is_rewritten_in_place() {
        let src = r#"<head><meta charset="latin1"></head>"#;
        let out = insert_charset(src).unwrap();
        assert_eq!(out.html, r#"<head><meta charset="UTF-8"></head>"#);
        assert!(out.applied);
    }

    #[test]
    fn viewport_follows_charset() {
        let src = r#"<head><meta charset="utf-8"><title>t</title></head>"#;
        let out = insert_viewport(src).unwrap();
        assert!(out.html.starts_with(&format!(r#"<head><meta charset="utf-8">{VIEWPORT_META}"#)));
    }

    #[test]
    fn lang_fills_blank_value() {
        let out = insert_lang(r#"<html lang=""><body></body></html>"#, "en").unwrap();
        assert_eq!(out.html, r#"<html lang="en"><body></body></html>"#);
    }

    #[test]
    fn lang_skips_fragments() {
        let out = insert_lang("<div>x</div>", "en").unwrap();
        assert!(!out.applied);
        assert_eq!(out.html, "<div>x</div>");
    }

    #[test]
    fn rel_tokens_are_merged() {
        let src = r#"<a href="https://x.io" target="_blank" rel="nofollow">x</a>"#;
        let out = secure_target_blank(src).unwrap();
        assert_eq!(
            out.html,
            r#"<a href="https://x.io" target="_blank" rel="nofollow noopener noreferrer">x</a>"#
        );
    }

    #[test]
    fn unquoted_rel_is_requoted() {
        let src = r#"<a href="https://x.io" target=_blank rel=nofollow>x</a>"#;
        let out = secure_target_blank(src).unwrap();
        assert!(out.html.contains(r#"rel="nofollow noopener noreferrer""#));
    }

    #[test]
    fn internal_new_tab_links_untouched() {
        let src = r#"<a href="/about" target="_blank">About</a>"#;
        assert!(!secure_target_blank(src).unwrap().applied);
    }
}

//! Accessibility heuristics. None of these prove WCAG conformance; they catch
//! the defects generated markup most often ships with.

use regex::Regex;
use rustc_hash::FxHashSet;

use pagegate_core::errors::{CatalogError, RuleError};

use super::{attr_is, is_blank, Rule, RuleContext};
use crate::catalog::meta;
use crate::catalog::types::{Finding, RuleMeta};
use crate::document::Tag;

const GENERIC_ALT: &[&str] = &["image", "photo", "picture", "img", "graphic", "placeholder"];

const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more",
    "learn more",
    "link",
    "this link",
];

const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Elements that are keyboard-focusable without a tabindex.
const NATIVELY_FOCUSABLE: &[&str] = &["a", "button", "input", "select", "textarea", "summary"];

const MIN_CONTRAST: f64 = 4.5;

fn src_label(tag: &Tag) -> &str {
    tag.attr_value("src").unwrap_or("(no src)")
}

fn is_hidden_image(tag: &Tag) -> bool {
    attr_is(tag.attr_value("role"), "presentation")
        || attr_is(tag.attr_value("role"), "none")
        || attr_is(tag.attr_value("aria-hidden"), "true")
}

pub struct ImgAltRule;

impl Rule for ImgAltRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::IMG_ALT
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        Ok(ctx
            .doc
            .open_tags("img")
            .filter(|(_, t)| !t.has_attr("alt") && !is_hidden_image(t))
            .map(|(_, t)| {
                ctx.finding_at(
                    self.meta(),
                    t.start,
                    format!("Image {} is missing an alt attribute", src_label(t)),
                )
            })
            .collect())
    }
}

pub struct ImgAltTextRule {
    file_name: Regex,
}

impl ImgAltTextRule {
    pub fn new() -> Result<Self, CatalogError> {
        let file_name = Regex::new(r"(?i)^[\w\-. ]+\.(?:png|jpe?g|gif|svg|webp|avif|bmp|ico)$")
            .map_err(|e| CatalogError::InvalidPattern {
                rule_id: meta::IMG_ALT_TEXT.id.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { file_name })
    }

    fn is_poor(&self, alt: &str) -> bool {
        let alt = alt.trim();
        let lower = alt.to_ascii_lowercase();
        GENERIC_ALT.contains(&lower.as_str()) || self.file_name.is_match(alt)
    }
}

impl Rule for ImgAltTextRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::IMG_ALT_TEXT
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (_, tag) in ctx.doc.open_tags("img") {
            let Some(attr) = tag.attr("alt") else {
                continue;
            };
            if attr.expression {
                continue;
            }
            let alt = attr.value.as_deref().unwrap_or("");
            if !alt.trim().is_empty() && self.is_poor(alt) {
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Alt text '{}' does not describe the image", alt.trim()),
                ));
            }
        }
        Ok(findings)
    }
}

pub struct FormLabelRule;

impl Rule for FormLabelRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::FORM_LABEL
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let doc = ctx.doc;
        let label_targets: FxHashSet<&str> = doc
            .open_tags("label")
            .filter_map(|(_, t)| t.attr_value("for").or_else(|| t.attr_value("htmlfor")))
            .map(str::trim)
            .collect();

        let mut findings = Vec::new();
        for (idx, tag) in doc.tags().iter().enumerate() {
            if !tag.is_open() || !matches!(tag.name.as_str(), "input" | "select" | "textarea") {
                continue;
            }
            if tag.name == "input" {
                let kind = tag.attr_value("type").unwrap_or("text").trim().to_ascii_lowercase();
                if UNLABELLED_INPUT_TYPES.contains(&kind.as_str()) {
                    continue;
                }
            }
            let labelled = !is_blank(tag.attr_value("aria-label"))
                || !is_blank(tag.attr_value("aria-labelledby"))
                || !is_blank(tag.attr_value("title"))
                || tag
                    .attr_value("id")
                    .is_some_and(|id| label_targets.contains(id.trim()))
                || doc.is_inside(idx, "label");
            if !labelled {
                let control = match tag.attr_value("name").or_else(|| tag.attr_value("id")) {
                    Some(name) => format!("<{} {}>", tag.name, name.trim()),
                    None => format!("<{}>", tag.name),
                };
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Form control {control} has no associated label"),
                ));
            }
        }
        Ok(findings)
    }
}

pub struct LinkTextRule;

impl Rule for LinkTextRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::LINK_TEXT
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (idx, tag) in ctx.doc.open_tags("a") {
            let text = match tag.attr_value("aria-label").filter(|v| !v.trim().is_empty()) {
                Some(label) => label.trim().to_string(),
                None => ctx.doc.accessible_text(idx),
            };
            let normalized = text
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if GENERIC_LINK_TEXT.contains(&normalized.as_str()) {
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Link text '{text}' does not describe its destination"),
                ));
            }
        }
        Ok(findings)
    }
}

pub struct ButtonNameRule;

impl Rule for ButtonNameRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::BUTTON_NAME
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (idx, tag) in ctx.doc.tags().iter().enumerate() {
            if !tag.is_open() {
                continue;
            }
            if tag.name == "button" {
                let named = !is_blank(tag.attr_value("aria-label"))
                    || !is_blank(tag.attr_value("aria-labelledby"))
                    || !is_blank(tag.attr_value("title"))
                    || !ctx.doc.accessible_text(idx).is_empty();
                if !named {
                    findings.push(ctx.finding_at(
                        self.meta(),
                        tag.start,
                        "Button has no accessible name",
                    ));
                }
            } else if attr_is(tag.attr_value("role"), "button")
                && !NATIVELY_FOCUSABLE.contains(&tag.name.as_str())
                && !tag.has_attr("tabindex")
            {
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!(
                        "<{} role=\"button\"> is not keyboard focusable; add tabindex or use <button>",
                        tag.name
                    ),
                ));
            }
        }
        Ok(findings)
    }
}

pub struct ColorContrastRule;

impl ColorContrastRule {
    fn check_block(&self, block: &str) -> Option<String> {
        let mut fg = None;
        let mut bg = None;
        for decl in block.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            match prop.as_str() {
                "color" => fg = parse_hex(value).map(|c| (value.to_string(), c)),
                "background-color" | "background" => {
                    bg = value
                        .split_whitespace()
                        .find_map(|tok| parse_hex(tok).map(|c| (tok.to_string(), c)))
                }
                _ => {}
            }
        }
        let ((fg_text, fg), (bg_text, bg)) = (fg?, bg?);
        let ratio = contrast_ratio(fg, bg);
        (ratio < MIN_CONTRAST).then(|| {
            format!("Low contrast {ratio:.2}:1 between {fg_text} and {bg_text} (minimum 4.5:1)")
        })
    }
}

impl Rule for ColorContrastRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::COLOR_CONTRAST
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let doc = ctx.doc;
        let mut findings = Vec::new();

        for tag in doc.tags().iter().filter(|t| t.is_open()) {
            let Some(style) = tag.attr("style") else {
                continue;
            };
            if style.expression {
                continue;
            }
            if let Some(msg) = style.value.as_deref().and_then(|v| self.check_block(v)) {
                findings.push(ctx.finding_at(self.meta(), tag.start, msg));
            }
        }

        for (_, offset, body) in doc.raw_blocks("style") {
            for (rel, block) in css_blocks(body) {
                if let Some(msg) = self.check_block(block) {
                    findings.push(ctx.finding_at(self.meta(), offset + rel, msg));
                }
            }
        }

        if let Some(css) = ctx.css {
            for (_, block) in css_blocks(css) {
                if let Some(msg) = self.check_block(block) {
                    findings.push(Finding::new(self.meta(), msg, None));
                }
            }
        }

        Ok(findings)
    }
}

/// Innermost `{...}` declaration blocks with their offsets.
fn css_blocks(css: &str) -> Vec<(usize, &str)> {
    let mut blocks = Vec::new();
    let mut open = None;
    for (i, b) in css.bytes().enumerate() {
        match b {
            b'{' => open = Some(i),
            b'}' => {
                if let Some(start) = open.take() {
                    blocks.push((start, &css[start + 1..i]));
                }
            }
            _ => {}
        }
    }
    blocks
}

fn parse_hex(value: &str) -> Option<[f64; 3]> {
    let hex = value.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    match hex.len() {
        // #abc is shorthand for #aabbcc.
        3 => Some([
            channel(&hex[0..1])? * 17.0,
            channel(&hex[1..2])? * 17.0,
            channel(&hex[2..3])? * 17.0,
        ]),
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        _ => None,
    }
}

fn relative_luminance([r, g, b]: [f64; 3]) -> f64 {
    let linear = |c: f64| {
        let c = c / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

pub fn contrast_ratio(a: [f64; 3], b: [f64; 3]) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_maximal() {
        let ratio = contrast_ratio([0.0; 3], [255.0; 3]);
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(parse_hex("#fff"), Some([255.0, 255.0, 255.0]));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("red"), None);
    }

    #[test]
    fn nested_blocks_use_innermost() {
        let blocks = css_blocks("@media print { .a { color: #000; } }");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].1.trim(), "color: #000;");
    }

    #[test]
    fn grey_on_grey_is_flagged() {
        let rule = ColorContrastRule;
        assert!(rule.check_block("color: #777; background: #888").is_some());
        assert!(rule.check_block("color: #000; background-color: #fff").is_none());
        assert!(rule.check_block("color: #777").is_none());
    }

    #[test]
    fn file_name_alt_is_poor() {
        let rule = ImgAltTextRule::new().unwrap();
        assert!(rule.is_poor("IMG_2031.jpg"));
        assert!(rule.is_poor("Photo"));
        assert!(!rule.is_poor("Team photo at the 2024 offsite"));
    }
}

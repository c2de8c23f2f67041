//! Client-side security rules.

use regex::Regex;

use pagegate_core::errors::{CatalogError, RuleError};

use super::{attr_is, Rule, RuleContext};
use crate::catalog::meta;
use crate::catalog::types::{Finding, RuleMeta};
use crate::document::Tag;

/// `rel` tokens required on external new-tab links.
pub const REQUIRED_REL: [&str; 2] = ["noopener", "noreferrer"];

pub fn is_external_href(href: &str) -> bool {
    let href = href.trim().to_ascii_lowercase();
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

/// Required `rel` tokens missing from an external `target="_blank"` link.
/// Empty when the tag is not such a link, is already safe, or carries
/// expression values that cannot be judged statically.
pub fn missing_rel_tokens(tag: &Tag) -> Vec<&'static str> {
    if tag.name != "a" || !attr_is(tag.attr_value("target"), "_blank") {
        return Vec::new();
    }
    let href = match tag.attr("href") {
        Some(a) if !a.expression => a.value.as_deref().unwrap_or(""),
        _ => return Vec::new(),
    };
    if !is_external_href(href) {
        return Vec::new();
    }
    let rel = match tag.attr("rel") {
        Some(a) if a.expression => return Vec::new(),
        Some(a) => a.value.as_deref().unwrap_or("").to_ascii_lowercase(),
        None => String::new(),
    };
    REQUIRED_REL
        .iter()
        .copied()
        .filter(|req| !rel.split_whitespace().any(|tok| tok == *req))
        .collect()
}

pub struct TargetBlankRule;

impl Rule for TargetBlankRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::TARGET_BLANK
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (_, tag) in ctx.doc.open_tags("a") {
            let missing = missing_rel_tokens(tag);
            if missing.is_empty() {
                continue;
            }
            findings.push(ctx.finding_at(
                self.meta(),
                tag.start,
                format!(
                    "Link to {} opens a new tab without rel=\"{}\"",
                    tag.attr_value("href").unwrap_or("").trim(),
                    missing.join(" ")
                ),
            ));
        }
        Ok(findings)
    }
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("on")
        && name[2..].bytes().all(|b| b.is_ascii_lowercase())
}

pub struct InlineHandlerRule;

impl Rule for InlineHandlerRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::INLINE_HANDLER
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for tag in ctx.doc.tags().iter().filter(|t| t.is_open()) {
            for attr in &tag.attrs {
                if attr.expression || attr.value.is_none() || !is_event_handler(&attr.name) {
                    continue;
                }
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Inline event handler {} on <{}>", attr.name, tag.name),
                ));
            }
        }
        Ok(findings)
    }
}

/// Script types that are data, not code.
fn is_data_script(tag: &Tag) -> bool {
    tag.attr_value("type").is_some_and(|t| {
        let t = t.trim().to_ascii_lowercase();
        t.contains("json") || t == "text/template" || t == "text/x-template"
    })
}

pub struct UnsafeSinkRule {
    sink: Regex,
}

impl UnsafeSinkRule {
    pub fn new() -> Result<Self, CatalogError> {
        let sink = Regex::new(
            r"\.(?:innerHTML|outerHTML)\s*\+?=[^=]|\binsertAdjacentHTML\s*\(|\bdocument\.write(?:ln)?\s*\(|\beval\s*\(|\bdangerouslySetInnerHTML\b",
        )
        .map_err(|e| CatalogError::InvalidPattern {
            rule_id: meta::UNSAFE_SINK.id.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { sink })
    }

    fn describe(matched: &str) -> &'static str {
        if matched.contains("innerHTML") && !matched.contains("dangerously") {
            "innerHTML assignment"
        } else if matched.contains("outerHTML") {
            "outerHTML assignment"
        } else if matched.contains("insertAdjacentHTML") {
            "insertAdjacentHTML call"
        } else if matched.contains("document.write") {
            "document.write call"
        } else if matched.contains("eval") {
            "eval call"
        } else {
            "dangerouslySetInnerHTML"
        }
    }
}

impl Rule for UnsafeSinkRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::UNSAFE_SINK
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let doc = ctx.doc;
        let mut findings = Vec::new();

        for (tag_idx, offset, body) in doc.raw_blocks("script") {
            if is_data_script(doc.tag(tag_idx)) {
                continue;
            }
            for m in self.sink.find_iter(body) {
                findings.push(ctx.finding_at(
                    self.meta(),
                    offset + m.start(),
                    format!("Unsafe {} in inline script", Self::describe(m.as_str())),
                ));
            }
        }

        // JSX carries the sink as an attribute rather than in a script body.
        for tag in doc.tags().iter().filter(|t| t.is_open()) {
            if tag.has_attr("dangerouslysetinnerhtml") {
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Unsafe dangerouslySetInnerHTML on <{}>", tag.name),
                ));
            }
        }

        if let Some(js) = ctx.js {
            for m in self.sink.find_iter(js) {
                findings.push(Finding::new(
                    self.meta(),
                    format!("Unsafe {} in script source", Self::describe(m.as_str())),
                    None,
                ));
            }
        }

        Ok(findings)
    }
}

struct SecretPattern {
    name: String,
    regex: Regex,
}

/// Built-in secret shapes as `(name, pattern)`.
const SECRET_PATTERNS: &[(&str, &str)] = &[
    ("AWS access key", r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b"),
    ("Stripe live key", r"\b(?:sk|rk)_live_[0-9a-zA-Z]{24,}"),
    ("GitHub token", r"\bgh[pousr]_[A-Za-z0-9]{36,}"),
    ("Google API key", r"\bAIza[0-9A-Za-z\-_]{35}"),
    ("Slack token", r"\bxox[baprs]-[0-9A-Za-z-]{10,}"),
    (
        "private key",
        r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP |ENCRYPTED )?PRIVATE KEY",
    ),
    (
        "JWT",
        r"\beyJ[A-Za-z0-9_-]{10,}\.eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}",
    ),
    (
        "credential assignment",
        r#"(?i)\b(?:api[_-]?key|secret(?:[_-]?key)?|client[_-]?secret|access[_-]?token|auth[_-]?token|token|password|passwd)["']?\s*[:=]\s*["'][^"'\s]{16,}["']"#,
    ),
];

pub struct HardcodedSecretRule {
    patterns: Vec<SecretPattern>,
}

impl HardcodedSecretRule {
    /// Built-in patterns plus `extra` user-supplied regexes.
    pub fn new(extra: &[String]) -> Result<Self, CatalogError> {
        let compile = |name: String, pattern: &str| {
            Regex::new(pattern)
                .map(|regex| SecretPattern { name, regex })
                .map_err(|e| CatalogError::InvalidPattern {
                    rule_id: meta::HARDCODED_SECRET.id.to_string(),
                    message: e.to_string(),
                })
        };
        let mut patterns = Vec::with_capacity(SECRET_PATTERNS.len() + extra.len());
        for (name, pattern) in SECRET_PATTERNS {
            patterns.push(compile(name.to_string(), pattern)?);
        }
        for (i, pattern) in extra.iter().enumerate() {
            patterns.push(compile(format!("custom pattern #{}", i + 1), pattern)?);
        }
        Ok(Self { patterns })
    }

    /// Non-overlapping matches as `(offset, pattern name)`, earliest first.
    /// A secret matched by several patterns is reported once.
    fn scan<'s>(&'s self, text: &str) -> Vec<(usize, &'s str)> {
        let mut hits: Vec<(usize, usize, &str)> = self
            .patterns
            .iter()
            .flat_map(|p| {
                p.regex
                    .find_iter(text)
                    .map(move |m| (m.start(), m.end(), p.name.as_str()))
            })
            .collect();
        hits.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));

        let mut kept = Vec::new();
        let mut covered_to = 0;
        for (start, end, name) in hits {
            if start < covered_to {
                continue;
            }
            covered_to = end;
            kept.push((start, name));
        }
        kept
    }
}

impl Rule for HardcodedSecretRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::HARDCODED_SECRET
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let mut findings: Vec<Finding> = self
            .scan(ctx.doc.source())
            .into_iter()
            .map(|(offset, name)| {
                ctx.finding_at(self.meta(), offset, format!("Possible hardcoded {name} in markup"))
            })
            .collect();
        for (label, input) in [("stylesheet", ctx.css), ("script source", ctx.js)] {
            let Some(text) = input else {
                continue;
            };
            findings.extend(self.scan(text).into_iter().map(|(_, name)| {
                Finding::new(self.meta(), format!("Possible hardcoded {name} in {label}"), None)
            }));
        }
        Ok(findings)
    }
}

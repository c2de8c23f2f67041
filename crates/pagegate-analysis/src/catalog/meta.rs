//! The static rule table, in declared order.

use super::ids;
use super::types::{Category, FixKind, Impact, RuleMeta, Severity};

pub static DOCTYPE: RuleMeta = RuleMeta {
    id: ids::DOCTYPE,
    category: Category::Structure,
    severity: Severity::error(Impact::High),
    fix: Some(FixKind::InsertDoctype),
    title: "DOCTYPE declaration present",
    suggestion: "Start the document with <!DOCTYPE html>.",
};

pub static CHARSET: RuleMeta = RuleMeta {
    id: ids::CHARSET,
    category: Category::Structure,
    severity: Severity::error(Impact::Medium),
    fix: Some(FixKind::InsertCharset),
    title: "UTF-8 charset declared",
    suggestion: "Add <meta charset=\"UTF-8\"> as the first element of <head>.",
};

pub static VIEWPORT: RuleMeta = RuleMeta {
    id: ids::VIEWPORT,
    category: Category::Structure,
    severity: Severity::error(Impact::Medium),
    fix: Some(FixKind::InsertViewport),
    title: "Viewport meta present",
    suggestion: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">.",
};

pub static HTML_LANG: RuleMeta = RuleMeta {
    id: ids::HTML_LANG,
    category: Category::Structure,
    severity: Severity::warning(Impact::High),
    fix: Some(FixKind::InsertLang),
    title: "Document language declared",
    suggestion: "Set a lang attribute on <html>, e.g. <html lang=\"en\">.",
};

pub static TITLE: RuleMeta = RuleMeta {
    id: ids::TITLE,
    category: Category::Structure,
    severity: Severity::error(Impact::High),
    fix: None,
    title: "Document title present",
    suggestion: "Add a descriptive <title> inside <head>.",
};

pub static SINGLE_H1: RuleMeta = RuleMeta {
    id: ids::SINGLE_H1,
    category: Category::Structure,
    severity: Severity::error(Impact::Medium),
    fix: None,
    title: "Exactly one <h1>",
    suggestion: "Use a single <h1> for the main page heading.",
};

pub static HEADING_HIERARCHY: RuleMeta = RuleMeta {
    id: ids::HEADING_HIERARCHY,
    category: Category::Structure,
    severity: Severity::warning(Impact::Medium),
    fix: None,
    title: "Headings do not skip levels",
    suggestion: "Nest headings one level at a time (h1 > h2 > h3).",
};

pub static META_DESCRIPTION: RuleMeta = RuleMeta {
    id: ids::META_DESCRIPTION,
    category: Category::Seo,
    severity: Severity::warning(Impact::Medium),
    fix: None,
    title: "Meta description present",
    suggestion: "Add <meta name=\"description\" content=\"...\"> summarizing the page.",
};

pub static OPEN_GRAPH: RuleMeta = RuleMeta {
    id: ids::OPEN_GRAPH,
    category: Category::Seo,
    severity: Severity::info(Impact::High),
    fix: None,
    title: "Open Graph tags present",
    suggestion: "Add og:title, og:description and og:image meta properties.",
};

pub static IMG_ALT: RuleMeta = RuleMeta {
    id: ids::IMG_ALT,
    category: Category::Accessibility,
    severity: Severity::error(Impact::High),
    fix: None,
    title: "Images have alt attributes",
    suggestion: "Describe the image in alt, or use alt=\"\" for decorative images.",
};

pub static IMG_ALT_TEXT: RuleMeta = RuleMeta {
    id: ids::IMG_ALT_TEXT,
    category: Category::Accessibility,
    severity: Severity::warning(Impact::Low),
    fix: None,
    title: "Alt text is descriptive",
    suggestion: "Replace file names and generic words with a description of the image.",
};

pub static FORM_LABEL: RuleMeta = RuleMeta {
    id: ids::FORM_LABEL,
    category: Category::Accessibility,
    severity: Severity::error(Impact::Medium),
    fix: None,
    title: "Form controls are labelled",
    suggestion: "Associate a <label for=\"id\">, wrap the control in <label>, or add aria-label.",
};

pub static LINK_TEXT: RuleMeta = RuleMeta {
    id: ids::LINK_TEXT,
    category: Category::Accessibility,
    severity: Severity::warning(Impact::Medium),
    fix: None,
    title: "Link text is descriptive",
    suggestion: "Describe the link destination instead of \"click here\" or \"read more\".",
};

pub static BUTTON_NAME: RuleMeta = RuleMeta {
    id: ids::BUTTON_NAME,
    category: Category::Accessibility,
    severity: Severity::error(Impact::Medium),
    fix: None,
    title: "Buttons are named and focusable",
    suggestion: "Give buttons visible text or aria-label; prefer <button> over role=\"button\".",
};

pub static COLOR_CONTRAST: RuleMeta = RuleMeta {
    id: ids::COLOR_CONTRAST,
    category: Category::Accessibility,
    severity: Severity::warning(Impact::Low),
    fix: None,
    title: "Text contrast is sufficient",
    suggestion: "Use foreground/background colors with a contrast ratio of at least 4.5:1.",
};

pub static IMG_LAZY_LOADING: RuleMeta = RuleMeta {
    id: ids::IMG_LAZY_LOADING,
    category: Category::Performance,
    severity: Severity::warning(Impact::Low),
    fix: Some(FixKind::LazyLoadImages),
    title: "Below-the-fold images load lazily",
    suggestion: "Add loading=\"lazy\" to images outside the initial viewport.",
};

pub static SCRIPT_LOADING: RuleMeta = RuleMeta {
    id: ids::SCRIPT_LOADING,
    category: Category::Performance,
    severity: Severity::warning(Impact::Medium),
    fix: None,
    title: "External scripts are not duplicated or blocking",
    suggestion: "Load each script once and mark head scripts async or defer.",
};

pub static TARGET_BLANK: RuleMeta = RuleMeta {
    id: ids::TARGET_BLANK,
    category: Category::Security,
    severity: Severity::error(Impact::Medium),
    fix: Some(FixKind::SecureTargetBlank),
    title: "New-tab links isolate the opener",
    suggestion: "Add rel=\"noopener noreferrer\" to external links with target=\"_blank\".",
};

pub static INLINE_HANDLER: RuleMeta = RuleMeta {
    id: ids::INLINE_HANDLER,
    category: Category::Security,
    severity: Severity::warning(Impact::High),
    fix: None,
    title: "No inline event handlers",
    suggestion: "Attach listeners with addEventListener instead of on* attributes.",
};

pub static UNSAFE_SINK: RuleMeta = RuleMeta {
    id: ids::UNSAFE_SINK,
    category: Category::Security,
    severity: Severity::error(Impact::Critical),
    fix: None,
    title: "No HTML injection sinks",
    suggestion: "Use textContent or DOM APIs instead of innerHTML, document.write or eval.",
};

pub static HARDCODED_SECRET: RuleMeta = RuleMeta {
    id: ids::HARDCODED_SECRET,
    category: Category::Security,
    severity: Severity::error(Impact::Critical),
    fix: None,
    title: "No hardcoded secrets",
    suggestion: "Move credentials to a server-side secret store; never ship them to the client.",
};

pub static RULE_FAULT: RuleMeta = RuleMeta {
    id: ids::RULE_FAULT,
    category: Category::Internal,
    severity: Severity::warning(Impact::Medium),
    fix: None,
    title: "Rule execution fault",
    suggestion: "",
};

/// Every cataloged rule, in declared order.
pub static ALL: [&RuleMeta; 21] = [
    &DOCTYPE,
    &CHARSET,
    &VIEWPORT,
    &HTML_LANG,
    &TITLE,
    &SINGLE_H1,
    &HEADING_HIERARCHY,
    &META_DESCRIPTION,
    &OPEN_GRAPH,
    &IMG_ALT,
    &IMG_ALT_TEXT,
    &FORM_LABEL,
    &LINK_TEXT,
    &BUTTON_NAME,
    &COLOR_CONTRAST,
    &IMG_LAZY_LOADING,
    &SCRIPT_LOADING,
    &TARGET_BLANK,
    &INLINE_HANDLER,
    &UNSAFE_SINK,
    &HARDCODED_SECRET,
];

/// Look up static metadata by rule id.
pub fn lookup(id: &str) -> Option<&'static RuleMeta> {
    ALL.iter().copied().find(|m| m.id == id)
}

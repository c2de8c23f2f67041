//! Rule identifiers. Part of the external contract: never renumber or reuse.

pub const DOCTYPE: &str = "structure/doctype";
pub const CHARSET: &str = "structure/charset";
pub const VIEWPORT: &str = "structure/viewport";
pub const HTML_LANG: &str = "structure/html-lang";
pub const TITLE: &str = "structure/title";
pub const SINGLE_H1: &str = "structure/single-h1";
pub const HEADING_HIERARCHY: &str = "structure/heading-hierarchy";

pub const META_DESCRIPTION: &str = "seo/meta-description";
pub const OPEN_GRAPH: &str = "seo/open-graph";

pub const IMG_ALT: &str = "accessibility/img-alt";
pub const IMG_ALT_TEXT: &str = "accessibility/img-alt-text";
pub const FORM_LABEL: &str = "accessibility/form-label";
pub const LINK_TEXT: &str = "accessibility/link-text";
pub const BUTTON_NAME: &str = "accessibility/button-name";
pub const COLOR_CONTRAST: &str = "accessibility/color-contrast";

pub const IMG_LAZY_LOADING: &str = "performance/img-lazy-loading";
pub const SCRIPT_LOADING: &str = "performance/script-loading";

pub const TARGET_BLANK: &str = "security/target-blank";
pub const INLINE_HANDLER: &str = "security/inline-handler";
pub const UNSAFE_SINK: &str = "security/unsafe-sink";
pub const HARDCODED_SECRET: &str = "security/hardcoded-secret";

/// Synthetic finding for a rule that faulted during validation.
pub const RULE_FAULT: &str = "internal/rule-fault";

//! Search and social metadata rules.

use pagegate_core::errors::RuleError;

use super::{attr_is, is_blank, Rule, RuleContext};
use crate::catalog::meta;
use crate::catalog::types::{Finding, RuleMeta};
use crate::document::DocumentModel;

const OPEN_GRAPH_PROPERTIES: &[&str] = &["og:title", "og:description", "og:image"];

pub struct MetaDescriptionRule;

impl Rule for MetaDescriptionRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::META_DESCRIPTION
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let present = ctx.doc.open_tags("meta").any(|(_, t)| {
            attr_is(t.attr_value("name"), "description") && !is_blank(t.attr_value("content"))
        });
        if present {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            self.meta(),
            "Missing <meta name=\"description\"> with content",
            None,
        )])
    }
}

pub struct OpenGraphRule;

impl Rule for OpenGraphRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::OPEN_GRAPH
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let missing: Vec<&str> = OPEN_GRAPH_PROPERTIES
            .iter()
            .copied()
            .filter(|prop| !has_property(ctx.doc, prop))
            .collect();
        if missing.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            self.meta(),
            format!("Missing Open Graph tags: {}", missing.join(", ")),
            None,
        )])
    }
}

/// Open Graph tags are often written with `name=` instead of `property=`;
/// both are accepted.
fn has_property(doc: &DocumentModel<'_>, prop: &str) -> bool {
    doc.open_tags("meta").any(|(_, t)| {
        (attr_is(t.attr_value("property"), prop) || attr_is(t.attr_value("name"), prop))
            && !is_blank(t.attr_value("content"))
    })
}

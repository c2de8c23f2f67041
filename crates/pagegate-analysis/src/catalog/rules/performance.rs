//! Loading-performance rules.

use rustc_hash::FxHashMap;

use pagegate_core::errors::RuleError;

use super::{attr_is, Rule, RuleContext};
use crate::autofix::AboveFoldClassifier;
use crate::catalog::meta;
use crate::catalog::types::{Finding, RuleMeta};
use crate::document::DocumentModel;

/// Indices of `<img>` tags that should be lazy-loaded but are not.
pub fn lazy_candidates(doc: &DocumentModel<'_>, classifier: &AboveFoldClassifier) -> Vec<usize> {
    classifier.deferrable_images(doc)
}

pub struct ImgLazyLoadingRule {
    classifier: AboveFoldClassifier,
}

impl ImgLazyLoadingRule {
    pub fn new(classifier: AboveFoldClassifier) -> Self {
        Self { classifier }
    }
}

impl Rule for ImgLazyLoadingRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::IMG_LAZY_LOADING
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        Ok(lazy_candidates(ctx.doc, &self.classifier)
            .into_iter()
            .map(|idx| {
                let tag = ctx.doc.tag(idx);
                let src = tag.attr_value("src").unwrap_or("(no src)");
                ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Image {src} below the fold is not lazy-loaded"),
                )
            })
            .collect())
    }
}

pub struct ScriptLoadingRule {
    max_external: usize,
}

impl ScriptLoadingRule {
    pub fn new(max_external: usize) -> Self {
        Self { max_external }
    }
}

impl Rule for ScriptLoadingRule {
    fn meta(&self) -> &'static RuleMeta {
        &meta::SCRIPT_LOADING
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
        let doc = ctx.doc;
        let mut findings = Vec::new();
        // src -> (count, offset of the first repeat)
        let mut seen: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        let mut order: Vec<&str> = Vec::new();

        for (_, tag) in doc.open_tags("script") {
            let Some(src) = tag.attr_value("src").filter(|s| !s.trim().is_empty()) else {
                continue;
            };
            let src = src.trim();
            let entry = seen.entry(src).or_insert_with(|| {
                order.push(src);
                (0, tag.start)
            });
            entry.0 += 1;
            if entry.0 == 2 {
                entry.1 = tag.start;
            }

            let deferred = tag.has_attr("async")
                || tag.has_attr("defer")
                || attr_is(tag.attr_value("type"), "module");
            if doc.in_head(tag.start) && !deferred {
                findings.push(ctx.finding_at(
                    self.meta(),
                    tag.start,
                    format!("Render-blocking script {src} in <head>; add async or defer"),
                ));
            }
        }

        for src in &order {
            let (count, repeat_at) = seen[src];
            if count > 1 {
                findings.push(ctx.finding_at(
                    self.meta(),
                    repeat_at,
                    format!("Script {src} is loaded {count} times"),
                ));
            }
        }

        if order.len() > self.max_external {
            findings.push(Finding::new(
                self.meta(),
                format!(
                    "{} external scripts exceed the limit of {}",
                    order.len(),
                    self.max_external
                ),
                None,
            ));
        }

        Ok(findings)
    }
}

//! Auto-fix configuration: above-the-fold heuristics and inserted defaults.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AutoFixConfig {
    /// Keywords in `class`/`id`/`alt` marking an image as above the fold.
    /// Default: hero, logo, banner.
    #[serde(default)]
    pub above_fold_keywords: Vec<String>,
    /// Leading `<img>` tags in `<body>` never lazy-loaded. Default: 0.
    pub above_fold_image_count: Option<usize>,
    /// Leading fraction of the document never lazy-loaded. Default: 0.10.
    pub above_fold_ratio: Option<f64>,
    /// Value inserted by the `lang` fix. Default: "en".
    pub default_lang: Option<String>,
}

impl AutoFixConfig {
    pub fn effective_above_fold_keywords(&self) -> Vec<String> {
        if self.above_fold_keywords.is_empty() {
            constants::DEFAULT_ABOVE_FOLD_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect()
        } else {
            self.above_fold_keywords.clone()
        }
    }

    pub fn effective_above_fold_image_count(&self) -> usize {
        self.above_fold_image_count
            .unwrap_or(constants::DEFAULT_ABOVE_FOLD_IMAGE_COUNT)
    }

    pub fn effective_above_fold_ratio(&self) -> f64 {
        self.above_fold_ratio
            .unwrap_or(constants::DEFAULT_ABOVE_FOLD_RATIO)
    }

    pub fn effective_default_lang(&self) -> &str {
        self.default_lang.as_deref().unwrap_or(constants::DEFAULT_LANG)
    }
}

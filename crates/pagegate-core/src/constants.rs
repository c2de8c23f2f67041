//! Shared constants for the pagegate engine.

/// Minimum score for a document to pass (0-100).
pub const DEFAULT_PASS_THRESHOLD: u32 = 70;

/// Grade cut-offs (score >= cut-off earns the grade).
pub const DEFAULT_GRADE_A: u32 = 90;
pub const DEFAULT_GRADE_B: u32 = 80;
pub const DEFAULT_GRADE_C: u32 = 70;
pub const DEFAULT_GRADE_D: u32 = 60;

/// Keywords that mark an image as likely above the fold.
pub const DEFAULT_ABOVE_FOLD_KEYWORDS: &[&str] = &["hero", "logo", "banner"];

/// Leading `<img>` tags in `<body>` treated as above the fold (0 = disabled).
pub const DEFAULT_ABOVE_FOLD_IMAGE_COUNT: usize = 0;

/// Leading fraction of the document treated as above the fold.
pub const DEFAULT_ABOVE_FOLD_RATIO: f64 = 0.10;

/// Language inserted by the `lang` fix.
pub const DEFAULT_LANG: &str = "en";

/// External scripts tolerated before the script-loading rule warns.
pub const DEFAULT_MAX_EXTERNAL_SCRIPTS: usize = 10;

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "pagegate.toml";

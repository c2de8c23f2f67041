//! Tests for the pagegate configuration system.

use std::sync::Mutex;

use pagegate_core::config::{ConfigOverrides, PagegateConfig};
use pagegate_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all PAGEGATE_ env vars and point HOME at an empty directory so the
/// developer's own user config never leaks into a test.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "PAGEGATE_PASS_THRESHOLD",
        "PAGEGATE_ABOVE_FOLD_IMAGE_COUNT",
        "PAGEGATE_DEFAULT_LANG",
        "PAGEGATE_DISABLED_RULES",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = PagegateConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scoring.effective_pass_threshold(), 70);
    assert_eq!(config.scoring.effective_grade_cutoffs(), [90, 80, 70, 60]);
    assert_eq!(config.autofix.effective_above_fold_keywords(), vec!["hero", "logo", "banner"]);
    assert_eq!(config.autofix.effective_above_fold_image_count(), 0);
    assert!((config.autofix.effective_above_fold_ratio() - 0.10).abs() < f64::EPSILON);
    assert_eq!(config.autofix.effective_default_lang(), "en");
    assert_eq!(config.rules.effective_max_external_scripts(), 10);
    assert!(config.rules.disabled.is_empty());
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".pagegate");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        r#"
[scoring]
pass_threshold = 60
grade_a = 95

[autofix]
default_lang = "de"
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("pagegate.toml"),
        r#"
[scoring]
pass_threshold = 75

[autofix]
above_fold_keywords = ["masthead"]
"#,
    )
    .unwrap();

    std::env::set_var("PAGEGATE_DEFAULT_LANG", "fr");

    let overrides = ConfigOverrides {
        pass_threshold: Some(85),
        ..Default::default()
    };
    let config = PagegateConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat project, which beats user.
    assert_eq!(config.scoring.pass_threshold, Some(85));
    // User value survives where nothing above it speaks.
    assert_eq!(config.scoring.grade_a, Some(95));
    // Env beats user.
    assert_eq!(config.autofix.effective_default_lang(), "fr");
    assert_eq!(config.autofix.effective_above_fold_keywords(), vec!["masthead"]);

    isolate_env(home.path());
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("PAGEGATE_PASS_THRESHOLD", "80");
    std::env::set_var("PAGEGATE_ABOVE_FOLD_IMAGE_COUNT", "2");
    std::env::set_var("PAGEGATE_DISABLED_RULES", "seo/open-graph, ,accessibility/color-contrast");

    let dir = tempdir();
    let config = PagegateConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.scoring.effective_pass_threshold(), 80);
    assert_eq!(config.autofix.effective_above_fold_image_count(), 2);
    assert_eq!(
        config.rules.disabled,
        vec!["seo/open-graph", "accessibility/color-contrast"]
    );
    assert!(config.rules.is_disabled("seo/open-graph"));

    isolate_env(home.path());
}

#[test]
fn test_invalid_env_value_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("PAGEGATE_PASS_THRESHOLD", "seventy");
    let dir = tempdir();
    let err = PagegateConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "PAGEGATE_PASS_THRESHOLD"));

    isolate_env(home.path());
}

#[test]
fn test_malformed_project_toml_is_fatal() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("pagegate.toml"), "[scoring\npass_threshold = ").unwrap();
    let err = PagegateConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = PagegateConfig::from_toml(
        r#"
[scoring]
pass_threshold = 65
future_knob = true

[telemetry]
enabled = false
"#,
    )
    .unwrap();
    assert_eq!(config.scoring.effective_pass_threshold(), 65);
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let cases = [
        "[scoring]\npass_threshold = 101",
        "[scoring]\ngrade_a = 70\ngrade_b = 80",
        "[autofix]\nabove_fold_ratio = 1.5",
        "[autofix]\ndefault_lang = \"  \"",
        "[autofix]\nabove_fold_keywords = [\"hero\", \"\"]",
    ];
    for toml in cases {
        let err = PagegateConfig::from_toml(toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationFailed { .. }),
            "expected validation failure for {toml:?}, got {err:?}"
        );
    }
}

#[test]
fn test_rules_section() {
    let config = PagegateConfig::from_toml(
        r#"
[rules]
disabled = ["performance/script-loading"]
max_external_scripts = 3
extra_secret_patterns = ["ACME-[0-9]{8}"]
"#,
    )
    .unwrap();
    assert!(config.rules.is_disabled("performance/script-loading"));
    assert_eq!(config.rules.effective_max_external_scripts(), 3);
    assert_eq!(config.rules.extra_secret_patterns.len(), 1);
}

#[test]
fn test_toml_round_trip() {
    let mut config = PagegateConfig::default();
    config.scoring.pass_threshold = Some(72);
    config.autofix.above_fold_keywords = vec!["jumbotron".to_string()];
    config.rules.disabled = vec!["seo/open-graph".to_string()];

    let toml = config.to_toml().unwrap();
    let back = PagegateConfig::from_toml(&toml).unwrap();
    assert_eq!(back.scoring.pass_threshold, Some(72));
    assert_eq!(back.autofix.above_fold_keywords, vec!["jumbotron"]);
    assert_eq!(back.rules.disabled, vec!["seo/open-graph"]);
}

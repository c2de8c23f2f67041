//! Stress tests: pathological and oversized inputs must not panic, hang, or
//! blow up time.

use std::time::{Duration, Instant};

use pagegate_analysis::catalog::ids;
use pagegate_analysis::{AutoFixEngine, QualityPipeline, RuleCatalog, ValidationEngine};
use pagegate_core::config::PagegateConfig;

fn catalog() -> RuleCatalog {
    RuleCatalog::with_defaults().unwrap()
}

#[test]
fn test_pathological_inputs_validate_and_fix() {
    let inputs = vec![
        String::new(),
        "<".repeat(10_000),
        ">".repeat(10_000),
        "<div>".repeat(5_000),
        "</div>".repeat(5_000),
        "<!--".repeat(1_000),
        format!("<img src=\"{}", "a".repeat(10_000)),
        format!("<a href={}>", "{".repeat(2_000)),
        format!("<script>{}", "x<y>z".repeat(2_000)),
        "<img>".repeat(2_000),
        "<a href=\"https://x.io\" target=\"_blank\">x</a>".repeat(1_000),
        "\u{0}\u{1}\u{7f}<p>\u{fffd}</p>".to_string(),
        "<html lang=\"\"><html lang=\"\">".to_string(),
    ];
    let catalog = catalog();
    let validator = ValidationEngine::new(&catalog);
    let fixer = AutoFixEngine::new(&catalog);
    for html in &inputs {
        let result = validator.validate_all(html, Some(html.as_str()), Some(html.as_str()));
        assert!(result.score <= 100);
        assert!(!result.has_rule(ids::RULE_FAULT), "rule faulted on {:.40}", html);
        let fix = fixer.auto_fix(html, &result);
        let _ = validator.validate_all(&fix.fixed, None, None);
    }
}

#[test]
fn test_many_new_tab_links_fixed_in_one_pass() {
    let html = "<a href=\"https://x.io\" target=\"_blank\">Partner</a>\n".repeat(500);
    let catalog = catalog();
    let validator = ValidationEngine::new(&catalog);
    let before = validator.validate_all(&html, None, None);
    assert_eq!(before.count_rule(ids::TARGET_BLANK), 500);

    let fix = AutoFixEngine::new(&catalog).auto_fix(&html, &before);
    assert!(fix
        .applied_fixes
        .iter()
        .any(|f| f == "Added rel=\"noopener noreferrer\" to 500 external links"));
    let after = validator.validate_all(&fix.fixed, None, None);
    assert!(!after.has_rule(ids::TARGET_BLANK));
}

#[test]
fn test_large_document_within_time_bound() {
    let section = r#"<section class="card">
<h2>Feature</h2>
<p>Generated copy with <a href="/docs">product documentation</a> and more text.</p>
<img src="/img/feature.png" alt="Feature screenshot">
<a href="https://partner.example" target="_blank">Partner integration</a>
<button onclick="track()">Try it</button>
</section>
"#;
    let mut html = String::from("<html><head><title>Big</title></head><body><h1>Big page</h1>\n");
    while html.len() < 300 * 1024 {
        html.push_str(section);
    }
    html.push_str("</body></html>");

    let config = PagegateConfig::default();
    let catalog = RuleCatalog::new(&config).unwrap();
    let pipeline = QualityPipeline::new(&catalog, &config);

    let start = Instant::now();
    let report = pipeline.run(&html, None, None);
    let elapsed = start.elapsed();

    assert!(report.should_persist());
    assert!(!report.final_result.has_rule(ids::TARGET_BLANK));
    assert!(!report.final_result.has_rule(ids::IMG_LAZY_LOADING));
    assert!(
        elapsed < Duration::from_secs(20),
        "300 KB document took {elapsed:?}"
    );
}

#[test]
fn test_deeply_nested_links_stay_linear() {
    let depth = 8_000;
    let html = format!("{}{}", "<a href=\"/x\">x".repeat(depth), "</a>".repeat(depth));
    let catalog = catalog();
    let validator = ValidationEngine::new(&catalog);

    let start = Instant::now();
    let result = validator.validate_all(&html, None, None);
    let elapsed = start.elapsed();

    assert!(!result.has_rule(ids::RULE_FAULT));
    assert!(!result.has_rule(ids::LINK_TEXT));
    assert!(
        elapsed < Duration::from_secs(5),
        "{depth} nested links took {elapsed:?}"
    );
}

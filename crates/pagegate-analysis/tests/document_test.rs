//! DocumentModel: tolerant parsing of partial and malformed markup.

use pagegate_analysis::document::{DocumentModel, TagKind};

#[test]
fn test_full_document_structure() {
    let src = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>Hi</title></head>\n<body><p>x</p></body>\n</html>";
    let doc = DocumentModel::parse(src);

    assert_eq!(doc.doctype_offset(), Some(0));
    let head = doc.head_range().expect("head");
    assert!(src[head].starts_with("<head>"));
    let body = doc.body_range().expect("body");
    assert!(src[body.clone()].ends_with("</body>"));
    assert_eq!(doc.line_of(body.start), 4);
}

#[test]
fn test_doctype_is_case_insensitive() {
    let doc = DocumentModel::parse("<!doctype HTML><p>x</p>");
    assert_eq!(doc.doctype_offset(), Some(0));
}

#[test]
fn test_missing_structure_is_absent_not_error() {
    let doc = DocumentModel::parse("<div><span>unclosed");
    assert!(doc.doctype_offset().is_none());
    assert!(doc.head_range().is_none());
    assert!(doc.body_range().is_none());
    assert_eq!(doc.open_tags("div").count(), 1);
}

#[test]
fn test_unterminated_tag_stops_scan() {
    let doc = DocumentModel::parse("<p>ok</p><img src=\"a.jpg");
    assert_eq!(doc.open_tags("p").count(), 1);
    assert_eq!(doc.open_tags("img").count(), 0);
}

#[test]
fn test_garbage_input_never_panics() {
    let inputs = [
        "",
        "<",
        "<<<>>>",
        "</>",
        "<!--",
        "<!",
        "<?xml",
        "<a href=\"x>",
        "<a href={{{>",
        "<script>",
        "<style>a{",
        "<textarea><p>",
        "\u{feff}<html>",
        "<p>日本語<img alt=\"写真\"></p>",
    ];
    for input in inputs {
        let doc = DocumentModel::parse(input);
        let _ = doc.head_range();
        let _ = doc.body_range();
        for i in 0..doc.tags().len() {
            let _ = doc.inner_text(i);
            let _ = doc.element_range(i);
        }
    }
}

#[test]
fn test_comments_are_not_tags() {
    let doc = DocumentModel::parse("<!-- <img src=\"x.jpg\"> --><p>x</p>");
    assert_eq!(doc.open_tags("img").count(), 0);
    assert_eq!(doc.open_tags("p").count(), 1);
}

#[test]
fn test_script_bodies_are_raw_text() {
    let src = "<script>if (a < b) { el.innerHTML = '<img src=x>'; }</script><p>after</p>";
    let doc = DocumentModel::parse(src);
    assert_eq!(doc.open_tags("img").count(), 0);
    let blocks: Vec<_> = doc.raw_blocks("script").collect();
    assert_eq!(blocks.len(), 1);
    let (_, offset, body) = blocks[0];
    assert_eq!(&src[offset..offset + body.len()], body);
    assert!(body.contains("innerHTML"));
    assert_eq!(doc.open_tags("p").count(), 1);
}

#[test]
fn test_attributes_quoted_unquoted_and_boolean() {
    let doc = DocumentModel::parse("<input type=text name='q' required data-x=\"a b\">");
    let (_, tag) = doc.first_open("input").unwrap();
    assert_eq!(tag.attr_value("type"), Some("text"));
    assert_eq!(tag.attr_value("name"), Some("q"));
    assert!(tag.has_attr("required"));
    assert_eq!(tag.attr_value("required"), None);
    assert_eq!(tag.attr_value("data-x"), Some("a b"));
}

#[test]
fn test_jsx_expression_attributes() {
    let doc = DocumentModel::parse("<button onClick={() => go({ a: 1 })} className=\"btn\">Go</button>");
    let (idx, tag) = doc.first_open("button").unwrap();
    let click = tag.attr("onclick").unwrap();
    assert!(click.expression);
    assert_eq!(tag.attr_value("classname"), Some("btn"));
    assert_eq!(doc.inner_text(idx), "Go");
}

#[test]
fn test_tag_names_are_lowercased() {
    let doc = DocumentModel::parse("<HTML><BODY></BODY></HTML>");
    assert!(doc.first_open("html").is_some());
    assert!(doc.tags().iter().any(|t| t.kind == TagKind::Close && t.name == "body"));
}

#[test]
fn test_inner_and_accessible_text() {
    let doc = DocumentModel::parse("<a href=\"/\">  Read&nbsp;the\n <b>docs</b> <img src=\"i.png\" alt=\"icon\"></a>");
    let (idx, _) = doc.first_open("a").unwrap();
    assert_eq!(doc.inner_text(idx), "Read the docs");
    assert_eq!(doc.accessible_text(idx), "Read the docs icon");
}

#[test]
fn test_is_inside() {
    let doc = DocumentModel::parse("<header><nav><img src=\"a\"></nav></header><img src=\"b\">");
    let imgs: Vec<usize> = doc.open_tags("img").map(|(i, _)| i).collect();
    assert!(doc.is_inside(imgs[0], "header"));
    assert!(!doc.is_inside(imgs[1], "header"));
}

#[test]
fn test_in_head() {
    let src = "<head><script src=\"a.js\"></script></head><body><script src=\"b.js\"></script></body>";
    let doc = DocumentModel::parse(src);
    let scripts: Vec<usize> = doc.open_tags("script").map(|(_, t)| t.start).collect();
    assert!(doc.in_head(scripts[0]));
    assert!(!doc.in_head(scripts[1]));
}

#[test]
fn test_line_numbers_are_one_based() {
    let doc = DocumentModel::parse("a\nb\n<p>c</p>");
    let (_, p) = doc.first_open("p").unwrap();
    assert_eq!(doc.line_of(0), 1);
    assert_eq!(doc.line_of(p.start), 3);
}

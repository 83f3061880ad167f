//! Markup Rendering Integration Tests
//!
//! Tests the full path from model prose to safe HTML, for both the lesson
//! and report dialects.

use sabor_scout::markup::html::to_html;
use sabor_scout::markup::{render_lesson, render_report, Block, HeadingLevel, Span};

#[test]
fn test_lesson_renders_to_semantic_html() {
    let prose = "## IPA Basics\n\
                 India Pale Ale is a hop-forward style.\n\
                 ### Hops\n\
                 * Cascade\n\
                 * Citra\n\
                 Dry hopping adds aroma without bitterness.";

    let html = to_html(&render_lesson(prose));

    assert_eq!(
        html,
        "<h2>IPA Basics</h2>\
         <p>India Pale Ale is a hop-forward style.</p>\
         <h3>Hops</h3>\
         <ul><li>Cascade</li><li>Citra</li></ul>\
         <p>Dry hopping adds aroma without bitterness.</p>"
    );
}

#[test]
fn test_report_bold_survives_to_html() {
    let prose = "## Verdict\nThe sample is **hazy** overall.";

    let html = to_html(&render_report(prose));

    assert_eq!(
        html,
        "<h2>Verdict</h2><p>The sample is <strong>hazy</strong> overall.</p>"
    );
}

#[test]
fn test_blocks_keep_document_order() {
    let prose = "intro line\n## Section\n* one\n* two\nclosing line";

    let blocks = render_report(prose);

    assert_eq!(blocks.len(), 4);
    assert!(matches!(blocks[0], Block::Paragraph { .. }));
    assert!(matches!(
        blocks[1],
        Block::Heading {
            level: HeadingLevel::H2,
            ..
        }
    ));
    match &blocks[2] {
        Block::List { items } => assert_eq!(items.len(), 2),
        other => panic!("expected a list, got {:?}", other),
    }
    assert!(matches!(blocks[3], Block::Paragraph { .. }));
}

#[test]
fn test_model_text_cannot_inject_html() {
    let prose = "## <script>alert('x')</script>\n* **<b>bold</b>** & more";

    let html = to_html(&render_report(prose));

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("<strong>&lt;b&gt;bold&lt;/b&gt;</strong>"));
    assert!(html.contains("&amp; more"));
}

#[test]
fn test_rendering_is_deterministic() {
    let prose = "## Report\n* **clarity**: good\n* haze: low\nDone.";

    let first = render_report(prose);
    let second = render_report(prose);
    assert_eq!(first, second);
    assert_eq!(to_html(&first), to_html(&second));
}

#[test]
fn test_dialects_differ_only_where_specified() {
    let prose = "### Deep Dive\nStars feel **important** here.";

    // The lesson dialect has subheadings but no bold handling
    let lesson = render_lesson(prose);
    assert!(matches!(
        lesson[0],
        Block::Heading {
            level: HeadingLevel::H3,
            ..
        }
    ));
    match &lesson[1] {
        Block::Paragraph { spans } => {
            assert_eq!(
                spans,
                &vec![Span::Text("Stars feel **important** here.".to_string())]
            );
        }
        other => panic!("expected a paragraph, got {:?}", other),
    }

    // The report dialect has bold handling but no subheadings
    let report = render_report(prose);
    match &report[0] {
        Block::Paragraph { spans } => {
            assert_eq!(spans[0], Span::Text("### Deep Dive".to_string()));
        }
        other => panic!("expected a paragraph, got {:?}", other),
    }
    match &report[1] {
        Block::Paragraph { spans } => {
            assert_eq!(
                spans,
                &vec![
                    Span::Text("Stars feel ".to_string()),
                    Span::Strong("important".to_string()),
                    Span::Text(" here.".to_string()),
                ]
            );
        }
        other => panic!("expected a paragraph, got {:?}", other),
    }
}

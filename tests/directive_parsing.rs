//! Integration tests for directive parsing

use position_tags::parser::{CategoryArg, Node};
use position_tags::{parse, ParseError};

#[test]
fn test_page_with_mixed_content() {
    let input = r#"
        <h1>{{ title }}</h1>
        {% position top_left for "news" %}fallback{% endposition %}
        {% ifposition sidebar for cat %}<aside>side</aside>{% endifposition %}
    "#;

    let template = parse(input).expect("Should parse");
    let directives: Vec<_> = template
        .nodes
        .iter()
        .filter(|n| matches!(n, Node::Position(_) | Node::IfPosition(_)))
        .collect();
    assert_eq!(directives.len(), 2);
}

#[test]
fn test_all_valid_argument_shapes() {
    let shapes = [
        r#"{% position p for cat %}{% endposition %}"#,
        r#"{% position p for cat nofallback %}{% endposition %}"#,
        r#"{% position p for "slug" using box %}{% endposition %}"#,
        r#"{% position p for "slug" using "box" nofallback %}{% endposition %}"#,
        r#"{% ifposition p for cat %}{% endifposition %}"#,
        r#"{% ifposition p for cat using box nofallback %}{% else %}{% endifposition %}"#,
    ];
    for shape in shapes {
        assert!(parse(shape).is_ok(), "Should parse: {}", shape);
    }
}

#[test]
fn test_invalid_argument_shapes() {
    let shapes = [
        "{% position %}{% endposition %}",
        "{% position p %}{% endposition %}",
        "{% position p cat %}{% endposition %}",
        "{% position p for %}{% endposition %}",
        "{% position for cat %}{% endposition %}",
        "{% position p for cat box %}{% endposition %}",
        "{% position p for cat using %}{% endposition %}",
        "{% position p using box for cat %}{% endposition %}",
        "{% position p for cat nofallback extra %}{% endposition %}",
    ];
    for shape in shapes {
        let err = parse(shape).expect_err(shape);
        assert!(matches!(err, ParseError::Syntax { .. }), "{}", shape);
    }
}

#[test]
fn test_syntax_error_names_expected_form() {
    let err = parse("{% position p cat %}{% endposition %}").unwrap_err();
    assert!(err
        .to_string()
        .contains("{% position POSITION_NAME for CATEGORY [using BOX_TYPE] [nofallback] %}"));
}

#[test]
fn test_quoted_category_becomes_slug_argument() {
    let template = parse(r#"{% position p for "news" %}{% endposition %}"#).unwrap();
    match &template.nodes[0] {
        Node::Position(node) => {
            assert_eq!(node.args.category, CategoryArg::Slug("news".to_string()));
        }
        other => panic!("Expected Position, got {:?}", other),
    }
}

#[test]
fn test_bare_category_becomes_variable_argument() {
    let template = parse("{% position p for article.category %}{% endposition %}").unwrap();
    match &template.nodes[0] {
        Node::Position(node) => {
            assert_eq!(
                node.args.category,
                CategoryArg::Variable("article.category".to_string())
            );
        }
        other => panic!("Expected Position, got {:?}", other),
    }
}

#[test]
fn test_mismatched_end_tag() {
    let err = parse("{% position p for cat %}{% endifposition %}").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedTag { .. }));
}

#[test]
fn test_ariadne_formatting_points_at_directive() {
    let source = "before {% position broken %}{% endposition %} after";
    let err = parse(source).unwrap_err();
    let formatted = err.format(source, "page.html");
    assert!(formatted.contains("page.html"));
    assert!(formatted.contains("POSITION_NAME for CATEGORY"));
}

/// Failure behavior: committed forms, trailing input and diagnostics
use uscheme::{
    parse, parse_expression, Expected, ParseError, ParseErrorKind, ParserConfig, SExprParser,
};

#[test]
fn test_two_armed_if_is_not_an_application() {
    let err = parse_expression("(if a b)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Unexpected);
    assert_eq!(err.expected, Expected::Expression);
    assert!(err.is_committed());
}

#[test]
fn test_empty_and_or_are_fatal() {
    for source in ["(and)", "(or)"] {
        let err = parse_expression(source).unwrap_err();
        assert!(err.is_committed(), "{} should fail after its keyword", source);
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.snippet, ")");
    }
}

#[test]
fn test_malformed_forms_name_first_missing_token() {
    let cases = [
        ("(set! 5 x)", Expected::Variable),
        ("(set! x)", Expected::Expression),
        ("(set! x 1 2)", Expected::CloseParen),
        ("(lambda x x)", Expected::OpenParen),
        ("(let (x 1) x)", Expected::CloseParen),
        ("(let ((1 x)) x)", Expected::Variable),
        ("(let ((x 1)))", Expected::Expression),
        ("(begin)", Expected::Expression),
        ("(if a b c d)", Expected::CloseParen),
    ];

    for (source, expected) in cases {
        let err = parse_expression(source).unwrap_err();
        assert_eq!(err.expected, expected, "for {}", source);
        assert!(err.is_committed(), "for {}", source);
    }
}

#[test]
fn test_body_of_only_definitions_reports_missing_expression() {
    let cases = [
        ("(begin (define x 1))", 19),
        ("(lambda (x) (define y 1))", 24),
        ("(let ((x 1)) (define y x))", 25),
    ];

    for (source, offset) in cases {
        let err = parse_expression(source).unwrap_err();
        assert!(err.is_committed(), "for {}", source);
        assert_eq!(err.expected, Expected::Expression, "for {}", source);
        assert_eq!(err.offset, offset, "for {}", source);
        assert_eq!(err.snippet, ")", "for {}", source);
    }
}

#[test]
fn test_broken_definition_is_fatal() {
    let err = parse("(define 1 2) x").unwrap_err();
    assert!(err.is_committed());
    assert_eq!(err.expected, Expected::Variable);
    assert_eq!(err.offset, 8);
}

#[test]
fn test_fatal_error_inside_application_aborts() {
    let err = parse_expression("(f (if x y))").unwrap_err();
    assert!(err.is_committed());
    assert_eq!(err.offset, 10);
}

#[test]
fn test_trailing_input_after_expression() {
    let source = "(if a b c) extra";
    let err = parse_expression(source).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput);
    assert_eq!(err.expected, Expected::EndOfInput);
    assert_eq!(err.offset, source.find("extra").unwrap());
    assert_eq!(err.snippet, "extra");
}

#[test]
fn test_trailing_input_after_body() {
    let err = parse("(f x) )").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput);
    assert_eq!(err.offset, 6);
}

#[test]
fn test_unterminated_string() {
    let err = parse_expression("(foo \"bar)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString { opened_at: 5 });
    assert_eq!(err.expected, Expected::Quote);
    assert_eq!(err.offset, 10);
}

#[test]
fn test_empty_string_rejected() {
    let err = parse_expression("(f \"\")").unwrap_err();
    assert_eq!(err.expected, Expected::StringCharacter);
}

#[test]
fn test_integer_overflow() {
    let err = parse_expression("(f 99999999999999999999)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::IntegerOutOfRange);
    assert_eq!(err.offset, 3);
}

#[test]
fn test_error_message_format() {
    let err = parse_expression("(f x\n  (if a b))").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 10);
    assert_eq!(
        err.to_string(),
        "Syntax error at line 2, column 10: expected expression here: \"))\""
    );
}

#[test]
fn test_snippet_length_follows_config() {
    let config = ParserConfig {
        snippet_len: 4,
        ..ParserConfig::default()
    };
    let err = SExprParser::with_config("x and then some", config)
        .parse_expression()
        .unwrap_err();
    assert_eq!(err.snippet, "and ");
}

#[test]
fn test_deep_nesting_is_bounded() {
    let depth = 10_000;
    let source = format!("{}x{}", "(f ".repeat(depth), ")".repeat(depth));
    let err = parse_expression(&source).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::NestingTooDeep {
            limit: uscheme::parser::DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_default_depth_limit_is_inclusive() {
    let nested = |depth: usize| format!("{}x{}", "(f ".repeat(depth), ")".repeat(depth));
    let limit = uscheme::parser::DEFAULT_MAX_DEPTH;

    assert!(parse_expression(&nested(limit)).is_ok());

    let err = parse_expression(&nested(limit + 1)).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit });
    assert_eq!(err.offset, 3 * limit);
}

#[test]
fn test_error_serializes_to_json() {
    let err = parse_expression("(and)").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["expected"], "Expression");
    assert_eq!(json["offset"], 4);
    assert_eq!(json["committed"], true);

    let back: ParseError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}

#[test]
fn test_config_from_partial_json() {
    let config: ParserConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
    assert_eq!(config.max_depth, 8);
    assert_eq!(config.snippet_len, ParserConfig::default().snippet_len);
}

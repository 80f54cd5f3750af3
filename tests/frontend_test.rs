use ion::config::MAX_NESTING_DEPTH;
use ion::parser::{tokenize, LexErrorKind, ParseErrorKind, SourceLocation, TokenKind};
use ion::printer::print_program;
use pretty_assertions::assert_eq;

fn print(source: &str) -> String {
    let program = ion::parse_source(source).expect("Parsing failed");
    print_program(&program)
}

fn parse_err(source: &str) -> ion::parser::ParseError {
    ion::parse_source(source).expect_err("Parsing should have failed")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .expect("Lexing failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_lexer_is_total_over_junk() {
    let tokens = tokenize("# $ ^ ~ ` \\ | ? \u{00a7} \t\r\n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);

    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_maximal_munch() {
    assert_eq!(
        kinds("x::y"),
        vec![
            TokenKind::Identifier,
            TokenKind::ColonColon,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("a<=b != c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Le,
            TokenKind::Identifier,
            TokenKind::NotEq,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("return returned"),
        vec![TokenKind::Return, TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(
        kinds("true and false or x"),
        vec![
            TokenKind::True,
            TokenKind::And,
            TokenKind::False,
            TokenKind::Or,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_precedence() {
    assert_eq!(print("1 + 2 * 3;"), "(expr (+ 1 (* 2 3)))");
    assert_eq!(print("(1 + 2) * 3;"), "(expr (* (group (+ 1 2)) 3))");
    assert_eq!(print("a or b and c;"), "(expr (or a (and b c)))");
    assert_eq!(print("a < b == c >= d;"), "(expr (== (< a b) (>= c d)))");
    assert_eq!(print("1 - 2 - 3;"), "(expr (- (- 1 2) 3))");
    assert_eq!(print("-!x * *&p;"), "(expr (* (- (! x)) (* (& p))))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(print("a = b = 1;"), "(expr (= a (= b 1)))");
    assert_eq!(print("x += y -= 2;"), "(expr (+= x (-= y 2)))");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(print("a.b(1, 2).c;"), "(expr (. (call (. a b) 1 2) c))");
    assert_eq!(print("f()(x);"), "(expr (call (call f) x))");
}

#[test]
fn test_statements() {
    let source = "import std.io;\n\
                  def int* p = &x;\n\
                  const char c = 'z';\n\
                  { return \"done\"; }";
    assert_eq!(
        print(source),
        "(import (. std io))\n\
         (def int* p (& x))\n\
         (const char c z)\n\
         (block (return \"done\"))"
    );
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse_err("a + b = c;");
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidAssignmentTarget {
            operator: "=".to_string()
        }
    );
    assert_eq!(err.location, SourceLocation::new(1, 7));
    assert_eq!(
        err.to_string(),
        "Parse error at line 1, column 7: Invalid assignment target for '='"
    );

    assert!(matches!(
        parse_err("a.b = 1;").kind,
        ParseErrorKind::InvalidAssignmentTarget { .. }
    ));
}

#[test]
fn test_call_argument_limit() {
    let args = |n: usize| vec!["0"; n].join(", ");

    let program = ion::parse_source(&format!("f({});", args(255))).unwrap();
    assert_eq!(program.len(), 1);

    let err = parse_err(&format!("f({});", args(256)));
    assert_eq!(err.kind, ParseErrorKind::TooManyArguments { max: 255 });
}

#[test]
fn test_trailing_comma() {
    assert_eq!(parse_err("f(1,);").kind, ParseErrorKind::TrailingComma);
}

#[test]
fn test_unterminated_string() {
    let err = parse_err("x = \"abc");
    assert_eq!(
        err.kind,
        ParseErrorKind::Lex(LexErrorKind::UnterminatedString)
    );
    assert_eq!(err.location, SourceLocation::new(1, 5));
}

#[test]
fn test_deep_nesting_is_reported() {
    let source = format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_err(&source);
    assert_eq!(
        err.kind,
        ParseErrorKind::NestingTooDeep {
            max: MAX_NESTING_DEPTH
        }
    );
    assert!(err.to_string().contains("Nesting too deep"));

    let shallow = format!("x = {}1{};", "(".repeat(8), ")".repeat(8));
    assert!(ion::parse_source(&shallow).is_ok());
}

#[test]
fn test_string_ends_at_line_break() {
    assert_eq!(print("f(\"open\n);"), "(expr (call f \"open))");
}

#[test]
fn test_error_positions_span_lines() {
    let err = parse_err("a;\n  b = ;");
    assert!(matches!(err.kind, ParseErrorKind::ExpectedExpression { .. }));
    assert_eq!(err.location, SourceLocation::new(2, 7));
}

#[test]
fn test_no_partial_tree_on_error() {
    assert!(ion::parse_source("a; b; c").is_err());
    assert!(ion::parse_source("").unwrap().is_empty());
}

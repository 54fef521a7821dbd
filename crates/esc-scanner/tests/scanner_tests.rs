use super::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_throws_and_rejects_scan_as_contextual_keywords() {
    let kinds = scan_all("function f(): void throws Error rejects X {}");
    assert!(kinds.contains(&SyntaxKind::ThrowsKeyword));
    assert!(kinds.contains(&SyntaxKind::RejectsKeyword));
    assert!(SyntaxKind::ThrowsKeyword.is_identifier_like());
    assert!(!SyntaxKind::ThrowKeyword.is_identifier_like());
}

#[test]
fn test_comments_are_recorded_once_across_restores() {
    let source = "// @ts-expect-exception\nf();";
    let mut scanner = ScannerState::new(source);
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.restore_state(snapshot);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.get_comments().len(), 1);
    assert_eq!(scanner.get_comments()[0].get_text(source), "// @ts-expect-exception");
}

#[test]
fn test_string_escapes_are_cooked() {
    let mut scanner = ScannerState::new(r#""a\nA\x42""#);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\nAB");
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("'abc\n");
    scanner.scan();
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1002);
}

#[test]
fn test_greater_than_rescan() {
    let mut scanner = ScannerState::new("a >>= b");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanGreaterThanEqualsToken
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_regex_rescan_includes_flags() {
    let mut scanner = ScannerState::new(r"/^-?\d+[/]$/gi.test");
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(
        scanner.re_scan_slash_token(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.get_token_value(), r"/^-?\d+[/]$/gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
}

#[test]
fn test_template_continuation() {
    let mut scanner = ScannerState::new("`a${ x }b${y}c`");
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.get_token_value(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.get_token_value(), "c");
}

#[test]
fn test_numbers_and_optional_chaining() {
    let kinds = scan_all("a?.b ?? 1_000n ?.5 0xFF 1e3");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::BigIntLiteral,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_keyword_table_round_trips_through_text() {
    for value in SyntaxKind::FIRST_KEYWORD as u16..=SyntaxKind::LAST_KEYWORD as u16 {
        let kind = SyntaxKind::try_from_u16(value).expect("keyword kind");
        assert_eq!(kind as u16, value, "ALL_KINDS out of order at {value}");
        let text = kind.text().expect("keyword text");
        assert_eq!(text_to_keyword(text), Some(kind));
    }
}

mod common;

use common::*;
use relexpr::Pos;
use rellex::{Lexer, LexerConfig, TokenKind, TokenSource};

fn lex(config: LexerConfig, src: &str) -> Vec<(TokenKind, String, Pos)> {
    let mut lexer = Lexer::new(config, src.as_bytes());
    let mut out = Vec::new();
    loop {
        let t = lexer.next_token().unwrap();
        if t.kind().is_eof() {
            return out;
        }
        out.push((t.kind(), t.text().to_string(), t.pos().clone()));
    }
}

#[test]
fn keywords_identifiers_and_literals() {
    use TokenKind::*;
    let got: Vec<_> = lex(LexerConfig::new("m.als"), r#"sig Person { owns: set Car } "hi \"x\"" 42 iff"#)
        .into_iter()
        .map(|(k, _, _)| k)
        .collect();
    assert_eq!(got, vec![
        Sig, Id, LBrace, Id, Colon, Set, Id, RBrace, Str, Number, Iff
    ]);
}

#[test]
fn positions_honor_filename_and_line_offset() {
    let config = LexerConfig::new("m.als").with_line_offset(4);
    let tokens = lex(config, "sig A {}\n  fact  Owners {}");
    let (kind, text, pos) = &tokens[5];
    assert_eq!(*kind, TokenKind::Id);
    assert_eq!(text, "Owners");
    assert_eq!(pos, &Pos::span("m.als", 6, 9, 6, 14));
    assert_eq!(tokens[0].2.line(), 5);
}

#[test]
fn largest_line_offset_saturates() {
    let config = LexerConfig::new("m.als").with_line_offset(u32::MAX);
    let tokens = lex(config, "a\nb");
    assert_eq!(tokens[0].2.line(), u32::MAX);
    assert_eq!(tokens[1].2.line(), u32::MAX);
}

#[test]
fn eof_is_returned_forever() {
    let mut lexer = Lexer::new(LexerConfig::new("m.als"), "x\n".as_bytes());
    assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Id);
    for _ in 0..4 {
        let eof = lexer.next_token().unwrap();
        assert!(eof.kind().is_eof());
        assert_eq!(eof.pos().line(), 2);
    }
}

#[test]
fn dollar_is_only_accepted_when_enabled() {
    let with = lex(LexerConfig::new("m.als").with_allow_dollar(true), "this$0");
    assert_eq!(with.len(), 1);
    assert_eq!(with[0].1, "this$0");

    let mut without = Lexer::new(LexerConfig::new("m.als"), "this$0".as_bytes());
    let err = without.next_token().unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.pos().column(), 5);
}

#[test]
fn unrecognized_character_is_a_syntax_error() {
    let mut lexer = Lexer::new(LexerConfig::new("m.als"), "a\n b ` c".as_bytes());
    let err = lexer.next_token().unwrap_err();
    assert!(err.is_syntax());
    assert_eq!((err.pos().line(), err.pos().column()), (2, 4));
    assert!(err.to_string().starts_with("Syntax error at line 2, column 4"));
    // The failure sticks.
    assert_eq!(lexer.next_token().unwrap_err(), err);
}

#[test]
fn io_error_is_reported_as_syntax_error() {
    let mut lexer = Lexer::new(LexerConfig::new("m.als"), BrokenReader);
    let err = lexer.next_token().unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.message(), "IO error: disk on fire");
}

#[test]
fn words_spelling_operators_map_to_the_operator() {
    use TokenKind::*;
    let got: Vec<_> = lex(LexerConfig::default(), "a and b or not c implies d")
        .into_iter()
        .map(|(k, _, _)| k)
        .collect();
    assert_eq!(got, vec![Id, And, Id, Or, Not, Id, Implies, Id]);
}

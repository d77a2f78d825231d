//! Character-reference decoding end to end, including the error-recovery
//! paths (unterminated, unknown, and out-of-range references).

use hvml_tokenizer::{ErrorKind, Token, Tokenizer, TokenizerOptions, VecSink};

fn decode(input: &[u8]) -> (String, Vec<ErrorKind>) {
    let mut tokenizer = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(input);
    let sink = tokenizer.finish();
    let text = sink
        .tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character(c) => Some(c.text.as_str()),
            _ => None,
        })
        .collect();
    let errors = sink.errors.into_iter().map(|(k, _)| k).collect();
    (text, errors)
}

#[test]
fn legacy_named_reference_without_semicolon_is_accepted_with_a_warning() {
    let (text, errors) = decode(b"a &amp b");
    assert_eq!(text, "a & b");
    assert_eq!(errors, vec![ErrorKind::MissingSemicolonAfterCharacterReference]);
}

#[test]
fn unknown_named_reference_is_left_literal() {
    let (text, errors) = decode(b"&notareference;");
    assert_eq!(text, "&notareference;");
    assert_eq!(errors, vec![ErrorKind::UnknownNamedCharacterReference]);
}

#[test]
fn decimal_and_hex_numeric_references_decode() {
    let (text, errors) = decode(b"&#65;&#x42;");
    assert_eq!(text, "AB");
    assert!(errors.is_empty());
}

#[test]
fn null_numeric_reference_becomes_replacement_character() {
    let (text, errors) = decode(b"&#0;");
    assert_eq!(text, "\u{FFFD}");
    assert_eq!(errors, vec![ErrorKind::UnexpectedNullCharacter]);
}

#[test]
fn lone_ampersand_is_literal() {
    let (text, errors) = decode(b"a & b");
    assert_eq!(text, "a & b");
    assert!(errors.is_empty());
}

#[test]
fn character_data_before_a_reference_is_preserved() {
    // Regression: the reference candidate buffer must not clobber character
    // data already accumulated before the `&`.
    let (text, errors) = decode(b"price: &amp;5");
    assert_eq!(text, "price: &5");
    assert!(errors.is_empty());
}

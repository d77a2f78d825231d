//! eJSON sub-machine coverage: numbers, byte sequences, keywords, strings,
//! and the CJSONEE `(a; b; c)` / mixed-separator group forms.

use hvml_tokenizer::{Token, Tokenizer, TokenizerOptions, Vcm, VecSink};

fn ejson_value(input: &[u8]) -> Vcm {
    let mut tokenizer = Tokenizer::new_ejson(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(input);
    let sink = tokenizer.finish();
    assert_eq!(sink.errors, vec![], "unexpected parse errors for {input:?}");
    match sink.tokens.as_slice() {
        [Token::VcmTree(tree), Token::Eof(_)] => tree.root.clone(),
        other => panic!("expected exactly one VcmTree + Eof, got {other:?}"),
    }
}

#[test]
fn integer_literal() {
    assert_eq!(ejson_value(b"42"), Vcm::Number(hvml_tokenizer::Number::Signed(42)));
}

#[test]
fn negative_float_literal() {
    assert_eq!(ejson_value(b"-3.5"), Vcm::Number(hvml_tokenizer::Number::Float(-3.5)));
}

#[test]
fn unsigned_long_suffix() {
    assert_eq!(
        ejson_value(b"7UL"),
        Vcm::Number(hvml_tokenizer::Number::Unsigned(7))
    );
}

#[test]
fn hex_integer_literal() {
    assert_eq!(ejson_value(b"0xFF"), Vcm::Number(hvml_tokenizer::Number::Signed(255)));
}

#[test]
fn keywords_resolve_to_their_builder_calls() {
    assert_eq!(ejson_value(b"true"), Vcm::Boolean(true));
    assert_eq!(ejson_value(b"false"), Vcm::Boolean(false));
    assert_eq!(ejson_value(b"null"), Vcm::Null);
    assert_eq!(ejson_value(b"undefined"), Vcm::Undefined);
}

#[test]
fn hex_byte_sequence() {
    assert_eq!(ejson_value(b"bx48656c6c6f"), Vcm::ByteSequence(b"Hello".to_vec()));
}

#[test]
fn string_with_escapes() {
    assert_eq!(ejson_value(br#""a\nb\tc""#), Vcm::String("a\nb\tc".to_string()));
}

#[test]
fn triple_quoted_string_allows_embedded_quotes() {
    assert_eq!(
        ejson_value(br#""""he said "hi" there""""#),
        Vcm::String(r#"he said "hi" there"#.to_string())
    );
}

#[test]
fn array_of_mixed_values() {
    assert_eq!(
        ejson_value(b"[1, \"two\", false]"),
        Vcm::Array(vec![
            Vcm::Number(hvml_tokenizer::Number::Signed(1)),
            Vcm::String("two".to_string()),
            Vcm::Boolean(false),
        ])
    );
}

#[test]
fn paren_group_promotes_to_array_on_comma() {
    assert_eq!(
        ejson_value(b"(1, 2, 3)"),
        Vcm::Array(vec![
            Vcm::Number(hvml_tokenizer::Number::Signed(1)),
            Vcm::Number(hvml_tokenizer::Number::Signed(2)),
            Vcm::Number(hvml_tokenizer::Number::Signed(3)),
        ])
    );
}

#[test]
fn paren_group_promotes_to_cjsonee_on_semicolon() {
    assert_eq!(
        ejson_value(b"(1; 2; 3)"),
        Vcm::Group(vec![
            Vcm::Number(hvml_tokenizer::Number::Signed(1)),
            Vcm::Number(hvml_tokenizer::Number::Signed(2)),
            Vcm::Number(hvml_tokenizer::Number::Signed(3)),
        ])
    );
}

#[test]
fn nested_object_and_array() {
    assert_eq!(
        ejson_value(b"{'a': {'b': [true, false]}}"),
        Vcm::Object(vec![(
            "a".to_string(),
            Vcm::Object(vec![(
                "b".to_string(),
                Vcm::Array(vec![Vcm::Boolean(true), Vcm::Boolean(false)])
            )])
        )])
    );
}

#[test]
fn standalone_variable_reference() {
    assert_eq!(ejson_value(b"$a.b.c"), Vcm::Variable("a.b.c".to_string()));
}

#[test]
fn mixing_comma_into_a_cjsonee_group_is_a_parse_error() {
    let mut tokenizer = Tokenizer::new_ejson(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(b"(1; 2, 3)");
    let sink = tokenizer.finish();
    assert!(!sink.errors.is_empty());
}

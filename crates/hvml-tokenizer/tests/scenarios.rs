//! End-to-end tokenizer scenarios, one per documented behavior: markup,
//! attribute interpolation, comments, a standalone eJSON document, character
//! references, and duplicate-attribute recovery.

use hvml_tokenizer::token::{AssignOp, AttrValueSegment};
use hvml_tokenizer::{Token, Tokenizer, TokenizerOptions, Vcm, VecSink};

fn run(input: &[u8]) -> VecSink {
    let mut tokenizer = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(input);
    tokenizer.finish()
}

fn run_ejson(input: &[u8]) -> VecSink {
    let mut tokenizer = Tokenizer::new_ejson(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(input);
    tokenizer.finish()
}

#[test]
fn simple_element_round_trip() {
    let sink = run(b"<p>hi</p>");
    assert_eq!(sink.errors, vec![]);
    match &sink.tokens[..] {
        [Token::StartTag(start), Token::Character(ch), Token::EndTag(end), Token::Eof(_)] => {
            assert_eq!(start.name, "p");
            assert!(start.attributes.is_empty());
            assert!(!start.self_closing);
            assert_eq!(ch.text, "hi");
            assert_eq!(end.name, "p");
        }
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn attribute_with_compound_operator_and_variable_interpolation() {
    let sink = run(br#"<a x="1" y+=$b.c>"#);
    assert_eq!(sink.errors, vec![]);
    match &sink.tokens[..] {
        [Token::StartTag(start), Token::Eof(_)] => {
            assert_eq!(start.name, "a");
            assert!(!start.self_closing);
            assert_eq!(start.attributes.len(), 2);

            let x = &start.attributes[0];
            assert_eq!(x.name, "x");
            assert_eq!(x.operator, AssignOp::Set);
            assert_eq!(x.value.as_literal_str(), Some("1"));

            let y = &start.attributes[1];
            assert_eq!(y.name, "y");
            assert_eq!(y.operator, AssignOp::Add);
            match &y.value.segments[..] {
                [AttrValueSegment::Expression(Vcm::Variable(raw))] => assert_eq!(raw, "b.c"),
                other => panic!("unexpected attribute value segments: {other:?}"),
            }
        }
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn comment_is_emitted_verbatim() {
    let sink = run(b"<!-- hello -->");
    assert_eq!(sink.errors, vec![]);
    match &sink.tokens[..] {
        [Token::Comment(comment), Token::Eof(_)] => assert_eq!(comment.data, " hello "),
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn standalone_ejson_document_produces_one_vcm_tree() {
    let sink = run_ejson(br#"{"k": [1, 2.5, true]}"#);
    assert_eq!(sink.errors, vec![]);
    match &sink.tokens[..] {
        [Token::VcmTree(tree), Token::Eof(_)] => match &tree.root {
            Vcm::Object(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, "k");
                match &entries[0].1 {
                    Vcm::Array(items) => {
                        assert_eq!(items.len(), 3);
                        assert_eq!(items[2], Vcm::Boolean(true));
                    }
                    other => panic!("expected array, got {other:?}"),
                }
            }
            other => panic!("expected object, got {other:?}"),
        },
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn character_references_decode_named_and_numeric_forms() {
    let sink = run(b"&amp;&#65;&#x3C;");
    assert_eq!(sink.errors, vec![]);
    match &sink.tokens[..] {
        [Token::Character(ch), Token::Eof(_)] => assert_eq!(ch.text, "&A<"),
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn duplicate_attribute_is_reported_and_discarded() {
    let sink = run(b"<p a=1 a=2>");
    assert_eq!(sink.errors.len(), 1);
    match &sink.tokens[..] {
        [Token::StartTag(start), Token::Eof(_)] => {
            assert_eq!(start.attributes.len(), 1);
            assert_eq!(start.attributes[0].name, "a");
            assert_eq!(start.attributes[0].value.as_literal_str(), Some("1"));
        }
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

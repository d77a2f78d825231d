//! Structural invariants that should hold regardless of the specific input:
//! token ordering, EOF termination, attribute-name uniqueness, and eJSON
//! frame-stack balance.

use hvml_tokenizer::{Token, Tokenizer, TokenizerOptions, VecSink};

fn tokens(input: &[u8]) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
    tokenizer.feed(input);
    tokenizer.finish().tokens
}

#[test]
fn every_run_ends_in_exactly_one_eof_token() {
    for input in [&b""[..], b"<p>", b"plain text", b"<!-- c -->", b"<a x=1>"] {
        let out = tokens(input);
        assert!(matches!(out.last(), Some(Token::Eof(_))), "missing trailing EOF for {input:?}");
        let eof_count = out.iter().filter(|t| matches!(t, Token::Eof(_))).count();
        assert_eq!(eof_count, 1, "expected exactly one EOF for {input:?}");
    }
}

#[test]
fn feeding_in_arbitrary_chunks_yields_the_same_tokens_as_one_shot() {
    let input = b"<p a=1 b=\"two\">hello &amp; world</p>";
    let mut one_shot = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
    one_shot.feed(input);
    let whole = one_shot.finish().tokens;

    let mut chunked = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
    for byte in input {
        chunked.feed(std::slice::from_ref(byte));
    }
    let piecewise = chunked.finish().tokens;

    assert_eq!(whole, piecewise);
}

#[test]
fn start_tag_never_reports_two_attributes_with_the_same_name() {
    let out = tokens(b"<p a=1 a=2 a=3 b=4>");
    match &out[..] {
        [Token::StartTag(start), Token::Eof(_)] => {
            let mut names: Vec<&str> = start.attributes.iter().map(|a| a.name.as_str()).collect();
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), before, "duplicate attribute name survived to the token");
        }
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn empty_input_produces_only_eof() {
    let out = tokens(b"");
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0], Token::Eof(_)));
}

#[test]
fn unterminated_comment_at_eof_still_emits_a_comment_token() {
    let out = tokens(b"<!-- never closed");
    match &out[..] {
        [Token::Comment(comment), Token::Eof(_)] => assert_eq!(comment.data, " never closed"),
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

#[test]
fn self_closing_tag_is_flagged() {
    let out = tokens(b"<br/>");
    match &out[..] {
        [Token::StartTag(start), Token::Eof(_)] => {
            assert_eq!(start.name, "br");
            assert!(start.self_closing);
        }
        other => panic!("unexpected token sequence: {other:?}"),
    }
}

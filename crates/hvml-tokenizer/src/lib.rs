//! Streaming tokenizer and eJSON lexer for the HVML markup language.
//!
//! HVML (Hybrid Virtual Markup Language) interleaves HTML5-flavored tag
//! syntax with an extended-JSON expression language (eJSON) and
//! string/attribute interpolation (JSONEE). This crate implements the
//! tokenization layer only: a single, total state machine that turns a
//! byte stream into [`Token`]s, leaving tree construction and expression
//! evaluation to callers.
//!
//! ```
//! use hvml_tokenizer::{Tokenizer, TokenizerOptions, VecSink};
//!
//! let mut tokenizer = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
//! tokenizer.feed(b"<p>hi</p>");
//! let sink = tokenizer.finish();
//! assert_eq!(sink.tokens.len(), 4); // StartTag, Character, EndTag, Eof
//! ```
//!
//! # Layout
//!
//! - [`input`] — the byte-to-scalar reader with single-slot pushback.
//! - [`buffer`] — the Fibonacci-growth temp buffer shared by every
//!   accumulating state.
//! - [`char_ref`] / [`named_refs`] — the character-reference decoder.
//! - [`ejson`] — the eJSON frame stack and numeric-literal finalizer.
//! - [`state`] — the full tokenizer state roster.
//! - [`token`] / [`sink`] — the token object model and delivery contract.
//! - [`tokenizer`] — the state machine itself.

pub(crate) mod buffer;
pub(crate) mod char_ref;
pub(crate) mod charclass;
pub mod ejson;
pub mod error;
pub(crate) mod input;
pub(crate) mod named_refs;
pub mod options;
pub mod sink;
pub mod state;
pub mod token;
pub mod tokenizer;

pub use ejson::value::{DefaultVcmBuilder, Number, Vcm, VcmBuilder};
pub use error::{BadPushback, ErrorKind, FatalError, Position};
pub use options::TokenizerOptions;
pub use sink::{TokenSink, VecSink};
pub use state::TokenizerState;
pub use token::{
    AssignOp, AttrValue, AttrValueSegment, Attribute, Character, Comment, Doctype, EndTag, StartTag, Token, VcmTree,
};
pub use tokenizer::Tokenizer;

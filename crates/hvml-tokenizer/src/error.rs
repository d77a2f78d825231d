//! Error taxonomy for the tokenizer.
//!
//! Mirrors the teacher crate's `ErrorSource`/`SyntaxError` split
//! (`parser/error.rs`): a wire-visible, recoverable taxonomy reported through
//! the sink, and a small set of fatal conditions that stop tokenization.

use std::fmt;

use thiserror::Error;

/// Source position: 1-based line/column plus a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub(crate) const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The wire-visible, recoverable error taxonomy from spec §6.
///
/// Every variant here is non-fatal: the tokenizer reports it to
/// [`crate::sink::TokenSink::on_parse_error`] and keeps making progress per
/// the recovery prescribed by the state that raised it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unexpected null character")]
    UnexpectedNullCharacter,
    #[error("unexpected character in number exponent")]
    UnexpectedNumberExponent,
    #[error("unexpected character in number fraction")]
    UnexpectedNumberFraction,
    #[error("unexpected character in number integer part")]
    UnexpectedNumberInteger,
    #[error("unexpected character in number")]
    UnexpectedNumber,
    #[error("unexpected right brace")]
    UnexpectedRightBrace,
    #[error("unexpected right bracket")]
    UnexpectedRightBracket,
    #[error("unexpected key name")]
    UnexpectedKeyName,
    #[error("unexpected comma")]
    UnexpectedComma,
    #[error("unexpected keyword")]
    UnexpectedKeyword,
    #[error("unexpected character in base64 byte sequence")]
    UnexpectedBase64,
    #[error("bad number")]
    BadNumber,
    #[error("bad eJSON value")]
    BadJson,
    #[error("bad string escape sequence")]
    BadStringEscape,
    #[error("end of file inside string")]
    EofInString,
    #[error("unknown named character reference")]
    UnknownNamedCharacterReference,
    #[error("control character in input stream")]
    ControlCharacterInInputStream,
    #[error("missing semicolon after character reference")]
    MissingSemicolonAfterCharacterReference,
    #[error("duplicate attribute")]
    DuplicateAttribute,
    #[error("invalid UTF-8 byte sequence")]
    BadEncoding,
    #[error("ambiguous character reference start")]
    AmbiguousAmpersand,
    #[error("bogus comment")]
    BogusComment,
    #[error("bogus doctype")]
    BogusDoctype,
    #[error("abrupt closing of empty comment")]
    AbruptClosingOfEmptyComment,
    #[error("CDATA section not allowed in this context")]
    CdataInHtmlContent,
    #[error("mixed CJSONEE separators")]
    MixedCjsoneeSeparators,
}

/// Fatal conditions: the tokenizer sets a sticky flag, emits `Eof`, and all
/// subsequent `feed`/`finish` calls become no-ops. See spec §7.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    #[error("out of memory growing the temp buffer")]
    OutOfMemory,
    #[error("input reader failed")]
    ReaderFailure,
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Error produced by [`crate::input::ByteReader::push_back`] when called
/// twice without an intervening `next()`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("push_back called twice without an intervening next()")]
pub struct BadPushback;

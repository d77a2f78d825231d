//! The token sink contract (spec §6).
//!
//! Shaped after the teacher crate's event-callback split in `parser/mod.rs`
//! (there: an internal event buffer drained by the streaming iterator); here
//! the sink is an explicit trait so embedders choose push (trait impl) or
//! pull (the provided [`VecSink`]) without the tokenizer core depending on
//! either.

use crate::ejson::value::Vcm;
use crate::error::{ErrorKind, FatalError, Position};
use crate::token::Token;

/// Receives tokens and diagnostics from a [`crate::tokenizer::Tokenizer`] in
/// strict source order. Generic over the eJSON value type to match
/// [`Token`]; embedders using the default [`crate::ejson::value::DefaultVcmBuilder`]
/// can ignore the parameter.
pub trait TokenSink<V = Vcm> {
    /// Called once per completed token, including the terminal `EOF`.
    fn on_token(&mut self, token: Token<V>);

    /// Called for a recoverable parse error. Always precedes the token the
    /// erroring region eventually contributes, per spec §5's ordering rule.
    fn on_parse_error(&mut self, kind: ErrorKind, at: Position);

    /// Called at most once, immediately before the terminal `EOF` token, if
    /// tokenization had to stop early (spec §7's fatal-error stratum).
    fn on_fatal(&mut self, _error: FatalError, _at: Position) {}
}

/// A [`TokenSink`] that just collects everything, for tests and simple
/// embedders that don't need streaming delivery.
#[derive(Debug)]
pub struct VecSink<V = Vcm> {
    pub tokens: Vec<Token<V>>,
    pub errors: Vec<(ErrorKind, Position)>,
    pub fatal: Option<(FatalError, Position)>,
}

impl<V> Default for VecSink<V> {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            errors: Vec::new(),
            fatal: None,
        }
    }
}

impl<V> TokenSink<V> for VecSink<V> {
    fn on_token(&mut self, token: Token<V>) {
        self.tokens.push(token);
    }

    fn on_parse_error(&mut self, kind: ErrorKind, at: Position) {
        self.errors.push((kind, at));
    }

    fn on_fatal(&mut self, error: FatalError, at: Position) {
        self.fatal = Some((error, at));
    }
}

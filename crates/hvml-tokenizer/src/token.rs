//! The token object model (spec §3, §6).
//!
//! Every token carries the position of its first and last contributing byte,
//! matching the teacher crate's span-carrying `ParseEvent` variants
//! (`event.rs`).

use crate::ejson::value::Vcm;
use crate::error::Position;

/// One lexical event produced by the tokenizer.
///
/// Generic over the eJSON value type `V` so embedders that supply their own
/// [`crate::ejson::value::VcmBuilder`] get `VCM_TREE` tokens carrying their
/// own value type instead of the crate's default [`Vcm`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token<V = Vcm> {
    Doctype(Doctype),
    StartTag(StartTag<V>),
    EndTag(EndTag),
    Comment(Comment),
    Character(Character),
    VcmTree(VcmTree<V>),
    Eof(Position),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Doctype {
    pub name: Option<String>,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
    pub force_quirks: bool,
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartTag<V = Vcm> {
    pub name: String,
    pub attributes: Vec<Attribute<V>>,
    pub self_closing: bool,
    pub start: Position,
    pub end: Position,
}

impl<V> Default for StartTag<V> {
    fn default() -> Self {
        Self {
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            start: Position::default(),
            end: Position::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EndTag {
    pub name: String,
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comment {
    pub data: String,
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Character {
    pub text: String,
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VcmTree<V = Vcm> {
    pub root: V,
    pub start: Position,
    pub end: Position,
}

/// The assignment operator on an attribute, drawn from
/// `{=, +=, -=, *=, /=, %=, ~=, ^=, $=}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Tilde,
    Xor,
    Dollar,
}

impl AssignOp {
    /// Maps the lead character of a compound operator (`+`, `-`, ... `$`) to
    /// its variant; `=` itself maps to [`AssignOp::Set`].
    pub(crate) fn from_lead_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Set),
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '~' => Some(Self::Tilde),
            '^' => Some(Self::Xor),
            '$' => Some(Self::Dollar),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
            Self::Tilde => "~=",
            Self::Xor => "^=",
            Self::Dollar => "$=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<V = Vcm> {
    pub name: String,
    pub operator: AssignOp,
    pub value: AttrValue<V>,
}

/// An attribute value, possibly interleaving literal text with `$`-prefixed
/// eJSON interpolations (spec §4.4's "ordered list of segments").
#[derive(Debug, Clone, PartialEq)]
pub struct AttrValue<V = Vcm> {
    pub segments: Vec<AttrValueSegment<V>>,
}

impl<V> Default for AttrValue<V> {
    fn default() -> Self {
        Self { segments: Vec::new() }
    }
}

impl<V> AttrValue<V> {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            segments: vec![AttrValueSegment::Literal(text.into())],
        }
    }

    /// The single literal segment's text, for callers that don't care about
    /// interpolation structure (e.g. `duplicate-attribute` diagnostics,
    /// tests).
    pub fn as_literal_str(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [AttrValueSegment::Literal(s)] => Some(s),
            [] => Some(""),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValueSegment<V = Vcm> {
    Literal(String),
    Expression(V),
}

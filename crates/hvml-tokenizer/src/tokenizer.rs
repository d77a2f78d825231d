//! The tokenizer core (spec §4.4): the ~120-state machine driving the input
//! reader, temp buffer, character-reference decoder and eJSON sub-machine,
//! emitting tokens to a [`TokenSink`].
//!
//! Shaped after the teacher crate's `parser/mod.rs` pull loop: a single
//! `step` dispatches on the current state, consumes zero or more scalars via
//! [`ByteReader`], and returns once it can make no further progress without
//! more input.

use crate::buffer::TempBuffer;
use crate::char_ref::{
    decimal_digit_value, hex_digit_value, longest_named_prefix, numeric_ref_to_char, MAX_DECIMAL_DIGITS,
    MAX_HEX_DIGITS,
};
use crate::charclass as cc;
use crate::ejson::number::{finalize as finalize_number, NumberFlags, NumberSuffix};
use crate::ejson::value::{DefaultVcmBuilder, Number, VcmBuilder, Vcm};
use crate::ejson::{EjsonStack, FrameKind, ParenSeparator};
use crate::error::{ErrorKind, FatalError, Position};
use crate::input::{ByteReader, Peek};
use crate::options::TokenizerOptions;
use crate::sink::TokenSink;
use crate::state::TokenizerState;
use crate::token::{AssignOp, Attribute, AttrValue, AttrValueSegment, Comment, Doctype, EndTag, StartTag, Token, VcmTree};

/// Streaming HVML tokenizer. `B` is the eJSON value builder
/// ([`DefaultVcmBuilder`] unless an embedder supplies its own); `S` is the
/// [`TokenSink`] receiving tokens and diagnostics.
pub struct Tokenizer<S, B = DefaultVcmBuilder>
where
    B: VcmBuilder,
    S: TokenSink<B::Value>,
{
    reader: ByteReader,
    sink: S,
    builder: B,
    options: TokenizerOptions,

    state: TokenizerState,
    /// Single-slot return-state register for character-reference states
    /// (spec §3).
    return_state: TokenizerState,
    /// Where a completed eJSON-family value (string/number/keyword/bytes/
    /// variable/composite) should be delivered: one of the
    /// `JsoneeAttributeValue*` states when parsing an attribute, or the
    /// outer markup state otherwise (see [`Self::deliver_value`]).
    ejson_return: TokenizerState,

    buffer: TempBuffer,
    fatal: Option<FatalError>,
    eof_emitted: bool,

    tag_name: String,
    tag_is_end: bool,
    tag_self_closing: bool,
    attributes: Vec<Attribute<B::Value>>,
    attr_name: String,
    attr_op: AssignOp,
    attr_segments: Vec<AttrValueSegment<B::Value>>,
    attr_quote: Option<char>,

    comment_data: String,
    doctype: Doctype,

    token_start: Position,

    char_ref_code: u32,
    char_ref_digits: usize,
    /// Candidate text for a named character reference, kept separate from
    /// `buffer` so a reference mid-way through accumulated character data
    /// doesn't clobber it (spec §4.3).
    char_ref_buffer: TempBuffer,

    ejson: EjsonStack<B::Value>,
    number_flags: NumberFlags,
    number_negative: bool,

    template_tag_name: String,

    text_start: Option<Position>,
}

impl<S> Tokenizer<S, DefaultVcmBuilder>
where
    S: TokenSink<Vcm>,
{
    /// A tokenizer that starts in markup content (spec's normal entry
    /// point).
    pub fn new(sink: S, options: TokenizerOptions) -> Self {
        Self::with_builder(sink, options, DefaultVcmBuilder)
    }

    /// A tokenizer that starts directly in the eJSON sub-machine, for
    /// parsing a standalone eJSON document (spec §8 scenario 4).
    pub fn new_ejson(sink: S, options: TokenizerOptions) -> Self {
        let mut t = Self::new(sink, options);
        t.state = TokenizerState::EjsonData;
        t.ejson_return = TokenizerState::EjsonData;
        t
    }
}

impl<S, B> Tokenizer<S, B>
where
    B: VcmBuilder,
    S: TokenSink<B::Value>,
{
    pub fn with_builder(sink: S, options: TokenizerOptions, builder: B) -> Self {
        Self {
            reader: ByteReader::new(),
            sink,
            builder,
            options,
            state: TokenizerState::Data,
            return_state: TokenizerState::Data,
            ejson_return: TokenizerState::Data,
            buffer: TempBuffer::new(),
            fatal: None,
            eof_emitted: false,
            tag_name: String::new(),
            tag_is_end: false,
            tag_self_closing: false,
            attributes: Vec::new(),
            attr_name: String::new(),
            attr_op: AssignOp::Set,
            attr_segments: Vec::new(),
            attr_quote: None,
            comment_data: String::new(),
            doctype: Doctype::default(),
            token_start: Position::START,
            char_ref_code: 0,
            char_ref_digits: 0,
            char_ref_buffer: TempBuffer::new(),
            ejson: EjsonStack::new(),
            number_flags: NumberFlags::default(),
            number_negative: false,
            template_tag_name: String::new(),
            text_start: None,
        }
    }

    /// Feed more bytes; tokens and errors are delivered synchronously to the
    /// sink before this call returns.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.reader.feed(bytes);
        self.run();
    }

    /// Close the input and drive the tokenizer to its terminal `EOF` token,
    /// returning the sink.
    pub fn finish(mut self) -> S {
        self.reader.close();
        self.run();
        self.sink
    }

    fn run(&mut self) {
        if self.fatal.is_some() || self.eof_emitted {
            return;
        }
        loop {
            if let Some(diag) = self.reader.take_diagnostic() {
                let pos = self.reader.position();
                self.sink.on_parse_error(diag, pos);
            }
            match self.reader.peek() {
                Peek::Empty => return,
                Peek::Eof => {
                    // Drive the active state's own EOF-recovery arm (flush a
                    // pending comment/doctype/CDATA/string/etc.) until it
                    // reaches a fixed point, then emit the terminal token.
                    let before = self.state;
                    self.step();
                    if self.state == before {
                        self.emit_eof();
                        return;
                    }
                }
                Peek::Char(_) => self.step(),
            }
            if self.fatal.is_some() {
                self.emit_eof();
                return;
            }
        }
    }

    fn emit_eof(&mut self) {
        if !self.eof_emitted {
            let pos = self.reader.position();
            self.flush_text();
            self.sink.on_token(Token::Eof(pos));
            self.eof_emitted = true;
        }
    }

    fn bump(&mut self) -> (char, Position) {
        let pos = self.reader.position();
        match self.reader.consume() {
            Peek::Char(c) => (c, pos),
            _ => unreachable!("bump() called without a pending scalar"),
        }
    }

    fn reconsume(&mut self, c: char) {
        let _ = self.reader.push_back(c);
    }

    fn error(&mut self, kind: ErrorKind) {
        let pos = self.reader.position();
        self.sink.on_parse_error(kind, pos);
    }

    fn start_text(&mut self) {
        if self.text_start.is_none() {
            self.text_start = Some(self.reader.position());
        }
    }

    fn flush_text(&mut self) {
        if !self.buffer.is_empty() {
            let start = self.text_start.unwrap_or(self.token_start);
            let end = self.reader.position();
            let text = self.buffer.take();
            self.sink.on_token(Token::Character(crate::token::Character { text, start, end }));
        }
        self.text_start = None;
    }

    // ---- Markup: DATA / TAG_OPEN / attributes ----------------------------

    fn state_data(&mut self) {
        match self.reader.peek() {
            Peek::Char('<') => {
                self.flush_text();
                self.bump();
                self.token_start = self.reader.position();
                self.state = TokenizerState::TagOpen;
            }
            Peek::Char('&') => {
                self.bump();
                self.return_state = TokenizerState::Data;
                self.state = TokenizerState::CharacterReference;
            }
            Peek::Char(c) => {
                self.start_text();
                self.bump();
                self.buffer.append(c);
                if self.buffer.char_size() >= 1024 {
                    self.flush_text();
                }
            }
            Peek::Empty | Peek::Eof => {}
        }
    }

    fn state_tag_open(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            '!' => {
                self.bump();
                self.state = TokenizerState::MarkupDeclarationOpen;
            }
            '/' => {
                self.bump();
                self.state = TokenizerState::EndTagOpen;
            }
            c if cc::is_ascii_alpha(c) => {
                self.tag_name.clear();
                self.tag_name.push(cc::to_ascii_lower(c));
                self.tag_is_end = false;
                self.tag_self_closing = false;
                self.attributes.clear();
                self.bump();
                self.state = TokenizerState::TagName;
            }
            _ => {
                self.buffer.append('<');
                self.flush_text();
                self.state = TokenizerState::Data;
            }
        }
    }

    fn state_end_tag_open(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if cc::is_ascii_alpha(c) {
            self.tag_name.clear();
            self.tag_name.push(cc::to_ascii_lower(c));
            self.tag_is_end = true;
            self.bump();
            self.state = TokenizerState::TagName;
        } else {
            self.error(ErrorKind::UnexpectedCharacter);
            log::trace!("bogus-doctype recovery: malformed end tag at {:?}", self.reader.position());
            self.state = TokenizerState::BogusDoctype;
        }
    }

    fn state_tag_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_space(c) => {
                self.bump();
                self.state = TokenizerState::BeforeAttributeName;
            }
            '/' => {
                self.bump();
                self.state = TokenizerState::SelfClosingStartTag;
            }
            '>' => {
                self.bump();
                self.emit_tag();
            }
            c => {
                self.bump();
                self.tag_name.push(cc::to_ascii_lower(c));
            }
        }
    }

    fn state_before_attribute_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_space(c) => {
                self.bump();
            }
            '/' | '>' => {
                self.state = TokenizerState::AfterAttributeName;
            }
            _ => {
                self.attr_name.clear();
                self.attr_op = AssignOp::Set;
                self.attr_segments.clear();
                self.state = TokenizerState::AttributeName;
            }
        }
    }

    fn state_attribute_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_space(c) || c == '/' || c == '>' => {
                self.state = TokenizerState::AfterAttributeName;
            }
            '=' => {
                self.bump();
                self.attr_op = AssignOp::Set;
                self.state = TokenizerState::BeforeAttributeValue;
            }
            c if cc::is_attribute_value_operator(c) => {
                self.bump();
                self.state = TokenizerState::SpecialAttributeOperatorInAttributeName;
                self.reconsume(c);
            }
            c => {
                self.bump();
                self.attr_name.push(c);
            }
        }
    }

    fn state_special_operator_in_attr_name(&mut self) {
        let (lead, _) = self.bump();
        match self.reader.peek() {
            Peek::Char('=') => {
                self.bump();
                self.attr_op = AssignOp::from_lead_char(lead).unwrap_or(AssignOp::Set);
                self.state = TokenizerState::BeforeAttributeValue;
            }
            _ => {
                // Not actually a compound operator; the lead character is
                // part of the attribute name after all.
                self.attr_name.push(lead);
                self.state = TokenizerState::AttributeName;
            }
        }
    }

    fn state_after_attribute_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_space(c) => {
                self.bump();
            }
            '=' => {
                self.bump();
                self.attr_op = AssignOp::Set;
                self.state = TokenizerState::BeforeAttributeValue;
            }
            c if cc::is_attribute_value_operator(c) => {
                self.state = TokenizerState::SpecialAttributeOperatorAfterAttributeName;
            }
            '/' => {
                self.bump();
                self.commit_attribute(AttrValue::literal(""));
                self.state = TokenizerState::SelfClosingStartTag;
            }
            '>' => {
                self.commit_attribute(AttrValue::literal(""));
                self.bump();
                self.emit_tag();
            }
            _ => {
                self.commit_attribute(AttrValue::literal(""));
                self.state = TokenizerState::BeforeAttributeName;
            }
        }
    }

    fn state_special_operator_after_attr_name(&mut self) {
        let (lead, _) = self.bump();
        match self.reader.peek() {
            Peek::Char('=') => {
                self.bump();
                self.attr_op = AssignOp::from_lead_char(lead).unwrap_or(AssignOp::Set);
                self.state = TokenizerState::BeforeAttributeValue;
            }
            _ => {
                self.commit_attribute(AttrValue::literal(""));
                self.state = TokenizerState::BeforeAttributeName;
            }
        }
    }

    fn state_before_attribute_value(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_space(c) => {
                self.bump();
            }
            '"' => {
                self.bump();
                self.attr_quote = Some('"');
                self.attr_segments.clear();
                self.buffer.reset();
                self.state = TokenizerState::JsoneeAttributeValueDoubleQuoted;
            }
            '\'' => {
                self.bump();
                self.attr_quote = Some('\'');
                self.attr_segments.clear();
                self.buffer.reset();
                self.state = TokenizerState::JsoneeAttributeValueSingleQuoted;
            }
            '$' => {
                self.attr_quote = None;
                self.attr_segments.clear();
                self.buffer.reset();
                self.ejson_return = TokenizerState::JsoneeAttributeValueUnquoted;
                self.bump();
                self.state = TokenizerState::EjsonJsoneeVariable;
            }
            _ => {
                self.attr_quote = None;
                self.attr_segments.clear();
                self.buffer.reset();
                self.state = TokenizerState::JsoneeAttributeValueUnquoted;
            }
        }
    }

    fn state_jsonee_attr_value_quoted(&mut self, double: bool) {
        let quote = if double { '"' } else { '\'' };
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == quote {
            self.bump();
            self.finish_attr_literal_segment();
            self.commit_attribute_from_segments();
            self.state = TokenizerState::BeforeAttributeName;
        } else if c == '$' {
            self.finish_attr_literal_segment();
            self.ejson_return = if double {
                TokenizerState::JsoneeAttributeValueDoubleQuoted
            } else {
                TokenizerState::JsoneeAttributeValueSingleQuoted
            };
            self.bump();
            self.state = TokenizerState::EjsonJsoneeVariable;
        } else {
            self.bump();
            self.buffer.append(c);
        }
    }

    fn state_jsonee_attr_value_unquoted(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if !cc::is_ascii_space(c) && c != '>' && !cc::is_separator(c) && c != '$' => {
                self.bump();
                self.buffer.append(c);
            }
            Peek::Char('$') => {
                self.finish_attr_literal_segment();
                self.ejson_return = TokenizerState::JsoneeAttributeValueUnquoted;
                self.bump();
                self.state = TokenizerState::EjsonJsoneeVariable;
            }
            _ => {
                self.finish_attr_literal_segment();
                self.commit_attribute_from_segments();
                self.state = TokenizerState::BeforeAttributeName;
            }
        }
    }

    fn finish_attr_literal_segment(&mut self) {
        if !self.buffer.is_empty() {
            let text = self.buffer.take();
            self.attr_segments.push(AttrValueSegment::Literal(text));
        }
    }

    fn commit_attribute_from_segments(&mut self) {
        let segments = std::mem::take(&mut self.attr_segments);
        self.commit_attribute(AttrValue { segments });
    }

    fn commit_attribute(&mut self, value: AttrValue<B::Value>) {
        if self.attr_name.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.attr_name);
        if self.attributes.iter().any(|a| a.name == name) {
            self.error(ErrorKind::DuplicateAttribute);
            return;
        }
        self.attributes.push(Attribute {
            name,
            operator: self.attr_op,
            value,
        });
    }

    fn state_self_closing_start_tag(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == '>' {
            self.tag_self_closing = true;
            self.bump();
            self.emit_tag();
        } else {
            self.error(ErrorKind::UnexpectedCharacter);
            self.state = TokenizerState::BeforeAttributeName;
        }
    }

    fn emit_tag(&mut self) {
        let name = std::mem::take(&mut self.tag_name);
        let attributes = std::mem::take(&mut self.attributes);
        let start = self.token_start;
        let end = self.reader.position();
        if self.tag_is_end {
            self.sink.on_token(Token::EndTag(EndTag { name, start, end }));
        } else {
            self.sink.on_token(Token::StartTag(StartTag {
                name,
                attributes,
                self_closing: self.tag_self_closing,
                start,
                end,
            }));
        }
        self.state = TokenizerState::Data;
    }

    // ---- Markup declarations, comments, doctype, CDATA --------------------

    fn state_markup_declaration_open(&mut self) {
        // Single-slot pushback means we detect "--" by consuming greedily
        // and un-winding one character on mismatch.
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == '-' {
            self.bump();
            match self.reader.peek() {
                Peek::Char('-') => {
                    self.bump();
                    self.comment_data.clear();
                    self.state = TokenizerState::CommentStart;
                }
                _ => {
                    self.reconsume('-');
                    log::trace!("bogus-comment recovery: '<!-' not followed by a second '-'");
                    self.state = TokenizerState::BogusComment;
                }
            }
        } else if c.eq_ignore_ascii_case('d') && self.match_ascii_ci("doctype") {
            self.state = TokenizerState::BeforeDoctypeName;
        } else if c == '[' && self.options.allow_cdata && self.match_ascii_ci("[CDATA[") {
            self.buffer.reset();
            self.state = TokenizerState::CdataSection;
        } else {
            log::trace!("bogus-comment recovery: unrecognized markup declaration");
            self.state = TokenizerState::BogusComment;
        }
    }

    /// Consumes `word` character-by-character (case-insensitively) if the
    /// upcoming input matches it exactly; otherwise consumes nothing
    /// conceptually (best-effort: since pushback is single-slot, a partial
    /// mismatch degrades to `BogusComment`/`BogusDoctype` recovery rather
    /// than a perfect multi-character unwind).
    fn match_ascii_ci(&mut self, word: &str) -> bool {
        for expected in word.chars() {
            match self.reader.peek() {
                Peek::Char(c) if c.eq_ignore_ascii_case(&expected) => {
                    self.bump();
                }
                _ => return false,
            }
        }
        true
    }

    fn state_bogus_comment(&mut self) {
        match self.reader.peek() {
            Peek::Char('>') => {
                self.bump();
                self.error(ErrorKind::BogusComment);
                self.emit_comment();
            }
            Peek::Char(c) => {
                self.bump();
                self.comment_data.push(c);
            }
            Peek::Eof => {
                self.error(ErrorKind::BogusComment);
                self.emit_comment();
            }
            Peek::Empty => {}
        }
    }

    fn state_comment_start(&mut self) {
        match self.reader.peek() {
            Peek::Char('-') => {
                self.bump();
                self.state = TokenizerState::CommentStartDash;
            }
            Peek::Char('>') => {
                self.bump();
                self.error(ErrorKind::AbruptClosingOfEmptyComment);
                self.emit_comment();
            }
            _ => self.state = TokenizerState::Comment,
        }
    }

    fn state_comment_start_dash(&mut self) {
        match self.reader.peek() {
            Peek::Char('-') => {
                self.bump();
                self.state = TokenizerState::CommentEnd;
            }
            Peek::Char('>') => {
                self.bump();
                self.error(ErrorKind::AbruptClosingOfEmptyComment);
                self.emit_comment();
            }
            _ => {
                self.comment_data.push('-');
                self.state = TokenizerState::Comment;
            }
        }
    }

    fn state_comment(&mut self) {
        match self.reader.peek() {
            Peek::Char('-') => {
                self.bump();
                self.state = TokenizerState::CommentEndDash;
            }
            Peek::Char('<') => {
                self.bump();
                self.comment_data.push('<');
                self.state = TokenizerState::CommentLessThanSign;
            }
            Peek::Char(c) => {
                self.bump();
                self.comment_data.push(c);
            }
            Peek::Eof => self.emit_comment(),
            Peek::Empty => {}
        }
    }

    fn state_comment_lt(&mut self, depth: u8) {
        let next_state = match depth {
            0 => TokenizerState::CommentLessThanSignBang,
            1 => TokenizerState::CommentLessThanSignBangDash,
            _ => TokenizerState::CommentLessThanSignBangDashDash,
        };
        match self.reader.peek() {
            Peek::Char('!') if depth == 0 => {
                self.bump();
                self.comment_data.push('!');
                self.state = next_state;
            }
            Peek::Char('-') if depth > 0 => {
                self.bump();
                self.comment_data.push('-');
                self.state = if depth == 1 {
                    TokenizerState::CommentLessThanSignBangDashDash
                } else {
                    TokenizerState::CommentEnd
                };
            }
            _ => self.state = TokenizerState::Comment,
        }
    }

    fn state_comment_end_dash(&mut self) {
        match self.reader.peek() {
            Peek::Char('-') => {
                self.bump();
                self.state = TokenizerState::CommentEnd;
            }
            Peek::Eof => self.emit_comment(),
            _ => {
                self.comment_data.push('-');
                self.state = TokenizerState::Comment;
            }
        }
    }

    fn state_comment_end(&mut self) {
        match self.reader.peek() {
            Peek::Char('>') => {
                self.bump();
                self.emit_comment();
            }
            Peek::Char('!') => {
                self.bump();
                self.state = TokenizerState::CommentEndBang;
            }
            Peek::Char('-') => {
                self.bump();
                self.comment_data.push('-');
            }
            Peek::Eof => self.emit_comment(),
            _ => self.state = TokenizerState::Comment,
        }
    }

    fn state_comment_end_bang(&mut self) {
        match self.reader.peek() {
            Peek::Char('-') => {
                self.bump();
                self.comment_data.push_str("--!");
                self.state = TokenizerState::CommentEndDash;
            }
            Peek::Char('>') => {
                self.bump();
                self.error(ErrorKind::BogusComment);
                self.emit_comment();
            }
            Peek::Eof => self.emit_comment(),
            _ => {
                self.comment_data.push_str("--!");
                self.state = TokenizerState::Comment;
            }
        }
    }

    fn emit_comment(&mut self) {
        let data = std::mem::take(&mut self.comment_data);
        let start = self.token_start;
        let end = self.reader.position();
        self.sink.on_token(Token::Comment(Comment { data, start, end }));
        self.state = TokenizerState::Data;
    }

    fn state_before_doctype_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if cc::is_ascii_space(c) {
            self.bump();
        } else {
            self.doctype = Doctype::default();
            self.state = TokenizerState::DoctypeName;
        }
    }

    fn state_doctype_name(&mut self) {
        match self.reader.peek() {
            Peek::Char('>') => {
                self.bump();
                self.emit_doctype();
            }
            Peek::Char(c) if cc::is_ascii_space(c) => {
                self.bump();
                self.state = TokenizerState::AfterDoctypeName;
            }
            Peek::Char(c) => {
                self.bump();
                self.doctype.name.get_or_insert_with(String::new).push(cc::to_ascii_lower(c));
            }
            Peek::Eof => self.emit_doctype(),
            Peek::Empty => {}
        }
    }

    /// Covers `AFTER_DOCTYPE_NAME` through the PUBLIC/SYSTEM id family and
    /// `BOGUS_DOCTYPE`: HVML documents rarely carry these, so recovery here
    /// is simplified to "skip to `>`" rather than the full HTML5 state
    /// fan-out (see `DESIGN.md`).
    fn state_doctype_tail(&mut self) {
        match self.reader.peek() {
            Peek::Char('>') => {
                self.bump();
                self.emit_doctype();
            }
            Peek::Char(_) => {
                self.bump();
            }
            Peek::Eof => self.emit_doctype(),
            Peek::Empty => {}
        }
    }

    fn emit_doctype(&mut self) {
        let doctype = std::mem::replace(&mut self.doctype, Doctype::default());
        let start = self.token_start;
        let end = self.reader.position();
        self.sink.on_token(Token::Doctype(Doctype {
            start,
            end,
            ..doctype
        }));
        self.state = TokenizerState::Data;
    }

    fn state_cdata_section(&mut self) {
        match self.reader.peek() {
            Peek::Char(']') => {
                self.bump();
                self.state = TokenizerState::CdataSectionBracket;
            }
            Peek::Char(c) => {
                self.bump();
                self.buffer.append(c);
            }
            Peek::Eof => self.finish_cdata(),
            Peek::Empty => {}
        }
    }

    fn state_cdata_bracket(&mut self) {
        match self.reader.peek() {
            Peek::Char(']') => {
                self.bump();
                self.state = TokenizerState::CdataSectionEnd;
            }
            _ => {
                self.buffer.append(']');
                self.state = TokenizerState::CdataSection;
            }
        }
    }

    fn state_cdata_end(&mut self) {
        match self.reader.peek() {
            Peek::Char('>') => {
                self.bump();
                self.finish_cdata();
            }
            Peek::Char(']') => {
                self.bump();
                self.buffer.append(']');
            }
            _ => {
                self.buffer.append_str("]]");
                self.state = TokenizerState::CdataSection;
            }
        }
    }

    fn finish_cdata(&mut self) {
        let text = self.buffer.take();
        let start = self.token_start;
        let end = self.reader.position();
        self.sink
            .on_token(Token::Character(crate::token::Character { text, start, end }));
        self.state = TokenizerState::Data;
    }

    // ---- Character references ---------------------------------------------

    fn state_character_reference(&mut self) {
        self.char_ref_buffer.reset();
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha_numeric(c) => {
                self.state = TokenizerState::NamedCharacterReference;
            }
            Peek::Char('#') => {
                self.bump();
                self.state = TokenizerState::NumericCharacterReference;
            }
            _ => {
                self.append_literal_ampersand();
                self.state = self.return_state;
            }
        }
    }

    fn append_literal_ampersand(&mut self) {
        match self.return_state {
            TokenizerState::JsoneeAttributeValueDoubleQuoted
            | TokenizerState::JsoneeAttributeValueSingleQuoted
            | TokenizerState::JsoneeAttributeValueUnquoted => self.buffer.append('&'),
            _ => {
                self.start_text();
                self.buffer.append('&');
            }
        }
    }

    fn append_ref_output(&mut self, s: &str) {
        for c in s.chars() {
            match self.return_state {
                TokenizerState::JsoneeAttributeValueDoubleQuoted
                | TokenizerState::JsoneeAttributeValueSingleQuoted
                | TokenizerState::JsoneeAttributeValueUnquoted => self.buffer.append(c),
                _ => {
                    self.start_text();
                    self.buffer.append(c);
                }
            }
        }
    }

    fn state_named_character_reference(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha_numeric(c) => {
                self.bump();
                self.char_ref_buffer.append(c);
            }
            Peek::Char(';') => {
                self.bump();
                self.char_ref_buffer.append(';');
                self.finish_named_reference();
            }
            _ => self.finish_named_reference(),
        }
    }

    /// Resolves the collected candidate name, which may or may not include
    /// its terminating `;`, against the longest matching table entry.
    fn finish_named_reference(&mut self) {
        let candidate = self.char_ref_buffer.take();
        match longest_named_prefix(&candidate) {
            Some((matched, value)) => {
                if !matched.ends_with(';') {
                    self.error(ErrorKind::MissingSemicolonAfterCharacterReference);
                }
                let leftover = candidate[matched.len()..].to_string();
                self.append_ref_output(value);
                self.append_ref_output(&leftover);
            }
            None => {
                self.error(ErrorKind::UnknownNamedCharacterReference);
                log::trace!("unknown named character reference {candidate:?}, left literal");
                self.append_literal_ampersand();
                self.append_ref_output(&candidate);
            }
        }
        self.state = self.return_state;
    }

    fn state_numeric_character_reference(&mut self) {
        self.char_ref_code = 0;
        self.char_ref_digits = 0;
        match self.reader.peek() {
            Peek::Char('x') | Peek::Char('X') => {
                self.bump();
                self.state = TokenizerState::HexadecimalCharacterReferenceStart;
            }
            _ => self.state = TokenizerState::DecimalCharacterReferenceStart,
        }
    }

    fn state_hex_ref_start(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_hex_digit(c) => self.state = TokenizerState::HexadecimalCharacterReference,
            _ => {
                self.error(ErrorKind::UnexpectedCharacter);
                self.append_literal_ampersand();
                self.append_ref_output("#");
                self.state = self.return_state;
            }
        }
    }

    fn state_decimal_ref_start(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_digit(c) => self.state = TokenizerState::DecimalCharacterReference,
            _ => {
                self.error(ErrorKind::UnexpectedCharacter);
                self.append_literal_ampersand();
                self.append_ref_output("#");
                self.state = self.return_state;
            }
        }
    }

    fn state_hex_ref(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_hex_digit(c) && self.char_ref_digits < MAX_HEX_DIGITS => {
                self.bump();
                self.char_ref_code = self.char_ref_code * 16 + hex_digit_value(c).unwrap_or(0);
                self.char_ref_digits += 1;
            }
            Peek::Char(';') => {
                self.bump();
                self.state = TokenizerState::NumericCharacterReferenceEnd;
            }
            _ => self.state = TokenizerState::NumericCharacterReferenceEnd,
        }
    }

    fn state_decimal_ref(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_digit(c) && self.char_ref_digits < MAX_DECIMAL_DIGITS => {
                self.bump();
                self.char_ref_code = self.char_ref_code * 10 + decimal_digit_value(c).unwrap_or(0);
                self.char_ref_digits += 1;
            }
            Peek::Char(';') => {
                self.bump();
                self.state = TokenizerState::NumericCharacterReferenceEnd;
            }
            _ => self.state = TokenizerState::NumericCharacterReferenceEnd,
        }
    }

    fn state_numeric_ref_end(&mut self) {
        let (c, err) = numeric_ref_to_char(self.char_ref_code);
        if let Some(err) = err {
            log::trace!("numeric character reference #{} replaced with {c:?}: {err}", self.char_ref_code);
            self.error(err);
        }
        self.append_ref_output(&c.to_string());
        self.state = self.return_state;
    }

    // ---- Text content (markup character data outside tags) ---------------

    fn state_text_content(&mut self) {
        // Used by embedders for raw-text regions that still recognize
        // character references but not markup; behaves like `DATA` minus
        // `<` dispatch.
        match self.reader.peek() {
            Peek::Char('&') => {
                self.bump();
                self.return_state = TokenizerState::TextContent;
                self.state = TokenizerState::CharacterReference;
            }
            Peek::Char(c) => {
                self.start_text();
                self.bump();
                self.buffer.append(c);
            }
            Peek::Eof => self.flush_text(),
            Peek::Empty => {}
        }
    }

    // ---- Template raw text -------------------------------------------------

    fn state_template_data(&mut self) {
        match self.reader.peek() {
            Peek::Char('<') => {
                self.bump();
                self.state = TokenizerState::TemplateDataLessThanSign;
            }
            Peek::Char(c) => {
                self.start_text();
                self.bump();
                self.buffer.append(c);
            }
            Peek::Eof => {
                self.flush_text();
                self.state = TokenizerState::TemplateFinished;
            }
            Peek::Empty => {}
        }
    }

    fn state_template_data_lt(&mut self) {
        match self.reader.peek() {
            Peek::Char('/') => {
                self.bump();
                self.buffer.reset();
                self.state = TokenizerState::TemplateDataEndTagOpen;
            }
            _ => {
                self.buffer.append('<');
                self.state = TokenizerState::TemplateData;
            }
        }
    }

    fn state_template_data_end_tag_open(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha(c) => self.state = TokenizerState::TemplateDataEndTagName,
            _ => {
                self.buffer.append_str("</");
                self.state = TokenizerState::TemplateData;
            }
        }
    }

    fn state_template_data_end_tag_name(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha(c) => {
                self.bump();
                self.buffer.append(cc::to_ascii_lower(c));
            }
            Peek::Char('>') if self.buffer.equals(&self.template_tag_name) => {
                self.flush_text();
                self.bump();
                self.state = TokenizerState::TemplateFinished;
            }
            _ => {
                let collected = self.buffer.as_str().to_string();
                self.buffer.append_str("</");
                self.buffer.append_str(&collected);
                self.state = TokenizerState::TemplateData;
            }
        }
    }

    // ---- eJSON core ---------------------------------------------------------

    fn state_ejson_data(&mut self) {
        let Peek::Char(c) = self.reader.peek() else {
            return;
        };
        match c {
            c if cc::is_whitespace(c) => {
                self.bump();
            }
            '{' => {
                self.bump();
                self.ejson.push(FrameKind::Object);
                self.state = TokenizerState::EjsonBeforeName;
            }
            '[' => {
                self.bump();
                self.ejson.push(FrameKind::Array);
                self.state = TokenizerState::EjsonData;
            }
            ']' if matches!(self.ejson.top(), Some(f) if f.kind == FrameKind::Array) => {
                self.bump();
                self.close_array();
            }
            '(' => {
                self.bump();
                self.ejson.push(FrameKind::Paren);
                self.state = TokenizerState::EjsonData;
            }
            ')' if matches!(self.ejson.top(), Some(f) if f.kind == FrameKind::Paren) => {
                self.bump();
                self.close_paren();
            }
            '"' => {
                self.bump();
                self.buffer.reset();
                self.state = TokenizerState::EjsonValueDoubleQuoted;
            }
            '\'' => {
                self.bump();
                self.buffer.reset();
                self.state = TokenizerState::EjsonValueSingleQuoted;
            }
            '$' => {
                self.bump();
                self.state = TokenizerState::EjsonJsoneeVariable;
            }
            '-' => {
                self.bump();
                self.number_negative = true;
                self.number_flags = NumberFlags {
                    has_sign: true,
                    ..Default::default()
                };
                self.buffer.reset();
                self.buffer.append('-');
                self.state = TokenizerState::EjsonValueNumberInteger;
            }
            c if cc::is_ascii_digit(c) => {
                self.number_negative = false;
                self.number_flags = NumberFlags::default();
                self.buffer.reset();
                self.state = TokenizerState::EjsonValueNumberInteger;
            }
            c if cc::is_ascii_alpha(c) => {
                self.buffer.reset();
                self.state = TokenizerState::EjsonKeyword;
            }
            _ => {
                self.bump();
                self.error(ErrorKind::BadJson);
            }
        }
    }

    fn state_ejson_before_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_whitespace(c) => {
                self.bump();
            }
            '}' => {
                self.bump();
                self.close_object();
            }
            '"' => {
                self.bump();
                self.buffer.reset();
                self.state = TokenizerState::EjsonNameDoubleQuoted;
            }
            '\'' => {
                self.bump();
                self.buffer.reset();
                self.state = TokenizerState::EjsonNameSingleQuoted;
            }
            _ => {
                self.buffer.reset();
                self.state = TokenizerState::EjsonNameUnquoted;
            }
        }
    }

    fn state_ejson_name_unquoted(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if !cc::is_whitespace(c) && c != ':' && !cc::is_separator(c) => {
                self.bump();
                self.buffer.append(c);
            }
            _ => self.finish_name(),
        }
    }

    fn state_ejson_name_quoted(&mut self, double: bool) {
        let quote = if double { '"' } else { '\'' };
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == quote {
            self.bump();
            self.finish_name();
        } else {
            self.bump();
            self.buffer.append(c);
        }
    }

    fn finish_name(&mut self) {
        let key = self.buffer.take();
        if let Some(frame) = self.ejson.top_mut() {
            if frame.pending_key.is_some() {
                self.error(ErrorKind::UnexpectedKeyName);
            }
            frame.pending_key = Some(key);
        }
        self.state = TokenizerState::EjsonAfterName;
    }

    fn state_ejson_after_name(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if cc::is_whitespace(c) {
            self.bump();
        } else if c == ':' {
            self.bump();
            self.state = TokenizerState::EjsonData;
        } else {
            self.error(ErrorKind::UnexpectedCharacter);
            self.state = TokenizerState::EjsonData;
        }
    }

    fn state_ejson_after_value(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if cc::is_whitespace(c) {
            self.bump();
            return;
        }
        let Some(kind) = self.ejson.top().map(|f| f.kind) else {
            self.state = TokenizerState::EjsonFinished;
            return;
        };
        match (kind, c) {
            (FrameKind::Object, ',') => {
                self.bump();
                self.state = TokenizerState::EjsonBeforeName;
            }
            (FrameKind::Object, '}') => {
                self.bump();
                self.close_object();
            }
            (FrameKind::Array, ',') => {
                self.bump();
                self.state = TokenizerState::EjsonData;
            }
            (FrameKind::Array, ']') => {
                self.bump();
                self.close_array();
            }
            (FrameKind::Paren, ',') => {
                self.bump();
                self.set_paren_separator(ParenSeparator::Comma);
                self.state = TokenizerState::EjsonData;
            }
            (FrameKind::Paren, ';') => {
                self.bump();
                self.set_paren_separator(ParenSeparator::Semicolon);
                self.state = TokenizerState::EjsonData;
            }
            (FrameKind::Paren, ')') => {
                self.bump();
                self.close_paren();
            }
            (FrameKind::Array, '}') | (FrameKind::Object, ']') | (FrameKind::Object, ')') | (FrameKind::Array, ')') => {
                self.bump();
                self.error(ErrorKind::UnexpectedRightBrace);
            }
            _ => {
                self.bump();
                self.error(ErrorKind::UnexpectedComma);
            }
        }
    }

    /// Records the separator a `Paren` frame has settled on, reporting
    /// [`ErrorKind::MixedCjsoneeSeparators`] if a later separator
    /// contradicts the first one seen (spec §4.5).
    fn set_paren_separator(&mut self, sep: ParenSeparator) {
        let Some(frame) = self.ejson.top_mut() else { return };
        match frame.paren_separator {
            None => {
                log::trace!("cjsonee group settles on {sep:?} separator");
                frame.paren_separator = Some(sep);
            }
            Some(existing) if existing != sep => {
                log::trace!("cjsonee group already settled on {existing:?}, rejecting {sep:?}");
                self.error(ErrorKind::MixedCjsoneeSeparators);
            }
            Some(_) => {}
        }
    }

    fn close_object(&mut self) {
        if let Some(frame) = self.ejson.pop() {
            let value = self.builder.object(frame.entries);
            self.deliver_value(value);
        }
    }

    fn close_array(&mut self) {
        if let Some(frame) = self.ejson.pop() {
            let value = self.builder.array(frame.items);
            self.deliver_value(value);
        }
    }

    /// Closes a `(` group: a comma-separated group finalizes as an array,
    /// a semicolon-separated (or single-element/empty) group as a CJSONEE
    /// group (spec §4.5).
    fn close_paren(&mut self) {
        if let Some(frame) = self.ejson.pop() {
            let value = match frame.paren_separator {
                Some(ParenSeparator::Comma) => self.builder.array(frame.items),
                Some(ParenSeparator::Semicolon) | None => self.builder.group(frame.items),
            };
            self.deliver_value(value);
        }
    }

    /// Routes a completed eJSON-family value to wherever it belongs: an
    /// attribute's segment list, the enclosing frame, or (if the stack is
    /// empty) straight out as a `VCM_TREE` token.
    fn deliver_value(&mut self, value: B::Value) {
        match self.ejson_return {
            TokenizerState::JsoneeAttributeValueDoubleQuoted
            | TokenizerState::JsoneeAttributeValueSingleQuoted
            | TokenizerState::JsoneeAttributeValueUnquoted => {
                self.attr_segments.push(AttrValueSegment::Expression(value));
                self.state = self.ejson_return;
            }
            _ => {
                if let Some(frame) = self.ejson.top_mut() {
                    if frame.kind == FrameKind::Object {
                        let key = frame.pending_key.take().unwrap_or_default();
                        frame.entries.push((key, value));
                    } else {
                        frame.items.push(value);
                    }
                    self.state = TokenizerState::EjsonAfterValue;
                } else {
                    let start = self.token_start;
                    let end = self.reader.position();
                    self.sink.on_token(Token::VcmTree(VcmTree { root: value, start, end }));
                    self.state = TokenizerState::EjsonFinished;
                }
            }
        }
    }

    // ---- eJSON strings ------------------------------------------------------

    fn state_ejson_value_quoted(&mut self, double: bool) {
        let quote = if double { '"' } else { '\'' };
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == quote {
            self.bump();
            if double && self.buffer.is_empty() {
                // Might be opening a triple-quoted string: "" immediately
                // followed by a third quote.
                self.state = TokenizerState::EjsonValueTwoDoubleQuoted;
                return;
            }
            self.finish_string();
        } else if c == '\\' {
            self.bump();
            self.return_state = self.state;
            self.state = TokenizerState::EjsonStringEscape;
        } else {
            self.bump();
            self.buffer.append(c);
        }
    }

    fn state_ejson_value_two_double_quoted(&mut self) {
        match self.reader.peek() {
            Peek::Char('"') => {
                self.bump();
                self.state = TokenizerState::EjsonValueThreeDoubleQuoted;
            }
            _ => self.finish_string(),
        }
    }

    fn state_ejson_value_three_double_quoted(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if c == '"' {
            self.bump();
            if self.buffer.ends_with("\"\"") {
                let len = self.buffer.byte_size();
                let text = self.buffer.as_str()[..len - 2].to_string();
                self.buffer.reset();
                self.buffer.append_str(&text);
                self.finish_string();
            } else {
                self.buffer.append('"');
            }
        } else {
            self.bump();
            self.buffer.append(c);
        }
    }

    fn finish_string(&mut self) {
        let text = self.buffer.take();
        let value = self.builder.string(text);
        self.deliver_value(value);
    }

    fn state_ejson_string_escape(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            '"' | '\'' | '\\' | '/' => {
                self.bump();
                self.buffer.append(c);
                self.state = self.return_state;
            }
            'b' => {
                self.bump();
                self.buffer.append('\u{8}');
                self.state = self.return_state;
            }
            'f' => {
                self.bump();
                self.buffer.append('\u{C}');
                self.state = self.return_state;
            }
            'n' => {
                self.bump();
                self.buffer.append('\n');
                self.state = self.return_state;
            }
            'r' => {
                self.bump();
                self.buffer.append('\r');
                self.state = self.return_state;
            }
            't' => {
                self.bump();
                self.buffer.append('\t');
                self.state = self.return_state;
            }
            'u' | 'U' if c == 'u' || self.options.allow_uppercase_unicode_escape => {
                self.bump();
                self.char_ref_code = 0;
                self.char_ref_digits = 0;
                self.state = TokenizerState::EjsonStringEscapeFourHexadecimalDigits;
            }
            _ => {
                self.bump();
                self.error(ErrorKind::BadStringEscape);
                self.buffer.append(c);
                self.state = self.return_state;
            }
        }
    }

    fn state_ejson_string_escape_hex4(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_hex_digit(c) && self.char_ref_digits < 4 => {
                self.bump();
                self.char_ref_code = self.char_ref_code * 16 + hex_digit_value(c).unwrap_or(0);
                self.char_ref_digits += 1;
                if self.char_ref_digits == 4 {
                    let (decoded, err) = numeric_ref_to_char(self.char_ref_code);
                    if let Some(err) = err {
                        self.error(err);
                    }
                    self.buffer.append(decoded);
                    self.state = self.return_state;
                }
            }
            _ => {
                self.error(ErrorKind::BadStringEscape);
                self.state = self.return_state;
            }
        }
    }

    // ---- eJSON keywords & byte sequences ------------------------------------

    fn state_ejson_keyword(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha_numeric(c) => {
                self.bump();
                self.buffer.append(c);
                let word = self.buffer.as_str();
                if self.byte_sequence_prefix_matches(word, "bx") {
                    self.buffer.reset();
                    self.state = TokenizerState::EjsonHexByteSequence;
                } else if self.byte_sequence_prefix_matches(word, "bb") {
                    self.buffer.reset();
                    self.state = TokenizerState::EjsonBinaryByteSequence;
                } else if self.byte_sequence_prefix_matches(word, "b64") {
                    self.buffer.reset();
                    self.state = TokenizerState::EjsonBase64ByteSequence;
                }
            }
            _ => self.finish_keyword(),
        }
    }

    /// A byte-sequence introducer matches its lowercase spelling always;
    /// any other case (including fully uppercase) only matches when
    /// [`TokenizerOptions::allow_uppercase_byte_sequence_prefix`] is set.
    fn byte_sequence_prefix_matches(&self, word: &str, lower: &str) -> bool {
        word == lower || (self.options.allow_uppercase_byte_sequence_prefix && word.eq_ignore_ascii_case(lower))
    }

    fn finish_keyword(&mut self) {
        let word = self.buffer.take();
        if word.is_empty() {
            return;
        }
        let lower = word.to_ascii_lowercase();
        let (lower, negative) = if let Some(stripped) = lower.strip_prefix('-') {
            (stripped.to_string(), true)
        } else {
            (lower, false)
        };
        match lower.as_str() {
            "true" => {
                let v = self.builder.boolean(true);
                self.deliver_value(v);
            }
            "false" => {
                let v = self.builder.boolean(false);
                self.deliver_value(v);
            }
            "null" => {
                let v = self.builder.null();
                self.deliver_value(v);
            }
            "undefined" => {
                let v = self.builder.undefined();
                self.deliver_value(v);
            }
            "infinity" => {
                let n = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
                let v = self.builder.number(Number::Float(n));
                self.deliver_value(v);
            }
            "nan" => {
                let v = self.builder.number(Number::Float(f64::NAN));
                self.deliver_value(v);
            }
            _ => {
                self.error(ErrorKind::UnexpectedKeyword);
                self.state = TokenizerState::EjsonData;
            }
        }
    }

    fn state_ejson_hex_bytes(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_hex_digit(c) => {
                self.bump();
                self.buffer.append(c);
            }
            _ => self.finish_hex_bytes(),
        }
    }

    fn finish_hex_bytes(&mut self) {
        let digits = self.buffer.take();
        let mut bytes = Vec::with_capacity(digits.len() / 2);
        let mut chars = digits.chars();
        let mut ok = true;
        while let Some(hi) = chars.next() {
            let Some(lo) = chars.next() else {
                ok = false;
                break;
            };
            match (hex_digit_value(hi), hex_digit_value(lo)) {
                (Some(h), Some(l)) => bytes.push(((h << 4) | l) as u8),
                _ => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            let v = self.builder.byte_sequence(bytes);
            self.deliver_value(v);
        } else {
            self.error(ErrorKind::BadJson);
            self.state = TokenizerState::EjsonData;
        }
    }

    fn state_ejson_binary_bytes(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_binary_digit(c) => {
                self.bump();
                self.buffer.append(c);
            }
            _ => self.finish_binary_bytes(),
        }
    }

    fn finish_binary_bytes(&mut self) {
        let digits = self.buffer.take();
        let mut bytes = Vec::with_capacity(digits.len().div_ceil(8));
        let mut acc: u8 = 0;
        let mut bits = 0u8;
        for c in digits.chars() {
            acc = (acc << 1) | u8::from(c == '1');
            bits += 1;
            if bits == 8 {
                bytes.push(acc);
                acc = 0;
                bits = 0;
            }
        }
        if bits > 0 {
            bytes.push(acc << (8 - bits));
        }
        let v = self.builder.byte_sequence(bytes);
        self.deliver_value(v);
    }

    fn state_ejson_base64_bytes(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=' => {
                self.bump();
                self.buffer.append(c);
            }
            _ => self.finish_base64_bytes(),
        }
    }

    fn finish_base64_bytes(&mut self) {
        let text = self.buffer.take();
        match decode_base64(&text) {
            Some(bytes) => {
                let v = self.builder.byte_sequence(bytes);
                self.deliver_value(v);
            }
            None => {
                self.error(ErrorKind::UnexpectedBase64);
                self.state = TokenizerState::EjsonData;
            }
        }
    }

    // ---- eJSON numbers -------------------------------------------------------

    fn state_ejson_number_integer(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_digit(c) => {
                self.bump();
                self.buffer.append(c);
            }
            '.' => {
                self.bump();
                self.buffer.append('.');
                self.number_flags.has_dot = true;
                self.state = TokenizerState::EjsonValueNumberFraction;
            }
            'e' | 'E' => {
                self.bump();
                self.buffer.append(c);
                self.number_flags.has_exponent = true;
                self.state = TokenizerState::EjsonValueNumberExponent;
            }
            'x' | 'X' if self.buffer.equals("0") => {
                self.bump();
                self.buffer.append(c);
                self.number_flags.hex_mode = true;
                self.state = TokenizerState::EjsonValueNumberHex;
            }
            'L' | 'l' => {
                self.bump();
                self.number_flags.suffix = NumberSuffix::Long;
                self.state = TokenizerState::EjsonValueNumberSuffixInteger;
            }
            'U' | 'u' => {
                self.bump();
                self.state = TokenizerState::EjsonValueNumberSuffixInteger;
                self.consume_ul_suffix();
            }
            'F' | 'f' => {
                self.bump();
                self.state = TokenizerState::EjsonValueNumberSuffixInteger;
                self.consume_fl_suffix();
            }
            _ => self.finish_number(),
        }
    }

    fn consume_ul_suffix(&mut self) {
        if let Peek::Char('L') | Peek::Char('l') = self.reader.peek() {
            self.bump();
        }
        self.number_flags.suffix = NumberSuffix::UnsignedLong;
    }

    fn consume_fl_suffix(&mut self) {
        if let Peek::Char('L') | Peek::Char('l') = self.reader.peek() {
            self.bump();
        }
        self.number_flags.suffix = NumberSuffix::FloatLong;
    }

    fn state_ejson_number_suffix(&mut self) {
        self.finish_number();
    }

    fn state_ejson_number_fraction(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_digit(c) => {
                self.bump();
                self.buffer.append(c);
            }
            'e' | 'E' => {
                self.bump();
                self.buffer.append(c);
                self.number_flags.has_exponent = true;
                self.state = TokenizerState::EjsonValueNumberExponent;
            }
            'F' | 'f' => {
                self.bump();
                self.state = TokenizerState::EjsonValueNumberSuffixInteger;
                self.consume_fl_suffix();
            }
            _ => self.finish_number(),
        }
    }

    fn state_ejson_number_exponent(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            '+' | '-' => {
                self.bump();
                self.buffer.append(c);
                self.state = TokenizerState::EjsonValueNumberExponentInteger;
            }
            c if cc::is_ascii_digit(c) => {
                self.state = TokenizerState::EjsonValueNumberExponentInteger;
            }
            _ => {
                self.error(ErrorKind::UnexpectedNumberExponent);
                self.finish_number();
            }
        }
    }

    fn state_ejson_number_exponent_integer(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        if cc::is_ascii_digit(c) {
            self.bump();
            self.buffer.append(c);
        } else {
            self.finish_number();
        }
    }

    fn state_ejson_number_hex(&mut self) {
        let Peek::Char(c) = self.reader.peek() else { return };
        match c {
            c if cc::is_ascii_hex_digit(c) => {
                self.bump();
                self.buffer.append(c);
            }
            'L' | 'l' | 'U' | 'u' => self.state = TokenizerState::EjsonValueNumberHexSuffix,
            _ => self.finish_number(),
        }
    }

    fn state_ejson_number_hex_suffix(&mut self) {
        match self.reader.peek() {
            Peek::Char('U') | Peek::Char('u') => {
                self.bump();
                self.consume_ul_suffix();
            }
            Peek::Char('L') | Peek::Char('l') => {
                self.bump();
                self.number_flags.suffix = NumberSuffix::Long;
            }
            _ => {}
        }
        self.finish_number();
    }

    fn finish_number(&mut self) {
        let text = self.buffer.take();
        match finalize_number(&text, self.number_flags) {
            Ok(n) => {
                let v = self.builder.number(n);
                self.deliver_value(v);
            }
            Err(kind) => {
                self.error(kind);
                self.state = TokenizerState::EjsonData;
            }
        }
        self.number_flags = NumberFlags::default();
    }

    // ---- JSONEE variable interpolation --------------------------------------

    fn state_jsonee_variable(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha_numeric(c) || c == '_' => {
                self.bump();
                self.buffer.append(c);
            }
            Peek::Char(c) if self.buffer.is_empty() && cc::is_context_variable(c) => {
                self.bump();
                self.buffer.append(c);
                self.finish_variable();
            }
            Peek::Char('.') => {
                self.bump();
                self.buffer.append('.');
                self.state = TokenizerState::EjsonJsoneeFullStopSign;
            }
            _ => self.finish_variable(),
        }
    }

    fn state_jsonee_full_stop_sign(&mut self) {
        match self.reader.peek() {
            Peek::Char(c) if cc::is_ascii_alpha(c) || c == '_' => {
                self.state = TokenizerState::EjsonJsoneeVariable;
            }
            _ => self.finish_variable(),
        }
    }

    fn finish_variable(&mut self) {
        let raw = self.buffer.take();
        let value = self.builder.variable(raw);
        self.deliver_value(value);
    }

    // ---- Single step dispatch ------------------------------------------------

    fn step(&mut self) {
        use TokenizerState::*;
        match self.state {
            Data => self.state_data(),
            TagOpen => self.state_tag_open(),
            EndTagOpen => self.state_end_tag_open(),
            TagContent | TagName => self.state_tag_name(),
            BeforeAttributeName => self.state_before_attribute_name(),
            AttributeName => self.state_attribute_name(),
            AfterAttributeName => self.state_after_attribute_name(),
            BeforeAttributeValue => self.state_before_attribute_value(),
            AfterAttributeValue => self.state = TokenizerState::BeforeAttributeName,
            SelfClosingStartTag => self.state_self_closing_start_tag(),
            SpecialAttributeOperatorInAttributeName => self.state_special_operator_in_attr_name(),
            SpecialAttributeOperatorAfterAttributeName => self.state_special_operator_after_attr_name(),

            MarkupDeclarationOpen => self.state_markup_declaration_open(),
            CommentStart => self.state_comment_start(),
            CommentStartDash => self.state_comment_start_dash(),
            Comment => self.state_comment(),
            CommentLessThanSign => self.state_comment_lt(0),
            CommentLessThanSignBang => self.state_comment_lt(1),
            CommentLessThanSignBangDash => self.state_comment_lt(2),
            CommentLessThanSignBangDashDash => self.state = TokenizerState::CommentEnd,
            CommentEndDash => self.state_comment_end_dash(),
            CommentEnd => self.state_comment_end(),
            CommentEndBang => self.state_comment_end_bang(),

            Doctype | BeforeDoctypeName => self.state_before_doctype_name(),
            DoctypeName => self.state_doctype_name(),
            AfterDoctypeName
            | AfterDoctypePublicKeyword
            | BeforeDoctypePublicId
            | DoctypePublicIdDoubleQuoted
            | DoctypePublicIdSingleQuoted
            | AfterDoctypePublicId
            | BetweenDoctypePublicIdAndSystemInfo
            | AfterDoctypeSystemKeyword
            | BeforeDoctypeSystem
            | DoctypeSystemDoubleQuoted
            | DoctypeSystemSingleQuoted
            | AfterDoctypeSystem
            | BogusDoctype => self.state_doctype_tail(),

            CdataSection => self.state_cdata_section(),
            CdataSectionBracket => self.state_cdata_bracket(),
            CdataSectionEnd => self.state_cdata_end(),

            CharacterReference => self.state_character_reference(),
            NamedCharacterReference | AmbiguousAmpersand => self.state_named_character_reference(),
            NumericCharacterReference => self.state_numeric_character_reference(),
            HexadecimalCharacterReferenceStart => self.state_hex_ref_start(),
            DecimalCharacterReferenceStart => self.state_decimal_ref_start(),
            HexadecimalCharacterReference => self.state_hex_ref(),
            DecimalCharacterReference => self.state_decimal_ref(),
            NumericCharacterReferenceEnd => self.state_numeric_ref_end(),

            TextContent | JsontextContent => self.state_text_content(),
            JsoneeAttributeValueDoubleQuoted => self.state_jsonee_attr_value_quoted(true),
            JsoneeAttributeValueSingleQuoted => self.state_jsonee_attr_value_quoted(false),
            JsoneeAttributeValueUnquoted => self.state_jsonee_attr_value_unquoted(),

            EjsonData | EjsonControl => self.state_ejson_data(),
            EjsonFinished => {}
            EjsonLeftBrace | EjsonLeftBracket | EjsonLeftParenthesis => self.state_ejson_data(),
            EjsonRightBrace => self.close_object(),
            EjsonRightBracket => self.close_array(),
            EjsonRightParenthesis => self.close_paren(),
            EjsonDollar => self.state = TokenizerState::EjsonJsoneeVariable,
            EjsonAfterValue => self.state_ejson_after_value(),
            EjsonBeforeName => self.state_ejson_before_name(),
            EjsonAfterName => self.state_ejson_after_name(),

            EjsonNameUnquoted => self.state_ejson_name_unquoted(),
            EjsonNameSingleQuoted => self.state_ejson_name_quoted(false),
            EjsonNameDoubleQuoted => self.state_ejson_name_quoted(true),
            EjsonValueSingleQuoted => self.state_ejson_value_quoted(false),
            EjsonValueDoubleQuoted => self.state_ejson_value_quoted(true),
            EjsonAfterValueDoubleQuoted => self.finish_string(),
            EjsonValueTwoDoubleQuoted => self.state_ejson_value_two_double_quoted(),
            EjsonValueThreeDoubleQuoted => self.state_ejson_value_three_double_quoted(),

            EjsonKeyword | EjsonAfterKeyword => self.state_ejson_keyword(),
            EjsonByteSequence | EjsonAfterByteSequence => self.state_ejson_hex_bytes(),
            EjsonHexByteSequence => self.state_ejson_hex_bytes(),
            EjsonBinaryByteSequence => self.state_ejson_binary_bytes(),
            EjsonBase64ByteSequence => self.state_ejson_base64_bytes(),

            EjsonValueNumber => self.state_ejson_number_integer(),
            EjsonAfterValueNumber => self.finish_number(),
            EjsonValueNumberInteger => self.state_ejson_number_integer(),
            EjsonValueNumberFraction => self.state_ejson_number_fraction(),
            EjsonValueNumberExponent => self.state_ejson_number_exponent(),
            EjsonValueNumberExponentInteger => self.state_ejson_number_exponent_integer(),
            EjsonValueNumberSuffixInteger => self.state_ejson_number_suffix(),
            EjsonValueNumberHex => self.state_ejson_number_hex(),
            EjsonValueNumberHexSuffix => self.state_ejson_number_hex_suffix(),
            EjsonAfterValueNumberHex => self.finish_number(),
            EjsonValueNumberInfinity | EjsonValueNan => self.finish_keyword(),

            EjsonStringEscape => self.state_ejson_string_escape(),
            EjsonStringEscapeFourHexadecimalDigits => self.state_ejson_string_escape_hex4(),

            EjsonJsoneeVariable => self.state_jsonee_variable(),
            EjsonJsoneeFullStopSign => self.state_jsonee_full_stop_sign(),
            EjsonJsoneeKeyword => self.state_ejson_keyword(),
            EjsonJsoneeString => self.state_ejson_value_quoted(true),
            EjsonAfterJsoneeString => self.finish_string(),

            EjsonTemplateData => self.state_template_data(),
            EjsonTemplateDataLessThanSign => self.state_template_data_lt(),
            EjsonTemplateDataEndTagOpen => self.state_template_data_end_tag_open(),
            EjsonTemplateDataEndTagName => self.state_template_data_end_tag_name(),
            EjsonTemplateFinished => {}

            // CJSONEE composite operators: reachable only inside a group;
            // treated as single structural characters since the base
            // grammar (spec §4.5) never spells out `&&`/`||` semantics.
            EjsonAmpersand | EjsonOrSign | EjsonSemicolon => {
                self.bump();
                self.state = TokenizerState::EjsonAfterValue;
            }
            EjsonCjsoneeFinished => {}
        }
    }
}

fn decode_base64(text: &str) -> Option<Vec<u8>> {
    fn val(c: u8) -> Option<u8> {
        match c {
            b'A'..=b'Z' => Some(c - b'A'),
            b'a'..=b'z' => Some(c - b'a' + 26),
            b'0'..=b'9' => Some(c - b'0' + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }
    let clean = text.trim_end_matches('=');
    let mut bytes = Vec::with_capacity(clean.len() * 3 / 4 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for c in clean.bytes() {
        let v = val(c)?;
        acc = (acc << 6) | u32::from(v);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            bytes.push((acc >> bits) as u8);
        }
    }
    Some(bytes)
}

//! Configuration options for the tokenizer.
//!
//! Shaped after the teacher crate's `ParserOptions` (`parser/options.rs`):
//! a plain `Copy` struct of independent knobs, each documented with its
//! default.

/// Configuration for [`crate::tokenizer::Tokenizer`].
///
/// # Default
///
/// All boolean knobs default to the value documented on each field.
#[derive(Debug, Clone)]
pub struct TokenizerOptions {
    /// Declared character set of the input, e.g. `"utf-8"`.
    ///
    /// This is recorded for the embedder (e.g. to echo back a document's
    /// declared encoding) and otherwise has no effect: only UTF-8 is
    /// decoded, regardless of this field's value. Invalid UTF-8 in the fed
    /// bytes always surfaces [`crate::error::ErrorKind::BadEncoding`]
    /// through the sink; setting this field to anything other than
    /// `"utf-8"` does not change that.
    ///
    /// # Default
    ///
    /// `"utf-8"`
    pub declared_charset: String,

    /// Whether `<![CDATA[` opens a real CDATA section.
    ///
    /// Per spec §4.4: CDATA is only recognized inside `<script>`/`<style>`
    /// content or a foreign-content island; elsewhere `<![CDATA[` is a bogus
    /// comment. Callers (the tree builder) flip this when they push/pop a
    /// foreign-content or raw-text element.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_cdata: bool,

    /// Accept uppercase byte-sequence prefixes (`BX`, `BB`, `B64`) in
    /// addition to the lowercase forms the base grammar documents.
    ///
    /// Supplemented from `original_source`; see `SPEC_FULL.md` §4.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_uppercase_byte_sequence_prefix: bool,

    /// Accept `\U` (uppercase) in addition to `\u` as the Unicode escape
    /// introducer inside eJSON strings.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_uppercase_unicode_escape: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            declared_charset: "utf-8".to_string(),
            allow_cdata: false,
            allow_uppercase_byte_sequence_prefix: true,
            allow_uppercase_unicode_escape: false,
        }
    }
}

//! The tokenizer state roster (spec §4.4).
//!
//! A direct, idiomatic-Rust transcription of `enum tokenizer_state` in
//! `examples/original_source/Source/PurC/hvml/tokenizer.h`, the authoritative
//! state list this spec's grouped §4.4 roster summarizes. Variant order
//! matches the C enum; nothing is renamed beyond `TKZ_STATE_FOO` →
//! `TokenizerState::Foo`.

/// One of the tokenizer's states. Transitions are total: every
/// `(state, input-class)` pair has a defined successor in
/// [`crate::tokenizer::Tokenizer`]'s dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerState {
    Data,
    TagOpen,
    EndTagOpen,
    TagContent,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AfterAttributeValue,
    SelfClosingStartTag,
    MarkupDeclarationOpen,
    CommentStart,
    CommentStartDash,
    Comment,
    CommentLessThanSign,
    CommentLessThanSignBang,
    CommentLessThanSignBangDash,
    CommentLessThanSignBangDashDash,
    CommentEndDash,
    CommentEnd,
    CommentEndBang,
    Doctype,
    BeforeDoctypeName,
    DoctypeName,
    AfterDoctypeName,
    AfterDoctypePublicKeyword,
    BeforeDoctypePublicId,
    DoctypePublicIdDoubleQuoted,
    DoctypePublicIdSingleQuoted,
    AfterDoctypePublicId,
    BetweenDoctypePublicIdAndSystemInfo,
    AfterDoctypeSystemKeyword,
    BeforeDoctypeSystem,
    DoctypeSystemDoubleQuoted,
    DoctypeSystemSingleQuoted,
    AfterDoctypeSystem,
    BogusDoctype,
    CdataSection,
    CdataSectionBracket,
    CdataSectionEnd,
    CharacterReference,
    NamedCharacterReference,
    AmbiguousAmpersand,
    NumericCharacterReference,
    HexadecimalCharacterReferenceStart,
    DecimalCharacterReferenceStart,
    HexadecimalCharacterReference,
    DecimalCharacterReference,
    NumericCharacterReferenceEnd,
    SpecialAttributeOperatorInAttributeName,
    SpecialAttributeOperatorAfterAttributeName,
    TextContent,
    JsontextContent,
    JsoneeAttributeValueDoubleQuoted,
    JsoneeAttributeValueSingleQuoted,
    JsoneeAttributeValueUnquoted,
    EjsonData,
    EjsonFinished,
    EjsonControl,
    EjsonLeftBrace,
    EjsonRightBrace,
    EjsonLeftBracket,
    EjsonRightBracket,
    EjsonLeftParenthesis,
    EjsonRightParenthesis,
    EjsonDollar,
    EjsonAfterValue,
    EjsonBeforeName,
    EjsonAfterName,
    EjsonNameUnquoted,
    EjsonNameSingleQuoted,
    EjsonNameDoubleQuoted,
    EjsonValueSingleQuoted,
    EjsonValueDoubleQuoted,
    EjsonAfterValueDoubleQuoted,
    EjsonValueTwoDoubleQuoted,
    EjsonValueThreeDoubleQuoted,
    EjsonKeyword,
    EjsonAfterKeyword,
    /// Unreachable: `state_ejson_keyword` only transitions into the three
    /// concrete Hex/Binary/Base64 byte-sequence states below. Kept in the
    /// roster for parity with the C enum this was transcribed from.
    EjsonByteSequence,
    EjsonAfterByteSequence,
    EjsonHexByteSequence,
    EjsonBinaryByteSequence,
    EjsonBase64ByteSequence,
    EjsonValueNumber,
    EjsonAfterValueNumber,
    EjsonValueNumberInteger,
    EjsonValueNumberFraction,
    EjsonValueNumberExponent,
    EjsonValueNumberExponentInteger,
    EjsonValueNumberSuffixInteger,
    EjsonValueNumberHex,
    EjsonValueNumberHexSuffix,
    EjsonAfterValueNumberHex,
    EjsonValueNumberInfinity,
    EjsonValueNan,
    EjsonStringEscape,
    EjsonStringEscapeFourHexadecimalDigits,
    EjsonJsoneeVariable,
    EjsonJsoneeFullStopSign,
    EjsonJsoneeKeyword,
    EjsonJsoneeString,
    EjsonAfterJsoneeString,
    EjsonTemplateData,
    EjsonTemplateDataLessThanSign,
    EjsonTemplateDataEndTagOpen,
    EjsonTemplateDataEndTagName,
    EjsonTemplateFinished,
    EjsonAmpersand,
    EjsonOrSign,
    EjsonSemicolon,
    EjsonCjsoneeFinished,
}

impl TokenizerState {
    /// Whether this state belongs to the eJSON sub-machine (spec §3's "eJSON
    /// stack is non-empty while any `EJSON_*` state is active except
    /// `EJSON_FINISHED`" invariant references this family).
    pub(crate) fn is_ejson(self) -> bool {
        !matches!(
            self,
            Self::Data
                | Self::TagOpen
                | Self::EndTagOpen
                | Self::TagContent
                | Self::TagName
                | Self::BeforeAttributeName
                | Self::AttributeName
                | Self::AfterAttributeName
                | Self::BeforeAttributeValue
                | Self::AfterAttributeValue
                | Self::SelfClosingStartTag
                | Self::MarkupDeclarationOpen
                | Self::CommentStart
                | Self::CommentStartDash
                | Self::Comment
                | Self::CommentLessThanSign
                | Self::CommentLessThanSignBang
                | Self::CommentLessThanSignBangDash
                | Self::CommentLessThanSignBangDashDash
                | Self::CommentEndDash
                | Self::CommentEnd
                | Self::CommentEndBang
                | Self::Doctype
                | Self::BeforeDoctypeName
                | Self::DoctypeName
                | Self::AfterDoctypeName
                | Self::AfterDoctypePublicKeyword
                | Self::BeforeDoctypePublicId
                | Self::DoctypePublicIdDoubleQuoted
                | Self::DoctypePublicIdSingleQuoted
                | Self::AfterDoctypePublicId
                | Self::BetweenDoctypePublicIdAndSystemInfo
                | Self::AfterDoctypeSystemKeyword
                | Self::BeforeDoctypeSystem
                | Self::DoctypeSystemDoubleQuoted
                | Self::DoctypeSystemSingleQuoted
                | Self::AfterDoctypeSystem
                | Self::BogusDoctype
                | Self::CdataSection
                | Self::CdataSectionBracket
                | Self::CdataSectionEnd
                | Self::CharacterReference
                | Self::NamedCharacterReference
                | Self::AmbiguousAmpersand
                | Self::NumericCharacterReference
                | Self::HexadecimalCharacterReferenceStart
                | Self::DecimalCharacterReferenceStart
                | Self::HexadecimalCharacterReference
                | Self::DecimalCharacterReference
                | Self::NumericCharacterReferenceEnd
                | Self::SpecialAttributeOperatorInAttributeName
                | Self::SpecialAttributeOperatorAfterAttributeName
                | Self::TextContent
        )
    }
}

//! Static named-character-reference table.
//!
//! The full HTML5 table has over two thousand entries; this crate carries a
//! representative subset covering the common named references plus enough
//! prefix-overlap (`not` / `notin`, `amp` / `AMP`) to exercise longest-prefix
//! matching and the ambiguous-ampersand path. See `DESIGN.md` for the scope
//! note. Entries are `(name-without-leading-ampersand, replacement)`; names
//! that are valid without a trailing `;` appear twice, once with and once
//! without it, exactly as HTML5's table does for legacy compatibility names.

pub(crate) const NAMED_REFERENCES: &[(&str, &str)] = &[
    ("AMP", "&"),
    ("AMP;", "&"),
    ("amp", "&"),
    ("amp;", "&"),
    ("lt", "<"),
    ("lt;", "<"),
    ("LT", "<"),
    ("LT;", "<"),
    ("gt", ">"),
    ("gt;", ">"),
    ("GT", ">"),
    ("GT;", ">"),
    ("quot", "\""),
    ("quot;", "\""),
    ("QUOT", "\""),
    ("QUOT;", "\""),
    ("apos;", "'"),
    ("nbsp", "\u{A0}"),
    ("nbsp;", "\u{A0}"),
    ("copy", "\u{A9}"),
    ("copy;", "\u{A9}"),
    ("reg", "\u{AE}"),
    ("reg;", "\u{AE}"),
    ("trade;", "\u{2122}"),
    ("hellip;", "\u{2026}"),
    ("mdash;", "\u{2014}"),
    ("ndash;", "\u{2013}"),
    ("lsquo;", "\u{2018}"),
    ("rsquo;", "\u{2019}"),
    ("ldquo;", "\u{201C}"),
    ("rdquo;", "\u{201D}"),
    ("bull;", "\u{2022}"),
    ("dagger;", "\u{2020}"),
    ("Dagger;", "\u{2021}"),
    ("permil;", "\u{2030}"),
    ("prime;", "\u{2032}"),
    ("Prime;", "\u{2033}"),
    ("laquo", "\u{AB}"),
    ("laquo;", "\u{AB}"),
    ("raquo", "\u{BB}"),
    ("raquo;", "\u{BB}"),
    ("times", "\u{D7}"),
    ("times;", "\u{D7}"),
    ("divide", "\u{F7}"),
    ("divide;", "\u{F7}"),
    ("plusmn", "\u{B1}"),
    ("plusmn;", "\u{B1}"),
    ("micro", "\u{B5}"),
    ("micro;", "\u{B5}"),
    ("para", "\u{B6}"),
    ("para;", "\u{B6}"),
    ("sect", "\u{A7}"),
    ("sect;", "\u{A7}"),
    ("deg", "\u{B0}"),
    ("deg;", "\u{B0}"),
    ("sup1", "\u{B9}"),
    ("sup1;", "\u{B9}"),
    ("sup2", "\u{B2}"),
    ("sup2;", "\u{B2}"),
    ("sup3", "\u{B3}"),
    ("sup3;", "\u{B3}"),
    ("frac12", "\u{BD}"),
    ("frac12;", "\u{BD}"),
    ("frac14", "\u{BC}"),
    ("frac14;", "\u{BC}"),
    ("frac34", "\u{BE}"),
    ("frac34;", "\u{BE}"),
    ("euro;", "\u{20AC}"),
    ("pound", "\u{A3}"),
    ("pound;", "\u{A3}"),
    ("yen", "\u{A5}"),
    ("yen;", "\u{A5}"),
    ("cent", "\u{A2}"),
    ("cent;", "\u{A2}"),
    ("curren", "\u{A4}"),
    ("curren;", "\u{A4}"),
    ("alpha;", "\u{3B1}"),
    ("beta;", "\u{3B2}"),
    ("gamma;", "\u{3B3}"),
    ("delta;", "\u{3B4}"),
    ("pi;", "\u{3C0}"),
    ("sigma;", "\u{3C3}"),
    ("omega;", "\u{3C9}"),
    ("larr;", "\u{2190}"),
    ("uarr;", "\u{2191}"),
    ("rarr;", "\u{2192}"),
    ("darr;", "\u{2193}"),
    ("harr;", "\u{2194}"),
    ("spades;", "\u{2660}"),
    ("clubs;", "\u{2663}"),
    ("hearts;", "\u{2665}"),
    ("diams;", "\u{2666}"),
    ("not", "\u{AC}"),
    ("not;", "\u{AC}"),
    ("notin;", "\u{2209}"),
];

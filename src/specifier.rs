// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding a single `%...` conversion of a template:
//!
//! ```text
//! %[*][!][width][length]conv
//! ```
//!
//! The parts are recognized in exactly that order. `!` only means
//! something to `q` and `z`; for `q` the width is the rotation amount
//! instead of a length limit.

use kstring::KString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthModifier {
    None,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `L`
    Extended,
}

impl LengthModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthModifier::None => "",
            LengthModifier::Short => "h",
            LengthModifier::Long => "l",
            LengthModifier::LongLong => "ll",
            LengthModifier::Extended => "L",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `d`, `i`
    Decimal,
    /// `x`
    Hex,
    /// `b`
    Binary,
    /// `f`
    Float,
    /// `c`
    Char,
    /// `s`
    String,
    /// `q`
    CipherRotate,
    /// `z`
    SlangSuffix,
    /// Any other letter; skipped without touching input or
    /// destinations.
    Unknown(char),
}

impl ConversionKind {
    pub fn from_letter(c: char) -> ConversionKind {
        match c {
            'd' | 'i' => ConversionKind::Decimal,
            'x' => ConversionKind::Hex,
            'b' => ConversionKind::Binary,
            'f' => ConversionKind::Float,
            'c' => ConversionKind::Char,
            's' => ConversionKind::String,
            'q' => ConversionKind::CipherRotate,
            'z' => ConversionKind::SlangSuffix,
            _ => ConversionKind::Unknown(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpecifier {
    pub kind: ConversionKind,
    /// 0 means no limit.
    pub width: usize,
    pub length: LengthModifier,
    pub suppressed: bool,
    pub exclaim: bool,
    /// The conversion as written in the template, e.g. `%*!3hz`.
    pub directive: KString,
}

/// `s` starts right after the `%`. Returns the specifier and the
/// number of bytes of `s` it occupies, or `None` if `s` ends before a
/// conversion letter.
pub fn parse_specifier(s: &str) -> Option<(FormatSpecifier, usize)> {
    let bs = s.as_bytes();
    let mut i = 0;

    let suppressed = bs.first() == Some(&b'*');
    if suppressed {
        i += 1;
    }
    let exclaim = bs.get(i) == Some(&b'!');
    if exclaim {
        i += 1;
    }

    let mut width: usize = 0;
    while let Some(&b) = bs.get(i) {
        if ! b.is_ascii_digit() {
            break;
        }
        width = width.saturating_mul(10).saturating_add((b - b'0') as usize);
        i += 1;
    }

    // ll has to be tried before l
    let length = match (bs.get(i), bs.get(i + 1)) {
        (Some(b'l'), Some(b'l')) => LengthModifier::LongLong,
        (Some(b'l'), _) => LengthModifier::Long,
        (Some(b'h'), _) => LengthModifier::Short,
        (Some(b'L'), _) => LengthModifier::Extended,
        _ => LengthModifier::None,
    };
    i += length.as_str().len();

    let c = s[i..].chars().next()?;
    i += c.len_utf8();

    Some((
        FormatSpecifier {
            kind: ConversionKind::from_letter(c),
            width,
            length,
            suppressed,
            exclaim,
            directive: KString::from_string(format!("%{}", &s[..i])),
        },
        i))
}

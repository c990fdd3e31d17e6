// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Destinations for converted values. Each non-suppressed conversion
//! of a template takes the next slot, which has to be of the variant
//! matching the conversion and its length modifier:
//!
//! | conversion        | slot                                   |
//! |-------------------|----------------------------------------|
//! | `%hd` `%hx` `%hb` | `Short`                                |
//! | `%d` `%x` `%b`    | `Int`                                  |
//! | `%ld` ...         | `Long`                                 |
//! | `%lld` `%Ld` ...  | `LongLong`                             |
//! | `%f` `%hf`        | `Float`                                |
//! | `%lf`             | `Double`                               |
//! | `%Lf` `%llf`      | `LongDouble`                           |
//! | `%c`, `%1c`       | `Char` or `Chars`                      |
//! | `%Nc`             | `Chars`                                |
//! | `%s` `%q` `%z`    | `Str` (bounded) or `Text` (unbounded)  |

use crate::specifier::{ConversionKind, FormatSpecifier, LengthModifier};

/// Capacity of `Slot::string`, as for a `char buf[256]`.
pub const STRING_CAPACITY: usize = 256;

#[derive(Debug)]
pub enum Slot<'a> {
    Short(&'a mut i16),
    Int(&'a mut i32),
    Long(&'a mut i64),
    LongLong(&'a mut i64),
    Float(&'a mut f32),
    Double(&'a mut f64),
    /// There's no wider float type, this is an f64 as well.
    LongDouble(&'a mut f64),
    Char(&'a mut u8),
    Chars(&'a mut Vec<u8>),
    /// A string buffer of the given capacity, which counts a
    /// terminator position like a C buffer does: at most
    /// `capacity - 1` bytes are stored.
    Str(&'a mut String, usize),
    Text(&'a mut String),
}

impl<'a> Slot<'a> {
    /// A string slot with the default capacity.
    pub fn string(buf: &'a mut String) -> Slot<'a> {
        Slot::Str(buf, STRING_CAPACITY)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Short(_) => "short",
            Slot::Int(_) => "int",
            Slot::Long(_) => "long",
            Slot::LongLong(_) => "long long",
            Slot::Float(_) => "float",
            Slot::Double(_) => "double",
            Slot::LongDouble(_) => "long double",
            Slot::Char(_) => "char",
            Slot::Chars(_) => "char buffer",
            Slot::Str(_, _) => "string buffer",
            Slot::Text(_) => "text",
        }
    }

    /// Whether a value converted according to `spec` can be stored
    /// here.
    pub fn accepts(&self, spec: &FormatSpecifier) -> bool {
        use LengthModifier as L;
        match spec.kind {
            ConversionKind::Decimal | ConversionKind::Hex | ConversionKind::Binary =>
                matches!((spec.length, self),
                         (L::Short, Slot::Short(_))
                         | (L::None, Slot::Int(_))
                         | (L::Long, Slot::Long(_))
                         | (L::LongLong | L::Extended, Slot::LongLong(_))),
            ConversionKind::Float =>
                matches!((spec.length, self),
                         (L::None | L::Short, Slot::Float(_))
                         | (L::Long, Slot::Double(_))
                         | (L::LongLong | L::Extended, Slot::LongDouble(_))),
            ConversionKind::Char =>
                matches!(self, Slot::Chars(_))
                || (spec.width <= 1 && matches!(self, Slot::Char(_))),
            ConversionKind::String
                | ConversionKind::CipherRotate
                | ConversionKind::SlangSuffix =>
                matches!(self, Slot::Str(_, _) | Slot::Text(_)),
            ConversionKind::Unknown(_) => false,
        }
    }
}

/// Storage for suppressed conversions.
#[derive(Debug, Default)]
pub struct Scratch {
    short: i16,
    int: i32,
    long: i64,
    float: f32,
    double: f64,
    byte: u8,
    bytes: Vec<u8>,
    text: String,
}

impl Scratch {
    /// A slot into this scratch storage that `spec` accepts, `None`
    /// for unknown conversions. Text is unbounded, so a suppressed
    /// conversion consumes the same input as one into `Slot::Text`.
    pub fn slot_for(&mut self, spec: &FormatSpecifier) -> Option<Slot<'_>> {
        use LengthModifier as L;
        Some(match spec.kind {
            ConversionKind::Decimal | ConversionKind::Hex | ConversionKind::Binary =>
                match spec.length {
                    L::Short => Slot::Short(&mut self.short),
                    L::None => Slot::Int(&mut self.int),
                    L::Long => Slot::Long(&mut self.long),
                    L::LongLong | L::Extended => Slot::LongLong(&mut self.long),
                },
            ConversionKind::Float =>
                match spec.length {
                    L::None | L::Short => Slot::Float(&mut self.float),
                    L::Long => Slot::Double(&mut self.double),
                    L::LongLong | L::Extended => Slot::LongDouble(&mut self.double),
                },
            ConversionKind::Char =>
                if spec.width <= 1 {
                    Slot::Char(&mut self.byte)
                } else {
                    Slot::Chars(&mut self.bytes)
                },
            ConversionKind::String
                | ConversionKind::CipherRotate
                | ConversionKind::SlangSuffix => Slot::Text(&mut self.text),
            ConversionKind::Unknown(_) => return None,
        })
    }
}

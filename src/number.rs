// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning digits into numbers.

use num::traits::{PrimInt, WrappingAdd, WrappingMul, WrappingNeg};
use std::str::FromStr;

/// The integer types a conversion can store into. Overflow wraps, as
/// it does in the C implementations people compare against.
pub trait ScanInt: PrimInt + WrappingAdd + WrappingMul + WrappingNeg + From<u8> {}

impl<T> ScanInt for T
    where T: PrimInt + WrappingAdd + WrappingMul + WrappingNeg + From<u8> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Decimal,
    Hex,
}

impl Radix {
    pub fn base(self) -> u8 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    /// The lowercase letter following a `0` to mark the radix.
    pub fn prefix_letter(self) -> Option<u8> {
        match self {
            Radix::Binary => Some(b'b'),
            Radix::Decimal => None,
            Radix::Hex => Some(b'x'),
        }
    }

    pub fn is_prefix_letter(self, b: u8) -> bool {
        self.prefix_letter() == Some(b.to_ascii_lowercase())
    }

    pub fn digit(self, b: u8) -> Option<u8> {
        let d = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None
        };
        if d < self.base() { Some(d) } else { None }
    }
}

#[derive(Debug)]
pub struct Accumulator<T> {
    radix: Radix,
    value: T,
    digits: usize,
}

impl<T: ScanInt> Accumulator<T> {
    pub fn new(radix: Radix) -> Self {
        Accumulator { radix, value: T::zero(), digits: 0 }
    }

    pub fn push(&mut self, d: u8) {
        self.value = self.value
            .wrapping_mul(&<T as From<u8>>::from(self.radix.base()))
            .wrapping_add(&<T as From<u8>>::from(d));
        self.digits += 1;
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn finish(self, negative: bool) -> T {
        if negative {
            self.value.wrapping_neg()
        } else {
            self.value
        }
    }
}

/// `text` is sign, digits, optional fraction and optional exponent,
/// as collected by the float scanner. `str::parse` doesn't look at
/// the locale, and does the rounding.
pub fn parse_float<T: FromStr>(text: &str) -> Option<T> {
    text.parse().ok()
}

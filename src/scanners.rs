// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One routine per conversion. Unless noted, a scanner skips leading
//! whitespace, consumes at most `width` bytes (no limit if 0), and
//! leaves the first byte that doesn't belong to its token unread.
//!
//! Scanners only fail with `Err` on I/O errors; not finding a token
//! is a `ScanOutcome`.

use crate::error::ScanErrorWithPos;
use crate::number::{Accumulator, Radix, ScanInt, parse_float};
use crate::source::{ByteStream, CharSource, is_space};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome<T> {
    Matched(T),
    /// The input doesn't start with a token of the requested kind.
    NoMatch,
    /// The input ended before a token started.
    EndOfInput,
}

impl<T> ScanOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScanOutcome<U> {
        match self {
            ScanOutcome::Matched(v) => ScanOutcome::Matched(f(v)),
            ScanOutcome::NoMatch => ScanOutcome::NoMatch,
            ScanOutcome::EndOfInput => ScanOutcome::EndOfInput,
        }
    }
}

type Scanned<T> = Result<ScanOutcome<T>, ScanErrorWithPos>;

// Bytes left in a field.
struct Budget {
    limit: Option<usize>,
    used: usize,
}

impl Budget {
    fn new(width: usize) -> Budget {
        Budget { limit: if width == 0 { None } else { Some(width) }, used: 0 }
    }

    fn bounded(limit: Option<usize>) -> Budget {
        Budget { limit, used: 0 }
    }

    /// Whether `n` more bytes fit.
    fn room(&self, n: usize) -> bool {
        self.limit.map_or(true, |l| self.used + n <= l)
    }
}

// Consume the peeked byte if it satisfies `pred` and fits in the
// budget.
fn take_if<I: ByteStream>(
    src: &mut CharSource<I>,
    budget: &mut Budget,
    pred: impl Fn(u8) -> bool,
) -> Result<Option<u8>, ScanErrorWithPos> {
    if ! budget.room(1) {
        return Ok(None)
    }
    match src.peek()? {
        Some(b) if pred(b) => {
            src.consume()?;
            budget.used += 1;
            Ok(Some(b))
        }
        _ => Ok(None)
    }
}

fn is_sign(b: u8) -> bool {
    b == b'+' || b == b'-'
}

/// `%d`, `%x`, `%b`: optional sign, then for hex and binary an
/// optional `0x` / `0b` prefix, then digits of the radix.
///
/// The prefix letter is only taken when the field has room for a
/// digit after it. If the stream ends right after the letter, the
/// letter is handed back and the `0` stands as the value; if another
/// non-digit follows, the letter is dropped (there is only one
/// pushback slot) and the `0` still stands.
pub fn scan_integer<T: ScanInt, I: ByteStream>(
    src: &mut CharSource<I>,
    width: usize,
    radix: Radix,
) -> Scanned<T> {
    src.skip_whitespace()?;
    if src.peek()?.is_none() {
        return Ok(ScanOutcome::EndOfInput)
    }
    let mut budget = Budget::new(width);
    let negative = take_if(src, &mut budget, is_sign)? == Some(b'-');
    let mut acc = Accumulator::<T>::new(radix);

    if radix.prefix_letter().is_some() && take_if(src, &mut budget, |b| b == b'0')?.is_some() {
        acc.push(0);
        if budget.room(2) {
            if let Some(letter) = take_if(src, &mut budget, |b| radix.is_prefix_letter(b))? {
                if src.peek()?.is_none() {
                    src.pushback(letter);
                    budget.used -= 1;
                }
            }
        }
    }

    while let Some(b) = take_if(src, &mut budget, |b| radix.digit(b).is_some())? {
        if let Some(d) = radix.digit(b) {
            acc.push(d);
        }
    }

    if acc.digits() == 0 {
        Ok(ScanOutcome::NoMatch)
    } else {
        Ok(ScanOutcome::Matched(acc.finish(negative)))
    }
}

/// `%f`: optional sign, digits, optional `.` and digits, optional
/// exponent. At least one digit has to appear before the exponent.
///
/// An exponent marker (and its sign) without digits after it is not
/// part of the number. If the stream ends right after it, the last
/// byte of it is handed back; otherwise the byte that stopped the
/// exponent stays unread and the marker is dropped.
pub fn scan_float<T: FromStr, I: ByteStream>(
    src: &mut CharSource<I>,
    width: usize,
) -> Scanned<T> {
    src.skip_whitespace()?;
    if src.peek()?.is_none() {
        return Ok(ScanOutcome::EndOfInput)
    }
    let mut budget = Budget::new(width);
    let mut text = String::new();
    let mut mantissa_digits = 0;
    let is_digit = |b: u8| b.is_ascii_digit();

    if let Some(s) = take_if(src, &mut budget, is_sign)? {
        text.push(s as char);
    }
    while let Some(d) = take_if(src, &mut budget, is_digit)? {
        text.push(d as char);
        mantissa_digits += 1;
    }
    if take_if(src, &mut budget, |b| b == b'.')?.is_some() {
        text.push('.');
        while let Some(d) = take_if(src, &mut budget, is_digit)? {
            text.push(d as char);
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return Ok(ScanOutcome::NoMatch)
    }

    if budget.room(2) {
        if let Some(marker) = take_if(src, &mut budget, |b| b == b'e' || b == b'E')? {
            let mut exponent = String::new();
            exponent.push(marker as char);
            let mut last = marker;
            if budget.room(2) {
                if let Some(s) = take_if(src, &mut budget, is_sign)? {
                    exponent.push(s as char);
                    last = s;
                }
            }
            let mut exponent_digits = 0;
            while let Some(d) = take_if(src, &mut budget, is_digit)? {
                exponent.push(d as char);
                exponent_digits += 1;
            }
            if exponent_digits > 0 {
                text.push_str(&exponent);
            } else if src.peek()?.is_none() {
                src.pushback(last);
            }
        }
    }

    match parse_float(&text) {
        Some(v) => Ok(ScanOutcome::Matched(v)),
        None => Ok(ScanOutcome::NoMatch),
    }
}

/// `%c`: one raw byte, no whitespace skipping.
pub fn scan_char<I: ByteStream>(
    src: &mut CharSource<I>,
) -> Scanned<u8> {
    Ok(match src.pull()? {
        Some(b) => ScanOutcome::Matched(b),
        None => ScanOutcome::EndOfInput,
    })
}

/// `%Nc`: `n` raw bytes, no whitespace skipping. A stream ending
/// early still matches with what was read, unless nothing was.
pub fn scan_chars<I: ByteStream>(
    src: &mut CharSource<I>,
    n: usize,
) -> Scanned<Vec<u8>> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        match src.pull()? {
            Some(b) => out.push(b),
            None => break,
        }
    }
    Ok(if out.is_empty() {
        ScanOutcome::EndOfInput
    } else {
        ScanOutcome::Matched(out)
    })
}

/// `%s`: a run of non-whitespace, at most `width` bytes and at most
/// `capacity - 1` bytes (the destination keeps room for a
/// terminator).
pub fn scan_string<I: ByteStream>(
    src: &mut CharSource<I>,
    width: usize,
    capacity: Option<usize>,
) -> Scanned<Vec<u8>> {
    src.skip_whitespace()?;
    if src.peek()?.is_none() {
        return Ok(ScanOutcome::EndOfInput)
    }
    let width_limit = if width == 0 { None } else { Some(width) };
    let limit = match (width_limit, capacity.map(|c| c.saturating_sub(1))) {
        (Some(w), Some(c)) => Some(w.min(c)),
        (w, c) => w.or(c),
    };
    let mut budget = Budget::bounded(limit);
    let mut out = Vec::new();
    while let Some(b) = take_if(src, &mut budget, |b| ! is_space(b))? {
        out.push(b);
    }
    Ok(if out.is_empty() {
        ScanOutcome::NoMatch
    } else {
        ScanOutcome::Matched(out)
    })
}

/// Rotate an ASCII letter within its case alphabet, then optionally
/// swap its case. Other bytes pass through.
pub fn rotate(b: u8, shift: i32, invert_case: bool) -> u8 {
    let base = match b {
        b'a'..=b'z' => b'a',
        b'A'..=b'Z' => b'A',
        _ => return b
    };
    // rem_euclid keeps negative shifts inside 0..26
    let offset = (i32::from(b - base) + shift).rem_euclid(26) as u8;
    let rotated = base + offset;
    if invert_case {
        if rotated.is_ascii_lowercase() {
            rotated.to_ascii_uppercase()
        } else {
            rotated.to_ascii_lowercase()
        }
    } else {
        rotated
    }
}

/// `%Nq`: the rest of the line, raw, each letter rotated by `shift`
/// (and case-swapped with `!`). The newline is left unread. Only an
/// empty result counts as end of input.
pub fn scan_cipher<I: ByteStream>(
    src: &mut CharSource<I>,
    shift: i32,
    invert_case: bool,
) -> Scanned<Vec<u8>> {
    let mut out = Vec::new();
    while let Some(b) = src.pull()? {
        if b == b'\n' {
            src.pushback(b);
            break;
        }
        out.push(rotate(b, shift, invert_case));
    }
    Ok(if out.is_empty() {
        ScanOutcome::EndOfInput
    } else {
        ScanOutcome::Matched(out)
    })
}

/// `%z`: skip whitespace within the line, take the rest of the line
/// without its trailing whitespace, and append `suffix`. If the line
/// is empty or blank, the result is `suffix` without its leading
/// space. The newline is left unread. A stream that is already
/// exhausted is end of input.
pub fn scan_slang<I: ByteStream>(
    src: &mut CharSource<I>,
    suffix: &str,
) -> Scanned<Vec<u8>> {
    if src.peek()?.is_none() {
        return Ok(ScanOutcome::EndOfInput)
    }
    // unlike skip_whitespace, stay on this line
    while let Some(b) = src.peek()? {
        if b == b'\n' || ! is_space(b) {
            break;
        }
        src.consume()?;
    }
    let mut line = Vec::new();
    let mut keep = 0;
    while let Some(b) = src.pull()? {
        if b == b'\n' {
            src.pushback(b);
            break;
        }
        line.push(b);
        if ! is_space(b) {
            keep = line.len();
        }
    }
    line.truncate(keep);
    if line.is_empty() {
        line.extend_from_slice(suffix.trim_start().as_bytes());
    } else {
        line.extend_from_slice(suffix.as_bytes());
    }
    Ok(ScanOutcome::Matched(line))
}

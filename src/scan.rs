// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Running a template against input: the directives from
//! [parse](../parse/index.html) are matched one after the other, each
//! conversion is handed to its scanner and the result stored into the
//! next slot.
//!
//! The walk stops at the first literal that doesn't match and at the
//! first conversion that finds no token; everything assigned up to
//! then stays assigned and is counted. Running out of input before
//! anything was assigned is reported as `ScanStatus::AtEnd`, like
//! `EOF` from C's `scanf`.

use crate::context::{Context, FileContext, StreamContext};
use crate::error::{ScanError, ScanErrorWithContext, ScanErrorWithLocation,
                   ScanErrorWithPos, ScanErrorWithPosContext};
use crate::number::Radix;
use crate::parse::{Directive, DirectiveAt, directives};
use crate::scanners::{ScanOutcome, scan_char, scan_chars, scan_cipher,
                      scan_float, scan_integer, scan_slang, scan_string};
use crate::settings::{Settings, DEFAULT_SETTINGS};
use crate::slot::{Scratch, Slot};
use crate::source::{ByteStream, CharSource, char_source};
use crate::specifier::{ConversionKind, FormatSpecifier};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Number of non-suppressed conversions that were stored.
    Assigned(usize),
    /// The input ended before anything was stored.
    AtEnd,
}

impl ScanStatus {
    /// The classic return value: the count, or -1 for `AtEnd`.
    pub fn code(self) -> i32 {
        match self {
            ScanStatus::Assigned(n) => i32::try_from(n).unwrap_or(i32::MAX),
            ScanStatus::AtEnd => -1,
        }
    }

    pub fn assigned(self) -> usize {
        match self {
            ScanStatus::Assigned(n) => n,
            ScanStatus::AtEnd => 0,
        }
    }
}

enum Step {
    Next,
    Halt(ScanStatus),
}

// Transient state of one scan; nothing survives the call except the
// read position of the source.
struct ScanSession<'t, 's, 'a, I> {
    settings: &'t Settings<'t>,
    src: &'t mut CharSource<I>,
    slots: std::slice::IterMut<'s, Slot<'a>>,
    scratch: Scratch,
    count: usize,
}

impl<'t, 's, 'a, I: ByteStream> ScanSession<'t, 's, 'a, I> {
    fn status(&self) -> ScanStatus {
        ScanStatus::Assigned(self.count)
    }

    fn step(&mut self, directive: Directive, offset: usize)
            -> Result<Step, ScanErrorWithPos> {
        match directive {
            Directive::Whitespace => {
                self.src.skip_whitespace()?;
                Ok(Step::Next)
            }
            Directive::Literal(b) => self.literal(b, offset),
            Directive::Percent => self.literal(b'%', offset),
            Directive::Conversion(spec) => self.conversion(&spec, offset),
        }
    }

    fn literal(&mut self, expected: u8, offset: usize)
               -> Result<Step, ScanErrorWithPos> {
        match self.src.pull()? {
            Some(b) if b == expected => Ok(Step::Next),
            Some(b) => {
                self.src.pushback(b);
                debug!(offset, expected = ?(expected as char), got = ?(b as char),
                       "literal mismatch");
                Ok(Step::Halt(self.status()))
            }
            None => {
                debug!(offset, expected = ?(expected as char),
                       "end of input while matching literal");
                Ok(Step::Halt(self.status()))
            }
        }
    }

    fn conversion(&mut self, spec: &FormatSpecifier, offset: usize)
                  -> Result<Step, ScanErrorWithPos> {
        if let ConversionKind::Unknown(c) = spec.kind {
            trace!(offset, letter = ?c, "skipping unknown conversion");
            return Ok(Step::Next)
        }
        trace!(offset, directive = %spec.directive, "conversion");
        let outcome =
            if spec.suppressed {
                match self.scratch.slot_for(spec) {
                    Some(mut slot) => convert(self.settings, self.src, spec, &mut slot)?,
                    None => return Ok(Step::Next)
                }
            } else {
                let pos = self.src.pos();
                let slot = self.slots.next().ok_or_else(
                    || ScanError::MissingSlot(spec.directive.clone()).at(pos))?;
                if ! slot.accepts(spec) {
                    return Err(ScanError::SlotMismatch(spec.directive.clone(),
                                                       slot.name()).at(pos))
                }
                convert(self.settings, self.src, spec, slot)?
            };
        match outcome {
            ScanOutcome::Matched(()) => {
                if ! spec.suppressed {
                    self.count += 1;
                }
                Ok(Step::Next)
            }
            ScanOutcome::NoMatch => {
                debug!(offset, directive = %spec.directive, "no match");
                Ok(Step::Halt(self.status()))
            }
            ScanOutcome::EndOfInput => {
                debug!(offset, directive = %spec.directive, "end of input");
                Ok(Step::Halt(
                    if self.count == 0 { ScanStatus::AtEnd } else { self.status() }))
            }
        }
    }
}

// Scan according to `spec`, storing into `slot`, which must have
// passed `slot.accepts(spec)`; the slot variant picks the scanner's
// result type.
fn convert<I: ByteStream>(
    settings: &Settings,
    src: &mut CharSource<I>,
    spec: &FormatSpecifier,
    slot: &mut Slot<'_>,
) -> Result<ScanOutcome<()>, ScanErrorWithPos> {
    let width = spec.width;
    let radix = match spec.kind {
        ConversionKind::Hex => Radix::Hex,
        ConversionKind::Binary => Radix::Binary,
        _ => Radix::Decimal,
    };
    Ok(match slot {
        Slot::Short(d) => scan_integer(src, width, radix)?.map(|v| **d = v),
        Slot::Int(d) => scan_integer(src, width, radix)?.map(|v| **d = v),
        Slot::Long(d) | Slot::LongLong(d) =>
            scan_integer(src, width, radix)?.map(|v| **d = v),
        Slot::Float(d) => scan_float(src, width)?.map(|v| **d = v),
        Slot::Double(d) | Slot::LongDouble(d) =>
            scan_float(src, width)?.map(|v| **d = v),
        Slot::Char(d) => scan_char(src)?.map(|v| **d = v),
        Slot::Chars(d) => scan_chars(src, width.max(1))?.map(|v| **d = v),
        Slot::Str(d, capacity) =>
            scan_text(settings, src, spec, Some(*capacity))?.map(|v| **d = v),
        Slot::Text(d) =>
            scan_text(settings, src, spec, None)?.map(|v| **d = v),
    })
}

// `%s`, `%q` and `%z`, which all end up as text.
fn scan_text<I: ByteStream>(
    settings: &Settings,
    src: &mut CharSource<I>,
    spec: &FormatSpecifier,
    capacity: Option<usize>,
) -> Result<ScanOutcome<String>, ScanErrorWithPos> {
    let outcome = match spec.kind {
        ConversionKind::CipherRotate => {
            // the width is the rotation here, not a limit
            let shift = (spec.width % 26) as i32;
            scan_cipher(src, shift, spec.exclaim)?
        }
        ConversionKind::SlangSuffix => {
            let suffix = settings.suffixes.select(spec.exclaim, spec.length);
            scan_slang(src, suffix)?
        }
        _ => scan_string(src, spec.width, capacity)?
    };
    Ok(outcome.map(|mut bytes| {
        if let Some(c) = capacity {
            bytes.truncate(c.saturating_sub(1));
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }))
}

/// Scan `src` according to `template`, storing into `slots` in order.
///
/// Only I/O errors and slots that are missing or don't fit their
/// conversion are errors; how far the input matched is in the
/// `ScanStatus`.
pub fn scan_with<I: ByteStream>(
    settings: &Settings,
    src: &mut CharSource<I>,
    template: &str,
    slots: &mut [Slot<'_>],
) -> Result<ScanStatus, ScanErrorWithPos> {
    let mut session = ScanSession {
        settings,
        src,
        slots: slots.iter_mut(),
        scratch: Scratch::default(),
        count: 0,
    };
    for DirectiveAt(directive, offset) in directives(template) {
        if let Step::Halt(status) = session.step(directive, offset)? {
            trace!(?status, "scan halted");
            return Ok(status)
        }
    }
    let status = session.status();
    trace!(?status, "scan done");
    Ok(status)
}

/// `scan_with` using `DEFAULT_SETTINGS`.
pub fn scan<I: ByteStream>(
    src: &mut CharSource<I>,
    template: &str,
    slots: &mut [Slot<'_>],
) -> Result<ScanStatus, ScanErrorWithPos> {
    scan_with(&DEFAULT_SETTINGS, src, template, slots)
}

/// Scan an in-memory string.
pub fn scan_str(
    input: &str,
    template: &str,
    slots: &mut [Slot<'_>],
) -> Result<ScanStatus, ScanErrorWithPos> {
    let mut src = char_source(input.as_bytes());
    scan(&mut src, template, slots)
}

impl ScanErrorWithPos {
    fn within(self, container: Box<dyn Context>) -> ScanErrorWithLocation {
        ScanErrorWithLocation::PC(Box::new(
            ScanErrorWithPosContext {
                err_with_pos: self,
                container
            }))
    }
}

/// Scan from `fh`, naming it `name` in errors (e.g. "stdin").
pub fn scan_reader(
    fh: impl Read,
    name: &str,
    template: &str,
    slots: &mut [Slot<'_>],
) -> Result<ScanStatus, ScanErrorWithLocation> {
    let mut src = char_source(fh);
    scan(&mut src, template, slots)
        .map_err(|e| e.within(Box::new(StreamContext::new(name))))
}

pub fn scan_file(
    path: &Path,
    template: &str,
    slots: &mut [Slot<'_>],
) -> Result<ScanStatus, ScanErrorWithLocation> {
    let context = || Box::new(FileContext { path: path.to_path_buf() });
    let fh = File::open(path).map_err(|e| ScanErrorWithLocation::IO(
        Box::new(ScanErrorWithContext::IO(e, context()))))?;
    let mut src = char_source(fh);
    scan(&mut src, template, slots).map_err(|e| e.within(context()))
}

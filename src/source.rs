// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The byte cursor the scanners pull from: bytes and their positions
//! from anything implementing `Read`, plus exactly one slot for
//! handing a byte back.
//!
//! Every scanner has to look at one byte past the end of its token to
//! know where the token ends; that byte goes back into the slot so
//! that the next literal, whitespace or conversion sees it again.
//! Only one such byte can be pending. Pushing back a second one
//! before reading is a bug in the caller and panics.

use crate::error::{ScanError, ScanErrorWithPos};
use crate::pos::Pos;
use anyhow::{Result, anyhow};
use genawaiter::rc::Gen;
use std::io::{self, Read};

/// Anything yielding positioned bytes; `buffered_bytes` is the usual
/// one, but tests and front ends can hand in their own.
pub trait ByteStream: Iterator<Item = Result<(u8, Pos)>> {}

impl<T> ByteStream for T where T: Iterator<Item = Result<(u8, Pos)>> {}

/// C's `isspace` in the "C" locale; unlike `u8::is_ascii_whitespace`
/// this includes vertical tab.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

pub fn buffered_bytes<R>(
    fh: R
) -> impl Iterator<Item=Result<(u8, Pos)>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = fh;
        let mut buf = [0u8; 4096];
        let mut pos = Pos::default();
        loop {
            match inp.read(&mut buf) {
                Ok(0) => return,
                Ok(n) => {
                    for &b in &buf[..n] {
                        co.yield_(Ok((b, pos))).await;
                        pos = pos.after(b);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    co.yield_(Err(anyhow!("buffered_bytes: {}", e))).await;
                    return;
                }
            }
        }
    }).into_iter()
}

/// A `CharSource` reading from `fh`.
pub fn char_source<R>(
    fh: R
) -> CharSource<impl ByteStream>
    where R: Read
{
    CharSource::new(buffered_bytes(fh))
}

#[derive(Debug)]
pub struct CharSource<I> {
    bytes: I,
    // The single pushback slot.
    pending: Option<(u8, Pos)>,
    // Position of the most recently pulled byte, needed to give a
    // pushed back byte its position again.
    last: Option<Pos>,
    // Position and offset of the next byte to be pulled.
    pos: Pos,
    offset: u64,
    // The underlying stream must not be asked again once it ended.
    finished: bool,
}

impl<I: ByteStream> CharSource<I> {
    pub fn new(bytes: I) -> CharSource<I> {
        CharSource {
            bytes,
            pending: None,
            last: None,
            pos: Pos::default(),
            offset: 0,
            finished: false,
        }
    }

    /// Position of the next byte `pull` would return.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether a byte is waiting in the pushback slot.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The next byte, or `None` at end of stream.
    pub fn pull(&mut self) -> Result<Option<u8>, ScanErrorWithPos> {
        let (b, p) =
            if let Some(bp) = self.pending.take() {
                bp
            } else {
                if self.finished {
                    return Ok(None)
                }
                match self.bytes.next() {
                    None => {
                        self.finished = true;
                        return Ok(None)
                    }
                    Some(Err(e)) => {
                        self.finished = true;
                        return Err(ScanError::IOError(e).at(self.pos))
                    }
                    Some(Ok(bp)) => bp
                }
            };
        self.last = Some(p);
        self.pos = p.after(b);
        self.offset += 1;
        Ok(Some(b))
    }

    /// Hand `b` back so that the next `pull` returns it.
    ///
    /// # Panics
    ///
    /// If a byte is already pending.
    pub fn pushback(&mut self, b: u8) {
        assert!(self.pending.is_none(),
                "pushback of {:?} while {:?} is still pending",
                b as char,
                self.pending.map(|(c, _)| c as char));
        let p = self.last.take().unwrap_or(self.pos);
        self.pending = Some((b, p));
        self.pos = p;
        self.offset = self.offset.saturating_sub(1);
    }

    /// The next byte without consuming it. Uses the pushback slot, so
    /// a `pushback` is only allowed again after the byte was pulled.
    pub fn peek(&mut self) -> Result<Option<u8>, ScanErrorWithPos> {
        if let Some((b, _)) = self.pending {
            return Ok(Some(b))
        }
        let mb = self.pull()?;
        if let Some(b) = mb {
            self.pushback(b);
        }
        Ok(mb)
    }

    /// Drop the byte `peek` returned.
    pub fn consume(&mut self) -> Result<(), ScanErrorWithPos> {
        self.pull()?;
        Ok(())
    }

    /// Drain whitespace. Afterwards the next byte is not whitespace,
    /// or the stream has ended with nothing pending.
    pub fn skip_whitespace(&mut self) -> Result<(), ScanErrorWithPos> {
        while let Some(b) = self.pull()? {
            if ! is_space(b) {
                self.pushback(b);
                break;
            }
        }
        Ok(())
    }

    /// Everything not consumed yet, including a pending byte.
    pub fn read_rest(&mut self) -> Result<Vec<u8>, ScanErrorWithPos> {
        let mut rest = Vec::new();
        while let Some(b) = self.pull()? {
            rest.push(b);
        }
        Ok(rest)
    }
}

// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors at the boundary of a scan. Mismatching input and end of
//! input are *not* errors, they are reported through
//! [`ScanStatus`](../scan/enum.ScanStatus.html); what ends up here is
//! I/O failure and callers handing in destinations that don't fit the
//! template.

use crate::context::Context;
use crate::pos::Pos;
use kstring::KString;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error ({0}) after")]
    // XX: should not use anyhow::Error in source.rs
    IOError(anyhow::Error),
    #[error("no destination left for '{0}'")]
    MissingSlot(KString),
    #[error("'{0}' cannot be stored into a {1} destination")]
    SlotMismatch(KString, &'static str),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ScanErrorWithPos {
    pub err: ScanError,
    pub pos: Pos
}

impl ScanError {
    pub fn at(self, p: Pos) -> ScanErrorWithPos {
        ScanErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Error, Debug)]
pub struct ScanErrorWithPosContext {
    pub err_with_pos: ScanErrorWithPos,
    pub container: Box<dyn Context>
}

impl Display for ScanErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ",
                                 self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ScanErrorWithContext {
    #[error("{}: {0}", .1.origin_string())]
    IO(std::io::Error, Box<dyn Context>)
}

#[derive(Error, Debug)]
pub enum ScanErrorWithLocation {
    #[error("{0}")]
    PC(Box<ScanErrorWithPosContext>),
    #[error("{0}")]
    IO(Box<ScanErrorWithContext>)
}

impl ScanErrorWithLocation {
    /// The error without its location information.
    pub fn scan_error(&self) -> Option<&ScanError> {
        match self {
            ScanErrorWithLocation::PC(e) => Some(&e.err_with_pos.err),
            ScanErrorWithLocation::IO(_) => None,
        }
    }
}

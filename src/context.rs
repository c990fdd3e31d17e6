// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Where scanned input comes from, for error messages. The position
//! inside the input is kept separately (see `ScanErrorWithPos`).

use crate::pos::Pos;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub trait Context : Debug + Send + Sync {
    /// Format the origin with a position, to be put *after* the
    /// error reason and a space; includes "in" or "from".
    fn format_with_pos(&self, p: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error>;
    /// Format just the origin, to be put *before* a colon and the
    /// error reason. Does not include the colon.
    fn format_origin(&self, f: &mut Formatter<'_>)
                     -> Result<(), std::fmt::Error>;
    fn origin_string(&self) -> String {
        format!("{}", Origin(self))
    }
}

// Formatter::new is not public, go through Display instead.
struct Origin<'t, T: Context + ?Sized>(&'t T);
impl<'t, T: Context + ?Sized> Display for Origin<'t, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.format_origin(f)
    }
}


#[derive(Debug)]
pub struct FileContext {
    pub path: PathBuf
}

impl Context for FileContext {
    fn format_with_pos(&self, pos: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error> {
        write!(f, "in {:?}{}", &self.path, pos)
    }
    fn format_origin(&self, f: &mut Formatter<'_>)
                     -> Result<(), std::fmt::Error> {
        write!(f, "{:?}", &self.path)
    }
}

/// Input that has no path, like stdin, a socket or a line typed into
/// the demo; it is identified by a name only.
#[derive(Debug)]
pub struct StreamContext {
    pub name: String
}

impl StreamContext {
    pub fn new(name: impl Into<String>) -> StreamContext {
        StreamContext { name: name.into() }
    }
}

impl Context for StreamContext {
    fn format_with_pos(&self, pos: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error> {
        write!(f, "from ({}){}", &self.name, pos)
    }
    fn format_origin(&self, f: &mut Formatter<'_>)
                     -> Result<(), std::fmt::Error> {
        write!(f, "({})", &self.name)
    }
}

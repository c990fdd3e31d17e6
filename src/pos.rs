// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Position of a byte in the input. Both line and col are zero
/// based; Emacs uses 1-based line numbering, so line is incremented
/// by 1 in Display. `col` counts bytes, not characters.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    /// The position of the byte following `b` if `b` sits at `self`.
    /// Sticks at `u32::MAX` instead of overflowing.
    pub fn after(self, b: u8) -> Pos {
        if b == b'\n' {
            Pos { line: self.line.saturating_add(1), col: 0 }
        } else {
            Pos { line: self.line, col: self.col.saturating_add(1) }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        // `FileContext` puts this right after the Debug formatted
        // path, which gives Emacs style locations.
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}

// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for scanning.

use crate::specifier::LengthModifier;

/// What `%z` appends, by modifier combination.
#[derive(Debug)]
pub struct Suffixes {
    /// `%z`
    pub plain: &'static str,
    /// `%!z`
    pub exclaim: &'static str,
    /// `%!hz`
    pub exclaim_short: &'static str,
}

pub const LOL_SUFFIXES : Suffixes = Suffixes {
    plain: " lol",
    exclaim: " lol!",
    exclaim_short: " haha!",
};

impl Suffixes {
    pub fn select(&self, exclaim: bool, length: LengthModifier) -> &'static str {
        match (exclaim, length) {
            (false, _) => self.plain,
            (true, LengthModifier::Short) => self.exclaim_short,
            (true, _) => self.exclaim,
        }
    }
}

#[derive(Debug)]
pub struct Settings<'t> {
    pub suffixes: &'t Suffixes,
}

pub const DEFAULT_SETTINGS : Settings<'static> = Settings {
    suffixes: &LOL_SUFFIXES,
};

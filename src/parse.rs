// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a template into a stream of directives. Every byte of
//! the template is either part of a conversion, a run of whitespace
//! (matching any amount of input whitespace, including none), `%%`
//! (matching a literal `%`), or a literal byte to be matched exactly.
//! See [scan](../scan/index.html) for running the directives against
//! input.

use crate::source::is_space;
use crate::specifier::{FormatSpecifier, parse_specifier};
use genawaiter::rc::Gen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Literal(u8),
    Whitespace,
    Percent,
    Conversion(FormatSpecifier),
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Directive::Literal(b) => f.write_fmt(format_args!("{:?}", *b as char)),
            Directive::Whitespace => f.write_str("' '"),
            Directive::Percent => f.write_str("%%"),
            Directive::Conversion(spec) => f.write_str(&spec.directive),
        }
    }
}

/// A directive and the byte offset in the template where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveAt(pub Directive, pub usize);

/// The directives of `template`, in order. A `%` that isn't followed
/// by a complete conversion ends the template.
pub fn directives<'s>(
    template: &'s str
) -> impl Iterator<Item = DirectiveAt> + 's
{
    Gen::new(|co| async move {
        let bs = template.as_bytes();
        let mut i = 0;
        while let Some(&b) = bs.get(i) {
            if b == b'%' {
                if bs.get(i + 1) == Some(&b'%') {
                    co.yield_(DirectiveAt(Directive::Percent, i)).await;
                    i += 2;
                } else if let Some((spec, len)) = parse_specifier(&template[i + 1..]) {
                    co.yield_(DirectiveAt(Directive::Conversion(spec), i)).await;
                    i += 1 + len;
                } else {
                    return;
                }
            } else if is_space(b) {
                co.yield_(DirectiveAt(Directive::Whitespace, i)).await;
                while bs.get(i).map_or(false, |&b| is_space(b)) {
                    i += 1;
                }
            } else {
                co.yield_(DirectiveAt(Directive::Literal(b), i)).await;
                i += 1;
            }
        }
    }).into_iter()
}

/// Just the conversions of `template`, e.g. for a front end that
/// needs to prepare destinations.
pub fn conversions(template: &str) -> impl Iterator<Item = FormatSpecifier> + '_ {
    directives(template).filter_map(|DirectiveAt(d, _)| match d {
        Directive::Conversion(spec) => Some(spec),
        _ => None
    })
}

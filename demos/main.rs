// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interactive demo: enter a template, then a line of input, and see
//! what gets matched.

use anyscanf::parse::conversions;
use anyscanf::scan::{scan_reader, ScanStatus};
use anyscanf::slot::Slot;
use anyscanf::specifier::{ConversionKind, FormatSpecifier, LengthModifier};
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufRead, Write};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Use this template for every input line instead of asking
    #[clap(short, long, value_parser)]
    template: Option<String>,
    /// Log the scan engine's decisions to stderr (filter via RUST_LOG)
    #[clap(long, value_parser)]
    trace: bool,
}

// Owned storage behind one slot.
#[derive(Debug)]
enum Field {
    Short(i16),
    Int(i32),
    Long(i64),
    LongLong(i64),
    Float(f32),
    Double(f64),
    LongDouble(f64),
    Char(u8),
    Chars(Vec<u8>),
    Str(String),
}

impl Field {
    fn for_spec(spec: &FormatSpecifier) -> Option<Field> {
        use LengthModifier as L;
        Some(match spec.kind {
            ConversionKind::Decimal | ConversionKind::Hex | ConversionKind::Binary =>
                match spec.length {
                    L::Short => Field::Short(0),
                    L::None => Field::Int(0),
                    L::Long => Field::Long(0),
                    L::LongLong | L::Extended => Field::LongLong(0),
                },
            ConversionKind::Float =>
                match spec.length {
                    L::None | L::Short => Field::Float(0.),
                    L::Long => Field::Double(0.),
                    L::LongLong | L::Extended => Field::LongDouble(0.),
                },
            ConversionKind::Char =>
                if spec.width <= 1 { Field::Char(0) } else { Field::Chars(Vec::new()) },
            ConversionKind::String
                | ConversionKind::CipherRotate
                | ConversionKind::SlangSuffix => Field::Str(String::new()),
            ConversionKind::Unknown(_) => return None,
        })
    }

    fn slot(&mut self) -> Slot<'_> {
        match self {
            Field::Short(v) => Slot::Short(v),
            Field::Int(v) => Slot::Int(v),
            Field::Long(v) => Slot::Long(v),
            Field::LongLong(v) => Slot::LongLong(v),
            Field::Float(v) => Slot::Float(v),
            Field::Double(v) => Slot::Double(v),
            Field::LongDouble(v) => Slot::LongDouble(v),
            Field::Char(v) => Slot::Char(v),
            Field::Chars(v) => Slot::Chars(v),
            Field::Str(v) => Slot::string(v),
        }
    }

    fn show(&self, kind: ConversionKind) -> String {
        match (self, kind) {
            (Field::Int(v), ConversionKind::Hex) => format!("0x{v:x} ({v})"),
            (Field::Int(v), ConversionKind::Binary) => format!("{v} (binary)"),
            (Field::Short(v), _) => v.to_string(),
            (Field::Int(v), _) => v.to_string(),
            (Field::Long(v) | Field::LongLong(v), _) => v.to_string(),
            (Field::Float(v), _) => format!("{v:.6}"),
            (Field::Double(v) | Field::LongDouble(v), _) => format!("{v:.6}"),
            (Field::Char(v), _) => format!("'{}'", *v as char),
            (Field::Chars(v), _) => format!("{:?}", String::from_utf8_lossy(v)),
            (Field::Str(v), _) => v.clone(),
        }
    }
}

fn prompt(msg: &str) -> Result<()> {
    print!("{msg}");
    stdout().flush()?;
    Ok(())
}

fn is_quit(s: &str) -> bool {
    s == "quit" || s == "-1"
}

fn run_once(template: &str, line: &str) -> Result<()> {
    let specs: Vec<FormatSpecifier> = conversions(template).collect();
    let mut fields: Vec<Option<Field>> = specs.iter()
        .map(|spec| if spec.suppressed { None } else { Field::for_spec(spec) })
        .collect();

    let input = format!("{line}\n");
    let status = {
        let mut slots: Vec<Slot> = fields.iter_mut().flatten().map(Field::slot).collect();
        scan_reader(input.as_bytes(), "input line", template, &mut slots)?
    };

    println!("---");
    println!("Fields matched: {}", status.code());
    match status {
        ScanStatus::AtEnd => println!("  EOF during parsing"),
        ScanStatus::Assigned(0) => println!("  No valid input matched"),
        ScanStatus::Assigned(n) => {
            let mut shown = 0;
            for (i, (spec, field)) in specs.iter().zip(&fields).enumerate() {
                if spec.suppressed {
                    println!("  Field {} ({}): (suppressed)", i + 1, spec.directive);
                    continue;
                }
                let Some(field) = field else { continue };
                if shown >= n {
                    break;
                }
                println!("  Field {} ({}): {}", i + 1, spec.directive, field.show(spec.kind));
                shown += 1;
            }
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env()
                             .unwrap_or_else(|_| EnvFilter::new("anyscanf=trace")))
            .with_writer(std::io::stderr)
            .init();
    }

    println!("=== anyscanf interactive demo ===");
    println!("Enter 'quit' or '-1' at any prompt to exit\n");

    let mut lines = stdin().lock().lines();
    loop {
        let template = match &args.template {
            Some(t) => t.clone(),
            None => {
                prompt("Enter a template: ")?;
                let Some(t) = lines.next() else {
                    println!("\nEOF encountered. Exiting.");
                    break;
                };
                let t = t?;
                if is_quit(&t) {
                    println!("Exiting demo.");
                    break;
                }
                if t.is_empty() {
                    println!("Empty template. Try again.\n");
                    continue;
                }
                t
            }
        };

        prompt(&format!("scan({template}): "))?;
        let Some(line) = lines.next() else {
            println!("\nEOF encountered. Exiting.");
            break;
        };
        let line = line?;
        if is_quit(&line) {
            println!("Exiting demo.");
            break;
        }
        run_once(&template, &line)?;
    }
    Ok(())
}

use anyhow::Result;
use anyscanf::error::ScanError;
use anyscanf::scan::{scan, scan_str, scan_with, ScanStatus};
use anyscanf::settings::{Settings, Suffixes};
use anyscanf::slot::Slot;
use anyscanf::source::char_source;

fn rest_after(input: &str, template: &str, slots: &mut [Slot<'_>])
              -> Result<(ScanStatus, String)> {
    let mut src = char_source(input.as_bytes());
    let status = scan(&mut src, template, slots)?;
    let rest = String::from_utf8(src.read_rest()?)?;
    Ok((status, rest))
}

#[test]
fn percent_literal_after_conversion() -> Result<()> {
    let mut n = 0;
    let (status, rest) = rest_after("75%", "%d%%", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(n, 75);
    assert_eq!(rest, "");

    // a failing literal after a success doesn't take the success back
    let mut n = 0;
    let status = scan_str("75", "%d%%", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(n, 75);
    Ok(())
}

#[test]
fn slang_suffix_trims_line() -> Result<()> {
    let mut s = String::new();
    let (status, rest) = rest_after("  hello world  \n", "%z", &mut [Slot::string(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "hello world lol");
    assert_eq!(rest, "\n");
    Ok(())
}

#[test]
fn slang_suffix_on_blank_line() -> Result<()> {
    let mut s = String::new();
    let (status, rest) = rest_after("   \nnext\n", "%z", &mut [Slot::string(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "lol");
    assert_eq!(rest, "\nnext\n");

    // template whitespace is what moves on to the next line
    let (mut a, mut b) = (String::new(), String::new());
    let status = scan_str("\nnext\n", "%z %z", &mut [Slot::Text(&mut a), Slot::Text(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a.as_str(), b.as_str()), ("lol", "next lol"));
    Ok(())
}

#[test]
fn slang_suffix_variants() -> Result<()> {
    for (template, expected) in [("%z", "wow lol"),
                                 ("%!z", "wow lol!"),
                                 ("%!hz", "wow haha!"),
                                 ("%hz", "wow lol")] {
        let mut s = String::new();
        let status = scan_str("wow\n", template, &mut [Slot::Text(&mut s)])?;
        assert_eq!(status, ScanStatus::Assigned(1), "{template}");
        assert_eq!(s, expected, "{template}");
    }
    Ok(())
}

#[test]
fn width_limits_decimal() -> Result<()> {
    let mut n = 0;
    let (status, rest) = rest_after("12345", "%3d", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(n, 123);
    assert_eq!(rest, "45");
    Ok(())
}

#[test]
fn width_limits_string() -> Result<()> {
    let mut s = String::new();
    let (status, rest) = rest_after("abcdefgh", "%5s", &mut [Slot::string(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "abcde");
    assert_eq!(rest, "fgh");
    Ok(())
}

#[test]
fn string_capacity_limits() -> Result<()> {
    let mut s = String::new();
    let (status, rest) = rest_after("abcdefgh", "%s", &mut [Slot::Str(&mut s, 4)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "abc");
    assert_eq!(rest, "defgh");
    Ok(())
}

#[test]
fn stops_after_template() -> Result<()> {
    let (mut a, mut b) = (0, 0);
    let (status, rest) = rest_after("10 20 30", "%d %d",
                                    &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a, b), (10, 20));
    assert_eq!(rest, " 30");
    Ok(())
}

#[test]
fn suppression_skips_slot_and_count() -> Result<()> {
    let mut n = 0;
    let status = scan_str("1 2", "%*d %d", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(n, 2);

    let mut s = String::new();
    let status = scan_str("skip keep", "%*s %s", &mut [Slot::string(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "keep");
    Ok(())
}

#[test]
fn suppression_advances_input_like_assignment() -> Result<()> {
    for (suppressed, assigned, input) in [("%*d", "%d", " -123 x"),
                                          ("%*5s", "%5s", "abcdefg"),
                                          ("%*f", "%f", "1.5e3z"),
                                          ("%*3c", "%3c", "abcd"),
                                          ("%*x", "%x", "0x1fg")] {
        let mut src = char_source(input.as_bytes());
        scan(&mut src, suppressed, &mut [])?;
        let offset_suppressed = src.offset();
        let rest_suppressed = src.read_rest()?;

        let (mut i, mut s, mut f, mut cs) = (0, String::new(), 0f32, Vec::new());
        let slot = match assigned {
            "%d" | "%x" => Slot::Int(&mut i),
            "%5s" => Slot::string(&mut s),
            "%f" => Slot::Float(&mut f),
            _ => Slot::Chars(&mut cs),
        };
        let mut src = char_source(input.as_bytes());
        assert_eq!(scan(&mut src, assigned, &mut [slot])?, ScanStatus::Assigned(1));
        assert_eq!(src.offset(), offset_suppressed, "{assigned}");
        assert_eq!(src.read_rest()?, rest_suppressed, "{assigned}");
    }
    Ok(())
}

#[test]
fn suppressed_string_is_unbounded() -> Result<()> {
    let long = format!("{} tail", "w".repeat(300));
    let (status, rest) = rest_after(&long, "%*s", &mut [])?;
    assert_eq!(status, ScanStatus::Assigned(0));
    assert_eq!(rest, " tail");

    let mut text = String::new();
    let (_, rest) = rest_after(&long, "%s", &mut [Slot::Text(&mut text)])?;
    assert_eq!(text.len(), 300);
    assert_eq!(rest, " tail");

    // only a bounded destination stops early
    let mut s = String::new();
    let (_, rest) = rest_after(&long, "%s", &mut [Slot::string(&mut s)])?;
    assert_eq!(s.len(), 255);
    assert_eq!(rest.len(), 45 + " tail".len());
    Ok(())
}

#[test]
fn end_of_input_before_anything() -> Result<()> {
    let mut n = 0;
    for input in ["", "   ", " \n\t "] {
        let status = scan_str(input, "%d", &mut [Slot::Int(&mut n)])?;
        assert_eq!(status, ScanStatus::AtEnd);
        assert_eq!(status.code(), -1);
    }
    // suppressed conversions don't count as progress
    let status = scan_str("5", "%*d %d", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::AtEnd);
    Ok(())
}

#[test]
fn end_of_input_after_progress_reports_count() -> Result<()> {
    let (mut a, mut b) = (0, 0);
    let status = scan_str("5", "%d %d", &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(status.code(), 1);
    assert_eq!(a, 5);
    Ok(())
}

#[test]
fn no_match_halts_with_count() -> Result<()> {
    let (mut a, mut b) = (0, 0);
    let (status, rest) = rest_after("7 abc", "%d %d",
                                    &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(a, 7);
    assert_eq!(b, 0);
    assert_eq!(rest, "abc");

    let (status, rest) = rest_after("abc", "%d", &mut [Slot::Int(&mut a)])?;
    assert_eq!(status, ScanStatus::Assigned(0));
    assert_eq!(status.code(), 0);
    assert_eq!(rest, "abc");
    Ok(())
}

#[test]
fn literal_mismatch_pushes_back() -> Result<()> {
    let mut n = 0;
    let (status, rest) = rest_after("b5", "a%d", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(0));
    assert_eq!(rest, "b5");

    // end of stream while matching a literal is a mismatch, not AtEnd
    let status = scan_str("", "x%d", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(0));
    Ok(())
}

#[test]
fn literals_and_whitespace() -> Result<()> {
    let (mut a, mut b) = (0, 0);
    let status = scan_str("3,4", "%d,%d", &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a, b), (3, 4));

    // template whitespace matches any amount, including none
    let status = scan_str("1\n\n \t2", "%d %d", &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a, b), (1, 2));
    let status = scan_str("8:9", "%d : %d", &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a, b), (8, 9));
    Ok(())
}

#[test]
fn unknown_conversions_claim_no_slot() -> Result<()> {
    let (mut a, mut b) = (0, 0);
    let (status, rest) = rest_after("1 2", "%d %y %d",
                                    &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!((a, b), (1, 2));
    assert_eq!(rest, "");

    // and consume no input
    let (status, rest) = rest_after("xyz", "%5u", &mut [])?;
    assert_eq!(status, ScanStatus::Assigned(0));
    assert_eq!(rest, "xyz");
    Ok(())
}

#[test]
fn incomplete_conversion_ends_template() -> Result<()> {
    let mut n = 0;
    let (status, rest) = rest_after("5%", "%d%", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(rest, "%");
    let (status, _) = rest_after("5", "%d %12l", &mut [Slot::Int(&mut n)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    Ok(())
}

#[test]
fn mixed_conversions() -> Result<()> {
    let (mut i, mut f, mut s, mut c) = (0, 0f32, String::new(), 0u8);
    let status = scan_str("42 3.5 word x", "%d %f %s %c",
                          &mut [Slot::Int(&mut i), Slot::Float(&mut f),
                                Slot::string(&mut s), Slot::Char(&mut c)])?;
    assert_eq!(status, ScanStatus::Assigned(4));
    assert_eq!(i, 42);
    assert_eq!(f, 3.5);
    assert_eq!(s, "word");
    assert_eq!(c, b'x');
    Ok(())
}

#[test]
fn length_modifiers_select_slots() -> Result<()> {
    let (mut h, mut l, mut ll, mut d, mut ld) = (0i16, 0i64, 0i64, 0f64, 0f64);
    let status = scan_str("-7 9000000000 -1 2.25 1e300", "%hd %ld %lld %lf %Lf",
                          &mut [Slot::Short(&mut h), Slot::Long(&mut l),
                                Slot::LongLong(&mut ll), Slot::Double(&mut d),
                                Slot::LongDouble(&mut ld)])?;
    assert_eq!(status, ScanStatus::Assigned(5));
    assert_eq!(h, -7);
    assert_eq!(l, 9_000_000_000);
    assert_eq!(ll, -1);
    assert_eq!(d, 2.25);
    assert_eq!(ld, 1e300);
    Ok(())
}

#[test]
fn radix_conversions() -> Result<()> {
    let (mut b, mut x, mut i) = (0, 0, 0);
    let status = scan_str("0b1011 ff 0x10", "%b %x %x",
                          &mut [Slot::Int(&mut b), Slot::Int(&mut x), Slot::Int(&mut i)])?;
    assert_eq!(status, ScanStatus::Assigned(3));
    assert_eq!((b, x, i), (11, 255, 16));
    Ok(())
}

#[test]
fn char_conversions() -> Result<()> {
    let (mut c, mut cs) = (0u8, Vec::new());
    let (status, rest) = rest_after(" ab", "%c%c", &mut [Slot::Char(&mut c),
                                                         Slot::Chars(&mut cs)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!(c, b' ');
    assert_eq!(cs, b"a");
    assert_eq!(rest, "b");

    let (status, _) = rest_after("ab", "%5c", &mut [Slot::Chars(&mut cs)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(cs, b"ab");

    let status = scan_str("", "%c", &mut [Slot::Char(&mut c)])?;
    assert_eq!(status, ScanStatus::AtEnd);
    Ok(())
}

#[test]
fn cipher_conversions() -> Result<()> {
    let mut s = String::new();
    let (status, rest) = rest_after("abc xyz\nmore", "%3q", &mut [Slot::Text(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "def abc");
    assert_eq!(rest, "\nmore");

    // widths of 26 and more wrap around
    let status = scan_str("abc", "%29q", &mut [Slot::Text(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "def");

    let status = scan_str("aZ!", "%!1q", &mut [Slot::Text(&mut s)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!(s, "Ba!");

    let status = scan_str("\nabc", "%3q", &mut [Slot::Text(&mut s)])?;
    assert_eq!(status, ScanStatus::AtEnd);
    Ok(())
}

#[test]
fn cipher_round_trip() -> Result<()> {
    let line = "Hello, World! The quick brown fox; 0123 ~ zZ aA";
    for n in 0..30usize {
        for bang in ["", "!"] {
            let mut ciphered = String::new();
            scan_str(line, &format!("%{bang}{n}q"), &mut [Slot::Text(&mut ciphered)])?;
            let mut deciphered = String::new();
            let back = (26 - n % 26) % 26;
            scan_str(&ciphered, &format!("%{bang}{back}q"),
                     &mut [Slot::Text(&mut deciphered)])?;
            assert_eq!(deciphered, line, "rotation {n}{bang}");
        }
    }
    Ok(())
}

#[test]
fn missing_slot_is_an_error() -> Result<()> {
    let mut a = 0;
    let err = scan_str("1 2", "%d %d", &mut [Slot::Int(&mut a)]).unwrap_err();
    assert!(matches!(&err.err, ScanError::MissingSlot(d) if d.as_str() == "%d"));
    assert_eq!(a, 1);
    Ok(())
}

#[test]
fn slot_mismatch_is_rejected_before_reading() -> Result<()> {
    let mut n = 0;
    let mut src = char_source(&b"7"[..]);
    let err = scan(&mut src, "%ld", &mut [Slot::Int(&mut n)]).unwrap_err();
    assert!(matches!(&err.err, ScanError::SlotMismatch(d, "int") if d.as_str() == "%ld"));
    assert_eq!(src.read_rest()?, b"7");
    assert_eq!(err.to_string(), "'%ld' cannot be stored into a int destination @1.0");

    let mut c = 0u8;
    let err = scan_str("abc", "%3c", &mut [Slot::Char(&mut c)]).unwrap_err();
    assert!(matches!(err.err, ScanError::SlotMismatch(_, "char")));
    Ok(())
}

#[test]
fn extra_slots_are_left_alone() -> Result<()> {
    let (mut a, mut b) = (0, -1);
    let status = scan_str("4", "%d", &mut [Slot::Int(&mut a), Slot::Int(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(1));
    assert_eq!((a, b), (4, -1));
    Ok(())
}

#[test]
fn custom_suffixes() -> Result<()> {
    let suffixes = Suffixes { plain: " fr", exclaim: " fr!", exclaim_short: " ong!" };
    let settings = Settings { suffixes: &suffixes };
    let (mut a, mut b) = (String::new(), String::new());
    let mut src = char_source(&b"  real\nreal talk\n"[..]);
    let status = scan_with(&settings, &mut src, "%z %!hz",
                           &mut [Slot::Text(&mut a), Slot::Text(&mut b)])?;
    assert_eq!(status, ScanStatus::Assigned(2));
    assert_eq!(a, "real fr");
    assert_eq!(b, "real talk ong!");
    Ok(())
}

//! Lexical tokens: whitespace, comments, identifiers and special constants.
//!
//! Character-level pieces are plain functions over the context; the token
//! rules built from them are [`Gen`]s. Rules that only draw characters are
//! infallible, rules built with [`weighted_choice`] or [`one_of`] return
//! `Result` because those combinators validate their options.

use crate::errors::Result;
use crate::generator::{
    Gen, GenContext, empty, literal, one_of, optional, seq, weighted_choice,
};

/// Core keywords. Value identifiers re-draw until they avoid these.
pub const CORE_RESERVED: &[&str] = &[
    "abstype", "and", "andalso", "as", "case", "datatype", "do", "else", "end", "exception",
    "fn", "fun", "handle", "if", "in", "infix", "infixr", "let", "local", "nonfix", "of", "op",
    "open", "orelse", "raise", "rec", "then", "type", "val", "while", "with", "withtype",
];

/// Module-language keywords. Colliding identifiers get a trailing `_`.
pub const MODULE_RESERVED: &[&str] = &[
    "eqtype",
    "functor",
    "include",
    "sharing",
    "sig",
    "signature",
    "struct",
    "structure",
    "where",
];

pub const BUILTIN_VALUE_IDS: &[&str] = &["nil", "true", "false", "NONE", "SOME", "ref"];

pub const BUILTIN_TYPE_IDS: &[&str] = &[
    "int", "real", "bool", "string", "char", "unit", "list", "option", "ref", "word", "exn",
];

pub const INFIX_OPS: &[&str] = &[
    "+", "-", "*", "/", "div", "mod", "<", ">", "<=", ">=", "=", "<>", "::", "@", "^", "o",
    "before", ":=",
];

pub const PREFIX_OPS: &[&str] = &["!", "not", "~", "abs", "floor", "ceil", "trunc", "round"];

const SYMBOLIC_CHARS: &[char] = &[
    '!', '%', '&', '$', '#', '+', '-', '/', ':', '<', '=', '>', '?', '@', '\\', '~', '`', '^',
    '|', '*',
];

/// Symbolic identifiers that are reserved punctuation on their own.
const SYMBOLIC_RESERVED: &[&str] = &["#", "|", "=", ":", "=>", "->", ":>"];

const HEX_DIGITS: &[u8] = b"0123456789abcdefABCDEF";

/// Printable ASCII without `"` and `\`.
const PRINTABLE: &[u8] =
    b" !#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Named escapes with their weights. The remaining mass goes to `\ddd`
/// (0.03) and `\uXXXX` (0.02).
const NAMED_ESCAPES: &[(f64, &str)] = &[
    (0.15, "\\n"),
    (0.15, "\\t"),
    (0.10, "\\\\"),
    (0.10, "\\\""),
    (0.10, "\\a"),
    (0.10, "\\b"),
    (0.10, "\\v"),
    (0.10, "\\f"),
    (0.05, "\\r"),
];

pub fn is_core_reserved(id: &str) -> bool {
    CORE_RESERVED.contains(&id)
}

pub fn is_module_reserved(id: &str) -> bool {
    MODULE_RESERVED.contains(&id)
}

// ---------------------------------------------------------------------------
// Whitespace
// ---------------------------------------------------------------------------

pub fn space() -> Gen {
    literal(" ")
}

/// Zero or one space.
pub fn opt_ws() -> Gen {
    optional(space())
}

/// One or two spaces.
pub fn req_ws() -> Gen {
    seq([space(), opt_ws()])
}

/// `\n` or `\r\n`.
pub fn newline() -> Gen {
    literal("\n").or("\r\n")
}

pub fn opt_newline() -> Result<Gen> {
    let indent = literal("  ").or("\t");
    weighted_choice([
        (0.7, empty()),
        (0.2, newline()),
        (0.1, seq([newline(), indent])),
    ])
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Make `raw` safe to place between `(*` and `*)`.
///
/// Drops any character that would form `(*` or `*)` with its predecessor,
/// then strips leading `*`/`)` and trailing `(`/`*`, repeating until the
/// text no longer changes.
pub fn sanitize_comment(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let mut next = String::with_capacity(current.len());
        for c in current.chars() {
            let prev = next.chars().last();
            let opens = prev == Some('(') && c == '*';
            let closes = prev == Some('*') && c == ')';
            if !opens && !closes {
                next.push(c);
            }
        }
        let next = next
            .trim_start_matches(['*', ')'])
            .trim_end_matches(['(', '*'])
            .to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// `(*` + up to 19 sanitized Latin-1 characters + `*)`.
pub fn comment() -> Gen {
    Gen::from_fn(|ctx| {
        let len = ctx.gen_range(0..20);
        let raw: String = (0..len)
            .map(|_| char::from(ctx.gen_range(0..256) as u8))
            .collect();
        Ok(format!("(*{}*)", sanitize_comment(&raw)))
    })
}

pub fn opt_comment() -> Result<Gen> {
    weighted_choice([(0.9, empty()), (0.1, comment())])
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

fn lower(ctx: &mut GenContext) -> char {
    char::from(b'a' + ctx.gen_range(0..26) as u8)
}

fn upper(ctx: &mut GenContext) -> char {
    char::from(b'A' + ctx.gen_range(0..26) as u8)
}

fn letter(ctx: &mut GenContext) -> char {
    if ctx.coin() { lower(ctx) } else { upper(ctx) }
}

fn digit(ctx: &mut GenContext) -> char {
    char::from(b'0' + ctx.gen_range(0..10) as u8)
}

fn nonzero_digit(ctx: &mut GenContext) -> char {
    char::from(b'1' + ctx.gen_range(0..9) as u8)
}

fn hex_digit(ctx: &mut GenContext) -> char {
    char::from(HEX_DIGITS[ctx.gen_range(0..HEX_DIGITS.len())])
}

/// Letter 0.6, digit 0.2, `_` 0.1, `'` 0.1.
fn alphanum_char(ctx: &mut GenContext) -> char {
    let roll = ctx.unit_f64();
    if roll < 0.6 {
        letter(ctx)
    } else if roll < 0.8 {
        digit(ctx)
    } else if roll < 0.9 {
        '_'
    } else {
        '\''
    }
}

fn push_alphanum(ctx: &mut GenContext, out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(alphanum_char(ctx));
    }
}

fn repeat_char(ctx: &mut GenContext, n: usize, f: fn(&mut GenContext) -> char) -> String {
    (0..n).map(|_| f(ctx)).collect()
}

/// Decimal digits without a leading zero unless the number is one digit.
fn decimal_digits(ctx: &mut GenContext, n: usize) -> String {
    if n <= 1 {
        return digit(ctx).to_string();
    }
    let mut out = String::with_capacity(n);
    out.push(nonzero_digit(ctx));
    out.push_str(&repeat_char(ctx, n - 1, digit));
    out
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Letter followed by up to ten identifier characters.
pub fn alphanum_id() -> Gen {
    Gen::from_fn(|ctx| {
        let mut id = letter(ctx).to_string();
        let rest = ctx.gen_range(0..11);
        push_alphanum(ctx, &mut id, rest);
        Ok(id)
    })
}

fn short_id(ctx: &mut GenContext) -> String {
    let mut id = lower(ctx).to_string();
    let rest = ctx.gen_range(0..3);
    push_alphanum(ctx, &mut id, rest);
    id
}

/// Lowercase letter followed by up to two identifier characters.
pub fn short_alphanum_id() -> Gen {
    Gen::from_fn(|ctx| Ok(short_id(ctx)))
}

/// One to three symbolic characters, never reserved punctuation.
pub fn symbolic_id() -> Gen {
    Gen::from_fn(|ctx| {
        loop {
            let len = ctx.random_in(1, 3);
            let id: String = (0..len)
                .filter_map(|_| ctx.pick(SYMBOLIC_CHARS).copied())
                .collect();
            if !SYMBOLIC_RESERVED.contains(&id.as_str()) {
                return Ok(id);
            }
        }
    })
}

pub fn type_var() -> Gen {
    seq([literal("'"), alphanum_id()])
}

pub fn eq_type_var() -> Gen {
    seq([literal("''"), alphanum_id()])
}

pub fn any_type_var() -> Result<Gen> {
    weighted_choice([(0.8, type_var()), (0.2, eq_type_var())])
}

/// Short identifier that is never a core keyword; module keywords get `_`.
pub fn value_id() -> Gen {
    Gen::from_fn(|ctx| {
        let mut id = short_id(ctx);
        while is_core_reserved(&id) {
            id = short_id(ctx);
        }
        if is_module_reserved(&id) {
            id.push('_');
        }
        Ok(id)
    })
}

pub fn tycon_id() -> Gen {
    value_id()
}

/// Capitalised identifier, up to five characters.
pub fn struct_id() -> Gen {
    Gen::from_fn(|ctx| {
        let mut id = upper(ctx).to_string();
        let rest = ctx.gen_range(0..5);
        push_alphanum(ctx, &mut id, rest);
        Ok(id)
    })
}

pub fn long_value_id() -> Result<Gen> {
    weighted_choice([
        (0.8, value_id()),
        (0.2, seq([struct_id(), literal("."), value_id()])),
    ])
}

pub fn long_tycon_id() -> Result<Gen> {
    weighted_choice([
        (0.8, tycon_id()),
        (0.2, seq([struct_id(), literal("."), tycon_id()])),
    ])
}

/// Record label: a value identifier or a numeric label `1..=10`.
pub fn label() -> Result<Gen> {
    let numeric = Gen::from_fn(|ctx| Ok(ctx.random_in(1, 10).to_string()));
    weighted_choice([(0.8, value_id()), (0.2, numeric)])
}

/// Fixity precedence digit.
pub fn precedence() -> Gen {
    Gen::from_fn(|ctx| Ok(digit(ctx).to_string()))
}

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------

fn negated(ctx: &mut GenContext) -> bool {
    ctx.gen_range(0..10) == 0
}

/// One to five digits, negated one time in ten.
pub fn decimal_int() -> Gen {
    Gen::from_fn(|ctx| {
        let negative = negated(ctx);
        let n = ctx.random_in(1, 5);
        let digits = decimal_digits(ctx, n);
        Ok(if negative { format!("~{digits}") } else { digits })
    })
}

pub fn hex_int() -> Gen {
    Gen::from_fn(|ctx| {
        let negative = negated(ctx);
        let n = ctx.random_in(1, 4);
        let digits = repeat_char(ctx, n, hex_digit);
        let prefix = if negative { "~0x" } else { "0x" };
        Ok(format!("{prefix}{digits}"))
    })
}

/// `0w` decimal or `0wx` hexadecimal word.
pub fn word_const() -> Gen {
    Gen::from_fn(|ctx| {
        let hex = ctx.coin();
        let n = ctx.random_in(1, 4);
        if hex {
            Ok(format!("0wx{}", repeat_char(ctx, n, hex_digit)))
        } else {
            Ok(format!("0w{}", repeat_char(ctx, n, digit)))
        }
    })
}

pub fn int_const() -> Result<Gen> {
    weighted_choice([(0.8, decimal_int()), (0.2, hex_int())])
}

/// Real literal. Always contains a `.` or an exponent marker.
pub fn real_const() -> Gen {
    Gen::from_fn(|ctx| {
        let negative = negated(ctx);
        let n = ctx.random_in(1, 4);
        let int_part = decimal_digits(ctx, n);
        let has_frac = ctx.coin();
        let has_exp = ctx.coin();

        let mut out = String::new();
        if negative {
            out.push('~');
        }
        out.push_str(&int_part);
        if has_frac {
            out.push('.');
            let n = ctx.random_in(1, 3);
            out.push_str(&repeat_char(ctx, n, digit));
        }
        if has_exp {
            out.push(if ctx.coin() { 'e' } else { 'E' });
            if ctx.coin() {
                out.push('~');
            }
            let n = ctx.random_in(1, 2);
            out.push_str(&repeat_char(ctx, n, digit));
        }
        if !has_frac && !has_exp {
            out.push_str(".0");
        }
        Ok(out)
    })
}

// ---------------------------------------------------------------------------
// String and character constants
// ---------------------------------------------------------------------------

fn printable(ctx: &mut GenContext) -> char {
    char::from(PRINTABLE[ctx.gen_range(0..PRINTABLE.len())])
}

fn escape(ctx: &mut GenContext) -> String {
    let mut roll = ctx.unit_f64();
    for (weight, text) in NAMED_ESCAPES {
        roll -= weight;
        if roll <= 0.0 {
            return (*text).to_string();
        }
    }
    if ctx.gen_bool(0.6) {
        format!("\\{:03}", ctx.gen_range(0..256))
    } else {
        let hex = repeat_char(ctx, 4, hex_digit);
        format!("\\u{hex}")
    }
}

fn string_element(ctx: &mut GenContext, out: &mut String) {
    if ctx.gen_bool(0.85) {
        out.push(printable(ctx));
    } else {
        out.push_str(&escape(ctx));
    }
}

/// Quoted string of up to fourteen elements.
pub fn string_const() -> Gen {
    Gen::from_fn(|ctx| {
        let len = ctx.gen_range(0..15);
        let mut out = String::from("\"");
        for _ in 0..len {
            string_element(ctx, &mut out);
        }
        out.push('"');
        Ok(out)
    })
}

/// `#"c"`, escaped one time in five.
pub fn char_const() -> Gen {
    Gen::from_fn(|ctx| {
        let content = if ctx.gen_range(0..5) == 0 {
            escape(ctx)
        } else {
            printable(ctx).to_string()
        };
        Ok(format!("#\"{content}\""))
    })
}

// ---------------------------------------------------------------------------
// Constants and builtin names
// ---------------------------------------------------------------------------

pub fn constant() -> Result<Gen> {
    weighted_choice([
        (0.35, int_const()?),
        (0.15, word_const()),
        (0.15, real_const()),
        (0.25, string_const()),
        (0.10, char_const()),
    ])
}

/// Constants allowed in patterns: no reals.
pub fn pattern_constant() -> Result<Gen> {
    weighted_choice([
        (0.40, int_const()?),
        (0.20, word_const()),
        (0.25, string_const()),
        (0.15, char_const()),
    ])
}

pub fn builtin_value_id() -> Result<Gen> {
    one_of(BUILTIN_VALUE_IDS)
}

pub fn builtin_type_id() -> Result<Gen> {
    one_of(BUILTIN_TYPE_IDS)
}

pub fn infix_op() -> Result<Gen> {
    one_of(INFIX_OPS)
}

pub fn prefix_op() -> Result<Gen> {
    one_of(PREFIX_OPS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationConfig;

    fn ctx() -> GenContext {
        GenContext::new(2024, GenerationConfig::default())
    }

    fn samples(g: &Gen, n: usize) -> Vec<String> {
        let mut c = ctx();
        (0..n).map(|_| g.generate(&mut c).unwrap()).collect()
    }

    fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '\''
    }

    #[test]
    fn whitespace_shapes() {
        for s in samples(&req_ws(), 50) {
            assert!(s == " " || s == "  ", "{s:?}");
        }
        for s in samples(&opt_ws(), 50) {
            assert!(s.is_empty() || s == " ", "{s:?}");
        }
        for s in samples(&opt_newline().unwrap(), 100) {
            assert!(s.chars().all(|c| c == '\n' || c == '\r' || c == ' ' || c == '\t'));
        }
    }

    #[test]
    fn sanitize_strips_boundary_markers() {
        assert_eq!(sanitize_comment("*abc("), "abc");
        assert_eq!(sanitize_comment(")*x*("), "x");
        assert_eq!(sanitize_comment("(*)"), "()");
        assert_eq!(sanitize_comment("a(*b*)c"), "a(b*c");
        assert_eq!(sanitize_comment("***"), "");
    }

    #[test]
    fn sanitize_exposed_markers_are_removed() {
        // Dropping the `*` leaves a trailing `(`.
        assert_eq!(sanitize_comment("ab(*"), "ab");
        assert_eq!(sanitize_comment("*)*)z"), "z");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = ["", "(", "*", "((**))", "x(*y*)z", ")(*", "a*)(*b", "((((*"];
        for input in inputs {
            let once = sanitize_comment(input);
            assert_eq!(sanitize_comment(&once), once, "input {input:?}");
            let wrapped = format!("(*{once}*)");
            assert!(!wrapped[2..wrapped.len() - 2].contains("(*"), "{wrapped:?}");
            assert!(!wrapped[2..wrapped.len() - 2].contains("*)"), "{wrapped:?}");
            assert_eq!(wrapped.matches("(*").count(), 1, "{wrapped:?}");
            assert_eq!(wrapped.matches("*)").count(), 1, "{wrapped:?}");
        }
    }

    #[test]
    fn comments_never_nest() {
        for s in samples(&comment(), 500) {
            assert!(s.starts_with("(*") && s.ends_with("*)"));
            let inner: String = s.chars().skip(2).collect();
            let inner: String = inner.chars().take(inner.chars().count() - 2).collect();
            assert!(!inner.contains("(*"), "{s:?}");
            assert!(!inner.contains("*)"), "{s:?}");
            assert_eq!(s.matches("(*").count(), 1, "{s:?}");
            assert_eq!(s.matches("*)").count(), 1, "{s:?}");
        }
    }

    #[test]
    fn value_ids_avoid_keywords() {
        for id in samples(&value_id(), 2000) {
            assert!(!is_core_reserved(&id), "{id}");
            let base = id.strip_suffix('_').unwrap_or(&id);
            if id.ends_with('_') && is_module_reserved(base) {
                continue;
            }
            assert!(!is_module_reserved(&id), "{id}");
            assert!(id.chars().next().unwrap().is_ascii_lowercase());
            assert!(id.chars().all(is_ident_char), "{id}");
        }
    }

    #[test]
    fn identifiers_are_well_formed() {
        for id in samples(&alphanum_id(), 200) {
            assert!(id.chars().next().unwrap().is_ascii_alphabetic());
            assert!(id.chars().count() <= 11);
            assert!(id.chars().all(is_ident_char));
        }
        for id in samples(&struct_id(), 200) {
            assert!(id.chars().next().unwrap().is_ascii_uppercase());
            assert!(id.chars().count() <= 5);
        }
        for tv in samples(&any_type_var().unwrap(), 200) {
            assert!(tv.starts_with('\''));
        }
    }

    #[test]
    fn symbolic_ids_avoid_lone_reserved() {
        for id in samples(&symbolic_id(), 500) {
            assert!((1..=3).contains(&id.chars().count()));
            assert!(!SYMBOLIC_RESERVED.contains(&id.as_str()), "{id}");
            assert!(id.chars().all(|c| SYMBOLIC_CHARS.contains(&c)));
        }
    }

    #[test]
    fn long_ids_are_optionally_qualified() {
        for id in samples(&long_value_id().unwrap(), 300) {
            match id.split_once('.') {
                Some((s, v)) => {
                    assert!(s.chars().next().unwrap().is_ascii_uppercase());
                    assert!(!is_core_reserved(v));
                }
                None => assert!(!is_core_reserved(&id)),
            }
        }
    }

    #[test]
    fn labels_are_ids_or_small_numbers() {
        for l in samples(&label().unwrap(), 300) {
            if let Ok(n) = l.parse::<u32>() {
                assert!((1..=10).contains(&n));
            } else {
                assert!(!is_core_reserved(&l));
            }
        }
    }

    #[test]
    fn decimal_ints_have_no_leading_zero() {
        for s in samples(&decimal_int(), 500) {
            let digits = s.strip_prefix('~').unwrap_or(&s);
            assert!((1..=5).contains(&digits.len()), "{s}");
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            if digits.len() > 1 {
                assert!(!digits.starts_with('0'), "{s}");
            }
        }
    }

    #[test]
    fn hex_and_word_prefixes() {
        for s in samples(&hex_int(), 200) {
            assert!(s.starts_with("0x") || s.starts_with("~0x"), "{s}");
        }
        for s in samples(&word_const(), 200) {
            assert!(s.starts_with("0w"), "{s}");
            assert!(!s.contains('~'));
        }
    }

    #[test]
    fn reals_are_distinguishable_from_ints() {
        for s in samples(&real_const(), 1000) {
            assert!(
                s.contains('.') || s.contains('e') || s.contains('E'),
                "real without fraction or exponent: {s}"
            );
        }
    }

    #[test]
    fn strings_are_well_formed() {
        for s in samples(&string_const(), 500) {
            assert!(s.len() >= 2 && s.starts_with('"') && s.ends_with('"'));
            let inner = &s[1..s.len() - 1];
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                assert_ne!(c, '"', "unescaped quote in {s}");
                if c == '\\' {
                    let e = chars.next().expect("dangling backslash");
                    match e {
                        'n' | 't' | '\\' | '"' | 'a' | 'b' | 'v' | 'f' | 'r' => {}
                        'u' => {
                            for _ in 0..4 {
                                assert!(chars.next().unwrap().is_ascii_hexdigit(), "{s}");
                            }
                        }
                        d if d.is_ascii_digit() => {
                            for _ in 0..2 {
                                assert!(chars.next().unwrap().is_ascii_digit(), "{s}");
                            }
                        }
                        other => panic!("bad escape \\{other} in {s}"),
                    }
                }
            }
        }
    }

    #[test]
    fn chars_hold_one_element() {
        for s in samples(&char_const(), 300) {
            assert!(s.starts_with("#\"") && s.ends_with('"'), "{s}");
            let inner = &s[2..s.len() - 1];
            assert!(inner.len() == 1 || inner.starts_with('\\'), "{s}");
        }
    }

    #[test]
    fn pattern_constants_exclude_reals() {
        for s in samples(&pattern_constant().unwrap(), 500) {
            if s.starts_with('"') || s.starts_with('#') {
                continue;
            }
            let body = s.trim_start_matches('~');
            if body.starts_with("0x") || body.starts_with("0w") {
                continue;
            }
            assert!(!s.contains('.') && !s.contains('e') && !s.contains('E'), "{s}");
        }
    }

    #[test]
    fn builtin_tables_are_drawn_from() {
        let g = builtin_value_id().unwrap();
        for s in samples(&g, 100) {
            assert!(BUILTIN_VALUE_IDS.contains(&s.as_str()));
        }
        let g = infix_op().unwrap();
        for s in samples(&g, 100) {
            assert!(INFIX_OPS.contains(&s.as_str()));
        }
    }

    #[test]
    fn keyword_tables_do_not_overlap() {
        for k in MODULE_RESERVED {
            assert!(!is_core_reserved(k));
        }
    }
}

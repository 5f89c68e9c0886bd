//! Catalog of unusual but valid fragments.
//!
//! Mixed into extreme-tier programs when obscure features are enabled.

use crate::errors::Result;
use crate::generator::{Gen, empty, literal, one_of, seq, weighted_choice};

use super::expressions::{op_expression, simple_expression};
use super::lexical::{opt_ws, precedence, req_ws, value_id};

pub const OBSCURE_SYMBOLIC_IDS: &[&str] = &[
    "!!!", "%%%", "&&&", "???", "<<<", ">>>", "~~~", "+-+", "<=>", "|>", "<|", ">>>=",
    "<<<<=", r"\\\", "^^^", "$$$", "@@@", "***",
];

pub const OBSCURE_NUMERICS: &[&str] = &[
    "0",
    "~0",
    "0x0",
    "~0x0",
    "0w0",
    "0wx0",
    "0.0",
    "~0.0",
    "0E0",
    "0.0e~0",
    "1E~10",
    "9999999999",
    "0xFFFFFFFF",
    "0wFFFFFFFF",
    "123456789.987654321",
    "1.0e10",
    "~1.0E~10",
];

pub const OBSCURE_STRINGS: &[&str] = &[
    r#""""#,
    r#""\n\t\r\f\v\b\a""#,
    r#""\\\"""#,
    r#""\000\001\127\255""#,
    r#""\u0000\u00FF\uFFFF""#,
    r#""a\^@b\^Ac\^_d""#,
    // Gaps: a backslash, whitespace, a backslash.
    r#""\ \""#,
    "\"\\\n\\\"",
    "\"\\\t\n \\\"",
    "\"αβγδ\"",
    "\"日本語\"",
    "\"🎉\"",
    r#""\u03B1\u03B2\u03B3""#,
];

pub const OBSCURE_CHARS: &[&str] = &[
    r#"#"\n""#,
    r#"#"\t""#,
    r#"#"\\""#,
    r#"#"\"""#,
    r#"#"\000""#,
    r#"#"\255""#,
    r##"#" ""##,
    r#"#"\u0000""#,
    r#"#"\u00FF""#,
];

pub fn obscure_symbolic_id() -> Result<Gen> {
    one_of(OBSCURE_SYMBOLIC_IDS)
}

pub fn obscure_numeric() -> Result<Gen> {
    one_of(OBSCURE_NUMERICS)
}

pub fn obscure_string() -> Result<Gen> {
    one_of(OBSCURE_STRINGS)
}

pub fn obscure_char() -> Result<Gen> {
    one_of(OBSCURE_CHARS)
}

/// Numeric 0.4, string 0.3, char 0.3.
pub fn obscure_constant() -> Result<Gen> {
    weighted_choice([
        (0.4, obscure_numeric()?),
        (0.3, obscure_string()?),
        (0.3, obscure_char()?),
    ])
}

pub fn obscure_pattern() -> Result<Gen> {
    weighted_choice([
        (0.2, literal("(_, _, _)")),
        (0.2, literal("((x, y), (z, w))")),
        (0.2, seq([value_id(), literal(" : int")])),
        (0.2, seq([value_id(), literal(" as "), value_id()])),
        (0.2, literal("{...}")),
    ])
}

/// `val <obscure pattern> = <simple expression>`, so a catalog pattern can
/// stand on its own at top level.
pub fn obscure_pattern_binding() -> Result<Gen> {
    Ok(seq([
        literal("val "),
        obscure_pattern()?,
        opt_ws(),
        literal("="),
        opt_ws(),
        simple_expression()?,
    ]))
}

pub fn obscure_expression() -> Result<Gen> {
    weighted_choice([
        (0.15, literal("(1 < 2) andalso (2 < 3)")),
        (0.15, op_expression()?),
        (0.15, seq([literal("#1"), req_ws(), literal("(1, 2)")])),
        (0.15, literal(r#"(raise Fail "x") handle Fail _ => 0"#)),
        (0.10, literal("fn x => fn y => x + y")),
        (0.10, empty().wrap_brackets()),
        (0.10, empty().wrap_parens()),
        (0.10, literal(r#"print "a"; print "b"; ()"#).wrap_parens()),
    ])
}

pub fn obscure_declaration() -> Result<Gen> {
    let symbolic_fixity = seq([
        literal("infixr "),
        precedence(),
        literal(" "),
        obscure_symbolic_id()?,
    ]);
    weighted_choice([
        (0.20, literal("fun f x = g x and g x = f x")),
        (0.20, literal("datatype t = A | B of int | C of int * int")),
        (0.15, literal("type 'a pair = 'a * 'a")),
        (0.15, literal("infix 5 +++")),
        (0.15, literal("exception MyExn of string")),
        (0.15, literal("local val x = 1 in val y = x end")),
        (0.10, symbolic_fixity),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenContext, GenerationConfig};

    fn samples(g: &Gen, n: usize) -> Vec<String> {
        let mut ctx = GenContext::new(99, GenerationConfig::new(3, 2));
        (0..n).map(|_| g.generate(&mut ctx).unwrap()).collect()
    }

    #[test]
    fn tables_are_non_empty() {
        for table in [
            OBSCURE_SYMBOLIC_IDS,
            OBSCURE_NUMERICS,
            OBSCURE_STRINGS,
            OBSCURE_CHARS,
        ] {
            assert!(!table.is_empty());
            assert!(table.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn strings_are_quoted() {
        for s in OBSCURE_STRINGS {
            assert!(s.starts_with('"') && s.ends_with('"'), "{s}");
            assert!(s.chars().count() >= 2);
        }
        for c in OBSCURE_CHARS {
            assert!(c.starts_with("#\"") && c.ends_with('"'), "{c}");
        }
    }

    #[test]
    fn non_ascii_strings_are_real_utf8() {
        assert!(OBSCURE_STRINGS.contains(&"\"αβγδ\""));
        assert!(OBSCURE_STRINGS.iter().any(|s| !s.is_ascii()));
    }

    #[test]
    fn gap_strings_contain_whitespace_between_backslashes() {
        let gaps: Vec<&&str> = OBSCURE_STRINGS
            .iter()
            .filter(|s| s.contains("\\ ") || s.contains("\\\n") || s.contains("\\\t"))
            .collect();
        assert_eq!(gaps.len(), 3);
    }

    #[test]
    fn symbolic_ids_are_symbolic() {
        for id in OBSCURE_SYMBOLIC_IDS {
            assert!(!id.chars().any(|c| c.is_ascii_alphanumeric()), "{id}");
            assert!(*id != "|" && *id != "#");
        }
    }

    #[test]
    fn pattern_bindings_start_with_val() {
        let g = obscure_pattern_binding().unwrap();
        for b in samples(&g, 50) {
            assert!(b.starts_with("val "), "{b}");
            assert!(b.contains('='), "{b}");
        }
    }

    #[test]
    fn obscure_declarations_are_declarations() {
        let g = obscure_declaration().unwrap();
        for d in samples(&g, 100) {
            let first = d.split_whitespace().next().unwrap();
            assert!(
                ["fun", "datatype", "type", "infix", "infixr", "exception", "local"]
                    .contains(&first),
                "{d}"
            );
        }
    }

    #[test]
    fn obscure_expressions_never_close_a_comment() {
        let g = obscure_expression().unwrap();
        for e in samples(&g, 200) {
            assert!(!e.contains("*)"), "{e}");
        }
    }
}

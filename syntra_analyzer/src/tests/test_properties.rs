//! Property tests over generated token soups and generated well-formed programs.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::check;
use crate::lexer::{Keyword, Number, Token, TokenKind, lex};

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
        .prop_filter("keywords and comments are not identifiers", |s| {
            Keyword::lookup(s).is_none() && !s.starts_with("note")
        })
}

fn arb_int() -> impl Strategy<Value = String> {
    (0u32..100_000).prop_map(|n| n.to_string())
}

fn arb_float() -> impl Strategy<Value = String> {
    "[0-9]{1,4}\\.[0-9]{1,3}"
}

fn arb_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,10}".prop_map(|s| format!("\"{s}\""))
}

fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_int(),
        arb_float(),
        arb_string(),
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")]
}

fn arb_compare() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("=="),
        Just("!="),
        Just("<"),
        Just("<="),
        Just(">"),
        Just(">="),
    ]
}

fn arb_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("point"), Just("distance"), Just("name"), Just("flag")]
}

/// Any single token, rendered as source text.
fn arb_token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_ident(),
        arb_literal(),
        arb_binop().prop_map(str::to_string),
        arb_compare().prop_map(str::to_string),
        arb_type().prop_map(str::to_string),
        prop_oneof![Just("{"), Just("}"), Just("("), Just(")"), Just(";"), Just(",")]
            .prop_map(str::to_string),
    ]
}

fn arb_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![arb_literal(), arb_ident()];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            (arb_ident(), vec(inner, 0..3))
                .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
        ]
    })
}

fn arb_condition() -> impl Strategy<Value = String> {
    (arb_expr(), arb_compare(), arb_expr()).prop_map(|(l, op, r)| format!("{l} {op} {r}"))
}

fn arb_var_decl() -> impl Strategy<Value = String> {
    (arb_type(), arb_ident(), arb_expr()).prop_map(|(ty, name, e)| format!("{ty} {name} = {e};"))
}

fn arb_statement() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        arb_var_decl(),
        (arb_ident(), arb_expr()).prop_map(|(name, e)| format!("{name} = {e};")),
        arb_expr().prop_map(|e| format!("show {e};")),
        arb_ident().prop_map(|name| format!("get {name};")),
        arb_expr().prop_map(|e| format!("give {e};")),
        arb_expr().prop_map(|e| format!("{e};")),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let block = vec(inner, 0..3)
            .prop_map(|stmts| format!("{{ {} }}", stmts.join(" ")))
            .boxed();
        prop_oneof![
            (arb_condition(), block.clone(), prop::option::of(block.clone())).prop_map(
                |(cond, then, otherwise)| match otherwise {
                    Some(e) => format!("when ({cond}) {then} otherwise {e}"),
                    None => format!("when ({cond}) {then}"),
                }
            ),
            (arb_condition(), block.clone())
                .prop_map(|(cond, body)| format!("loop ({cond}) {body}")),
            (arb_var_decl(), arb_condition(), arb_expr(), block).prop_map(
                |(init, cond, step, body)| format!("repeat ({init} {cond}; {step}) {body}")
            ),
        ]
    })
}

fn arb_action() -> impl Strategy<Value = String> {
    let param = (arb_type(), arb_ident()).prop_map(|(ty, name)| format!("{ty} {name}"));
    (arb_ident(), vec(param, 0..3), vec(arb_statement(), 0..4)).prop_map(
        |(name, params, body)| {
            format!(
                "action {name}({}) {{\n  {}\n}}",
                params.join(", "),
                body.join("\n  ")
            )
        },
    )
}

fn arb_program() -> impl Strategy<Value = String> {
    (vec(arb_ident(), 0..3), vec(arb_action(), 0..3)).prop_map(|(uses, actions)| {
        let mut src: String = uses.iter().map(|u| format!("use {u};\n")).collect();
        src.push_str(&actions.join("\n\n"));
        src
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn trivia_only_input_has_no_tokens(input in "[ \t\r\n]{0,20}(note[^\n]{0,20})?[ \t\r\n]{0,5}") {
        prop_assert!(lex(&input).is_ok_and(|toks| toks.is_empty()));
    }

    #[test]
    fn string_values_drop_their_quotes(body in "[a-zA-Z0-9 ]{0,10}") {
        let toks = lex(&format!("\"{body}\"")).unwrap();
        prop_assert_eq!(toks.len(), 1);
        prop_assert_eq!(toks[0].kind.value(), body);
    }

    #[test]
    fn number_kind_follows_fraction(int in arb_int(), float in arb_float()) {
        let toks = lex(&format!("{int} {float}")).unwrap();
        prop_assert!(matches!(toks[0].kind, TokenKind::Number(Number::Int(_))));
        prop_assert!(matches!(toks[1].kind, TokenKind::Number(Number::Float(_))));
    }

    /// Spans are ordered, disjoint, and slice back to the token text.
    #[test]
    fn spans_cover_token_text(parts in vec(arb_token_text(), 0..20)) {
        let src = parts.join(" ");
        let toks = lex(&src).unwrap();
        prop_assert_eq!(toks.len(), parts.len());
        for pair in toks.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for (tok, part) in toks.iter().zip(&parts) {
            prop_assert_eq!(tok.span.text(&src), part.as_str());
        }
    }

    /// Lexing the exact source text of each token again yields the same kinds.
    #[test]
    fn relexing_token_substrings_is_stable(parts in vec(arb_token_text(), 0..20)) {
        let src = parts.join(" ");
        let first = lex(&src).unwrap();
        let texts: Vec<&str> = first.iter().map(|t| t.span.text(&src)).collect();
        let second = lex(&texts.join(" ")).unwrap();
        let kinds = |toks: &[Token]| -> Vec<TokenKind> {
            toks.iter().map(|t| t.kind.clone()).collect()
        };
        prop_assert_eq!(kinds(&first), kinds(&second));
    }

    #[test]
    fn large_integers_keep_their_digits(digits in "[1-9][0-9]{19,40}") {
        let toks = lex(&digits).unwrap();
        prop_assert_eq!(toks.len(), 1);
        prop_assert!(matches!(toks[0].kind, TokenKind::Number(Number::BigInt(_))));
        prop_assert_eq!(toks[0].kind.value(), digits);
    }

    #[test]
    fn generated_programs_are_accepted(src in arb_program()) {
        let result = check(&src);
        prop_assert!(result.is_ok(), "rejected:\n{}\n{:?}", src, result.err());
    }

    #[test]
    fn check_never_panics(input in ".{0,100}") {
        let _ = check(&input);
    }

    #[test]
    fn check_never_panics_on_token_soup(parts in vec(arb_token_text(), 0..30)) {
        let _ = check(&parts.join(" "));
    }
}

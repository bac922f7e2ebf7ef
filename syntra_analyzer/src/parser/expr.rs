//! Expression parsing.
//!
//! Two fixed precedence layers, both left-associative:
//!
//! ```text
//! Expr   → Term (("+" | "-") Term)*
//! Term   → Factor (("*" | "/") Factor)*
//! ```
//!
//! `Condition` sits on top and allows exactly one comparison. There are no logical operators
//! and no unary operators: `!` and `-` only ever appear as part of an operator run.

use super::{PResult, Parser, Rule};
use crate::error::{Construct, Expected};
use crate::lexer::{Delim, TokenKind};

const COMPARE_OPS: [&str; 6] = ["==", "!=", "<", "<=", ">", ">="];
const ADDITIVE_OPS: [&str; 2] = ["+", "-"];
const MULTIPLICATIVE_OPS: [&str; 2] = ["*", "/"];

impl Parser {
    /// `Condition → Expr CompareOp Expr`
    pub(super) fn parse_condition(&mut self) -> PResult<()> {
        self.node(Rule::Condition, |p| {
            p.parse_expr()?;

            if COMPARE_OPS.iter().any(|op| p.at_op(op)) {
                p.bump();
            } else {
                return Err(p.unexpected(Expected::Construct(Construct::ComparisonOperator)));
            }

            p.parse_expr()
        })
    }

    /// `Expr → Term (("+" | "-") Term)*`
    ///
    /// Every parenthesized expression and call argument re-enters here, so this is where
    /// expression nesting is counted.
    pub(super) fn parse_expr(&mut self) -> PResult<()> {
        self.nested(|p| {
            p.node(Rule::Expr, |p| {
                p.parse_term()?;
                while ADDITIVE_OPS.iter().any(|op| p.at_op(op)) {
                    p.bump();
                    p.parse_term()?;
                }
                Ok(())
            })
        })
    }

    /// `Term → Factor (("*" | "/") Factor)*`
    fn parse_term(&mut self) -> PResult<()> {
        self.node(Rule::Term, |p| {
            p.parse_factor()?;
            while MULTIPLICATIVE_OPS.iter().any(|op| p.at_op(op)) {
                p.bump();
                p.parse_factor()?;
            }
            Ok(())
        })
    }

    /// ```text
    /// Factor → NUMBER | STRING | IDENT | "(" Expr ")" | IDENT "(" ExprList? ")"
    /// ```
    ///
    /// An identifier directly followed by `(` is a call; otherwise it is a variable.
    /// `true` and `false` are ordinary identifiers.
    fn parse_factor(&mut self) -> PResult<()> {
        match self.cur_kind() {
            Some(TokenKind::Number(_) | TokenKind::String(_)) => self.node(Rule::Literal, |p| {
                p.bump();
                Ok(())
            }),
            Some(TokenKind::Symbol(Delim::OpenParen)) => self.node(Rule::Paren, |p| {
                p.bump(); // '('
                p.parse_expr()?;
                p.expect_delim(Delim::CloseParen)
            }),
            Some(TokenKind::Ident(_))
                if self
                    .peek_kind(1)
                    .is_some_and(|k| k.is_delim(Delim::OpenParen)) =>
            {
                self.parse_call()
            }
            Some(TokenKind::Ident(_)) => self.node(Rule::Variable, |p| {
                p.bump();
                Ok(())
            }),
            _ => Err(self.unexpected(Expected::Construct(Construct::Factor))),
        }
    }

    /// `IDENT "(" ExprList? ")"`
    fn parse_call(&mut self) -> PResult<()> {
        self.node(Rule::Call, |p| {
            p.expect_ident()?;
            p.expect_delim(Delim::OpenParen)?;

            if p.can_begin_expr() {
                p.parse_expr_list()?;
            }

            p.expect_delim(Delim::CloseParen)
        })
    }

    /// `ExprList → Expr ("," Expr)*`
    fn parse_expr_list(&mut self) -> PResult<()> {
        self.node(Rule::ExprList, |p| {
            p.parse_expr()?;
            while p.eat_delim(Delim::Comma) {
                p.parse_expr()?;
            }
            Ok(())
        })
    }
}

//! Top-level items: `Program`, `UseDecl`, `Action` and their parameter lists and blocks.

use super::{PResult, Parser, Rule};
use crate::error::Expected;
use crate::lexer::{Delim, Keyword};

impl Parser {
    /// `Program → UseDecl* Action*`
    ///
    /// Every token must be consumed; anything left after the last action is an error.
    pub(super) fn parse_program(&mut self) -> PResult<()> {
        self.node(Rule::Program, |p| {
            while p.at_keyword(Keyword::Use) {
                p.parse_use_decl()?;
            }

            while p.at_keyword(Keyword::Action) {
                p.parse_action()?;
            }

            if p.token_cursor.is_at_end() {
                Ok(())
            } else {
                Err(p.unexpected(Expected::EndOfInput))
            }
        })
    }

    /// `UseDecl → "use" IDENT ";"`
    fn parse_use_decl(&mut self) -> PResult<()> {
        self.node(Rule::UseDecl, |p| {
            p.expect_keyword(Keyword::Use)?;
            p.expect_ident()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `Action → "action" IDENT "(" ParamList? ")" Block`
    fn parse_action(&mut self) -> PResult<()> {
        self.node(Rule::Action, |p| {
            p.expect_keyword(Keyword::Action)?;
            p.expect_ident()?;
            p.expect_delim(Delim::OpenParen)?;

            // A parameter list always starts with a type keyword; anything else means the
            // list is empty and `)` must follow.
            if p.at_type_keyword() {
                p.parse_param_list()?;
            }

            p.expect_delim(Delim::CloseParen)?;
            p.parse_block()
        })
    }

    /// `ParamList → Param ("," Param)*`
    fn parse_param_list(&mut self) -> PResult<()> {
        self.node(Rule::ParamList, |p| {
            p.parse_param()?;
            while p.eat_delim(Delim::Comma) {
                p.parse_param()?;
            }
            Ok(())
        })
    }

    /// `Param → TypeKw IDENT`
    fn parse_param(&mut self) -> PResult<()> {
        self.node(Rule::Param, |p| {
            p.expect_type_keyword()?;
            p.expect_ident()?;
            Ok(())
        })
    }

    /// `Block → "{" Statement* "}"`
    ///
    /// Running out of tokens before `}` is reported as an unexpected end of input. Blocks count
    /// towards the nesting limit.
    pub(super) fn parse_block(&mut self) -> PResult<()> {
        self.nested(|p| {
            p.node(Rule::Block, |p| {
                p.expect_delim(Delim::OpenBrace)?;

                while p.cur().is_some() && !p.at_delim(Delim::CloseBrace) {
                    p.parse_statement()?;
                }

                p.expect_delim(Delim::CloseBrace)
            })
        })
    }
}

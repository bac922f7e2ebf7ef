//! Statements.
//!
//! `Statement` dispatches on the current token. The only place it looks further ahead is an
//! identifier: `IDENT "="` is an assignment, any other identifier starts an expression
//! statement (a variable or a call).

use super::{PResult, Parser, Rule};
use crate::error::{Construct, Expected};
use crate::lexer::{Delim, Keyword, TokenKind};

impl Parser {
    /// ```text
    /// Statement → VarDecl | AssignStmt | ShowStmt | GetStmt
    ///           | IfStmt | WhileStmt | ForStmt | ReturnStmt | Expr ";"
    /// ```
    pub(super) fn parse_statement(&mut self) -> PResult<()> {
        let Some(kind) = self.cur_kind() else {
            return Err(self.unexpected(Expected::Construct(Construct::Statement)));
        };

        match kind {
            TokenKind::Keyword(kw) if kw.is_type() => self.parse_var_decl(),
            TokenKind::Ident(_) if self.peek_kind(1).is_some_and(|k| k.is_op("=")) => {
                self.parse_assign_stmt()
            }
            TokenKind::Keyword(Keyword::Show) => self.parse_show_stmt(),
            TokenKind::Keyword(Keyword::Get) => self.parse_get_stmt(),
            TokenKind::Keyword(Keyword::When) => self.parse_if_stmt(),
            TokenKind::Keyword(Keyword::Loop) => self.parse_while_stmt(),
            TokenKind::Keyword(Keyword::Repeat) => self.parse_for_stmt(),
            TokenKind::Keyword(Keyword::Give) => self.parse_return_stmt(),
            _ if self.can_begin_expr() => self.parse_expr_stmt(),
            _ => Err(self.unexpected(Expected::Construct(Construct::Statement))),
        }
    }

    /// `VarDecl → TypeKw IDENT "=" Expr ";"`
    pub(super) fn parse_var_decl(&mut self) -> PResult<()> {
        self.node(Rule::VarDecl, |p| {
            p.expect_type_keyword()?;
            p.expect_ident()?;
            p.expect_op("=")?;
            p.parse_expr()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `AssignStmt → IDENT "=" Expr ";"`
    fn parse_assign_stmt(&mut self) -> PResult<()> {
        self.node(Rule::AssignStmt, |p| {
            p.expect_ident()?;
            p.expect_op("=")?;
            p.parse_expr()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `ShowStmt → "show" Expr ";"`
    fn parse_show_stmt(&mut self) -> PResult<()> {
        self.node(Rule::ShowStmt, |p| {
            p.expect_keyword(Keyword::Show)?;
            p.parse_expr()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `GetStmt → "get" IDENT ";"`
    fn parse_get_stmt(&mut self) -> PResult<()> {
        self.node(Rule::GetStmt, |p| {
            p.expect_keyword(Keyword::Get)?;
            p.expect_ident()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `IfStmt → "when" "(" Condition ")" Block ("otherwise" Block)?`
    fn parse_if_stmt(&mut self) -> PResult<()> {
        self.node(Rule::IfStmt, |p| {
            p.expect_keyword(Keyword::When)?;
            p.expect_delim(Delim::OpenParen)?;
            p.parse_condition()?;
            p.expect_delim(Delim::CloseParen)?;
            p.parse_block()?;

            if p.eat_keyword(Keyword::Otherwise) {
                p.parse_block()?;
            }
            Ok(())
        })
    }

    /// `WhileStmt → "loop" "(" Condition ")" Block`
    fn parse_while_stmt(&mut self) -> PResult<()> {
        self.node(Rule::WhileStmt, |p| {
            p.expect_keyword(Keyword::Loop)?;
            p.expect_delim(Delim::OpenParen)?;
            p.parse_condition()?;
            p.expect_delim(Delim::CloseParen)?;
            p.parse_block()
        })
    }

    /// `ForStmt → "repeat" "(" VarDecl Condition ";" Expr ")" Block`
    ///
    /// The `VarDecl` brings its own `;`.
    fn parse_for_stmt(&mut self) -> PResult<()> {
        self.node(Rule::ForStmt, |p| {
            p.expect_keyword(Keyword::Repeat)?;
            p.expect_delim(Delim::OpenParen)?;
            p.parse_var_decl()?;
            p.parse_condition()?;
            p.expect_delim(Delim::Semi)?;
            p.parse_expr()?;
            p.expect_delim(Delim::CloseParen)?;
            p.parse_block()
        })
    }

    /// `ReturnStmt → "give" Expr ";"`
    fn parse_return_stmt(&mut self) -> PResult<()> {
        self.node(Rule::ReturnStmt, |p| {
            p.expect_keyword(Keyword::Give)?;
            p.parse_expr()?;
            p.expect_delim(Delim::Semi)
        })
    }

    /// `Expr ";"`
    fn parse_expr_stmt(&mut self) -> PResult<()> {
        self.node(Rule::ExprStmt, |p| {
            p.parse_expr()?;
            p.expect_delim(Delim::Semi)
        })
    }
}

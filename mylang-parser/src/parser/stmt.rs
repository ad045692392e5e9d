use super::*;
use std::rc::Rc;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.current_token() {
            Token::Var => self.parse_var_declaration(),
            Token::Func => self.parse_fn_declaration(),
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::Print => self.parse_print_stmt(),
            Token::Input => {
                let prompt = self.parse_input()?;
                self.expect(Token::Semi)?;
                Ok(Stmt::Input(prompt))
            }
            Token::Identifier(_) => self.parse_assignment_or_call_stmt(),
            _ => Err(self.unexpected()),
        }
    }

    /// Parses `{ stmts }`.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect(Token::OpenBrace)?;

        let mut body = Vec::new();
        while !self.eat(Token::CloseBrace) {
            body.push(self.parse_stmt()?);
        }

        Ok(Block(body))
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Var)?;
        let ident = self.expect_identifier()?;
        let initializer = if self.eat(Token::Equals) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Token::Semi)?;
        Ok(Stmt::VarDeclaration { ident, initializer })
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Func)?;
        let ident = self.expect_identifier()?;

        self.expect(Token::OpenParen)?;
        let mut params = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                params.push(self.expect_identifier()?);

                if self.eat(Token::CloseParen) {
                    break;
                }
                self.expect(Token::Comma)?;
            }
        }

        let body = self.parse_block()?;

        Ok(Stmt::FnDeclaration(Rc::new(FnDeclaration {
            ident,
            params,
            body,
        })))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::If)?;
        let condition = self.parse_condition()?;
        let then_block = self.parse_block()?;
        let else_block = if self.eat(Token::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// Parses a parenthesized condition (`(expr)`).
    fn parse_condition(&mut self) -> ParseResult<Expr> {
        self.expect(Token::OpenParen)?;
        let condition = self.parse_expr()?;
        self.expect(Token::CloseParen)?;
        Ok(condition)
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Print)?;
        self.expect(Token::OpenParen)?;
        let expr = self.parse_expr()?;
        self.expect(Token::CloseParen)?;
        self.expect(Token::Semi)?;
        Ok(Stmt::Print(expr))
    }

    /// Parses `name = expr;` or `name(args);`.
    fn parse_assignment_or_call_stmt(&mut self) -> ParseResult<Stmt> {
        let ident = self.expect_identifier()?;

        let stmt = match self.current_token() {
            Token::Equals => {
                self.next();
                let value = self.parse_expr()?;
                Stmt::Assignment { ident, value }
            }
            Token::OpenParen => {
                let args = self.parse_call_args()?;
                Stmt::FnCall(FnCall { ident, args })
            }
            _ => return Err(self.unexpected()),
        };
        self.expect(Token::Semi)?;
        Ok(stmt)
    }
}

use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        // NOTE: prefix operators are handled here
        match self.current_token() {
            Token::NumberLit(_) | Token::StringLit(_) => self.parse_literal_expr(),
            Token::Identifier(_) => self.parse_identifier_or_call_expr(),
            Token::Input => Ok(Expr::Input(self.parse_input()?)),
            Token::Not | Token::Minus => {
                let op = self.next();
                let arg = self.parse_expr_bp(Token::PREFIX_BP)?;
                Ok(Expr::Unary {
                    op,
                    arg: Box::new(arg),
                })
            }
            Token::OpenParen => {
                self.next();
                let expr = self.parse_expr()?;
                self.expect(Token::CloseParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token().binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token() is a valid binop
            let binop = self.next();

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op: binop,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either a number literal or a string literal.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let val = match self.current_token() {
            Token::NumberLit(val) => Expr::NumberLit(val.clone()),
            Token::StringLit(val) => Expr::StringLit(val.clone()),
            _ => return Err(self.unexpected()),
        };
        self.next();
        Ok(val)
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    fn parse_identifier_or_call_expr(&mut self) -> ParseResult<Expr> {
        let ident = self.expect_identifier()?;

        if *self.current_token() == Token::OpenParen {
            let args = self.parse_call_args()?;
            Ok(Expr::FnCall(FnCall { ident, args }))
        } else {
            Ok(Expr::Identifier(ident))
        }
    }

    /// Parses a parenthesized, comma separated argument list.
    pub(super) fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(Token::OpenParen)?;

        let mut args = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                args.push(self.parse_expr()?);

                if self.eat(Token::CloseParen) {
                    break;
                }
                self.expect(Token::Comma)?;
            }
        }

        Ok(args)
    }

    /// Parses `input("prompt")` and returns the prompt. Only a string literal is accepted.
    pub(super) fn parse_input(&mut self) -> ParseResult<String> {
        self.expect(Token::Input)?;
        self.expect(Token::OpenParen)?;
        let prompt = self.expect_string()?;
        self.expect(Token::CloseParen)?;
        Ok(prompt)
    }
}

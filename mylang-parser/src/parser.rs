use crate::ast::{Block, Expr, FnCall, FnDeclaration, Stmt};
use crate::lexer::{SpannedToken, Token, Tokenizer};
use mylang_source::{Diagnostic, Phase, Source};
use std::mem;
use tracing::debug;

mod expr;
mod stmt;

/// Parsing stops at the first syntax error.
pub type ParseResult<T> = Result<T, Diagnostic>;

pub struct Parser<'a> {
    /// Always terminated by a [`Token::Eof`].
    tokens: Vec<SpannedToken>,
    /// Index of the current token in `tokens`.
    cursor: usize,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source`. Lexical errors are added to `source.errors`, the offending characters
    /// are dropped from the token stream.
    pub fn new(source: &'a Source<'a>) -> Self {
        let mut tokens: Vec<SpannedToken> = Tokenizer::new(source).collect();
        let end = source.content.len();
        tokens.push(SpannedToken {
            token: Token::Eof,
            span: end..end,
            position: source.position(end),
        });
        Self {
            tokens,
            cursor: 0,
            source,
        }
    }

    /// Parses a whole program into its root [`Block`].
    pub fn parse_program(&mut self) -> ParseResult<Block> {
        let mut body = Vec::new();
        while *self.current_token() != Token::Eof {
            body.push(self.parse_stmt()?);
        }
        debug!(statements = body.len(), "parsed program");
        Ok(Block(body))
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn current_token(&self) -> &Token {
        &self.tokens[self.cursor].token
    }

    /// Advances to the next token and returns the previous current token.
    /// Stays on [`Token::Eof`] once it is reached.
    fn next(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    /// Predicate that tests whether the next token has the same discriminant and eats the next
    /// token if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if mem::discriminant(self.current_token()) == mem::discriminant(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token) -> ParseResult<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Token::Identifier(ident) => {
                let ident = ident.clone();
                self.next();
                Ok(ident)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Token::StringLit(val) => {
                let val = val.clone();
                self.next();
                Ok(val)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Creates an unexpected token error for the current token.
    fn unexpected(&self) -> Diagnostic {
        let SpannedToken { token, span, .. } = &self.tokens[self.cursor];
        let message = match token {
            Token::Eof => "unexpected end of input".to_string(),
            _ => format!(
                "unexpected token '{}' (type={})",
                &self.source.content[span.clone()],
                token.kind_name()
            ),
        };
        self.source.diagnostic(Phase::Syntax, message, span.clone())
    }
}

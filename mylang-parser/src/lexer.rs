use std::fmt;
use std::ops::Range;

use logos::{Lexer, Logos};
use mylang_source::{Phase, Position, Source};
use mylang_value::Number;

#[derive(Debug, Logos, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| Number::from_literal(lex.slice()))]
    NumberLit(Number),
    /// Quotes are stripped, escape sequences are kept verbatim.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice()[1..lex.slice().len() - 1].to_string())]
    StringLit(String),

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("func")]
    Func,
    #[token("print")]
    Print,
    #[token("input")]
    Input,
    // - logical operators
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // misc
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    Comment,

    /// Only generated in parse phase when the tokenizer is exhausted.
    Eof,
}

impl Token {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` is reserved for accepting any expression.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Logical */
            Token::Or => Some((1, 2)),
            Token::And => Some((3, 4)),
            /* Equality */
            Token::EqualsEquals | Token::NotEquals => Some((5, 6)),
            Token::GreaterThan
            | Token::GreaterThanEquals
            | Token::LessThan
            | Token::LessThanEquals => Some((7, 8)),
            /* Additive */
            Token::Plus | Token::Minus => Some((9, 10)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash => Some((11, 12)),
            _ => None,
        }
    }

    /// Binding power of the operand of a prefix operator (`-` and `not`).
    /// Higher than any binary operator.
    pub const PREFIX_BP: u8 = 13;

    /// The token kind as reported in syntax errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::NumberLit(_) => "NUMBER",
            Token::StringLit(_) => "STRING",
            Token::Identifier(_) => "IDENTIFIER",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Asterisk => "MUL",
            Token::Slash => "DIV",
            Token::Equals => "EQ",
            Token::EqualsEquals => "EQEQ",
            Token::NotEquals => "NEQ",
            Token::GreaterThan => "GT",
            Token::GreaterThanEquals => "GE",
            Token::LessThan => "LT",
            Token::LessThanEquals => "LE",
            Token::OpenParen => "LPAREN",
            Token::CloseParen => "RPAREN",
            Token::OpenBrace => "LBRACE",
            Token::CloseBrace => "RBRACE",
            Token::Comma => "COMMA",
            Token::Semi => "SEMI",
            Token::Var => "VAR",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::While => "WHILE",
            Token::Func => "FUNC",
            Token::Print => "PRINT",
            Token::Input => "INPUT",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::Comment => "COMMENT",
            Token::Eof => "EOF",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::NumberLit(val) => return write!(f, "{}", val),
            Token::StringLit(val) => return write!(f, "\"{}\"", val),
            Token::Identifier(ident) => return write!(f, "{}", ident),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Equals => "=",
            Token::EqualsEquals => "==",
            Token::NotEquals => "!=",
            Token::GreaterThan => ">",
            Token::GreaterThanEquals => ">=",
            Token::LessThan => "<",
            Token::LessThanEquals => "<=",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Var => "var",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Func => "func",
            Token::Print => "print",
            Token::Input => "input",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Comment => "//",
            Token::Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}

/// A token together with its location in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    /// Byte range in the source.
    pub span: Range<usize>,
    pub position: Position,
}

/// Converts source text into [`SpannedToken`]s.
///
/// Unrecognized characters are reported to the [`Source`]'s error reporter and skipped one
/// character at a time; tokenizing never stops early.
pub struct Tokenizer<'a> {
    source: &'a Source<'a>,
    lexer: Lexer<'a, Token>,
    /// Byte offset of the `lexer` input within the source.
    base: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            source,
            lexer: Token::lexer(source.content),
            base: 0,
        }
    }

    /// Reports the character at the start of `span` and resumes lexing right after it.
    fn recover(&mut self, span: Range<usize>) {
        let content = self.source.content;
        let ch = match content.get(span.start..).and_then(|rest| rest.chars().next()) {
            Some(ch) => ch,
            None => return,
        };
        self.source.errors.add_error(self.source.diagnostic(
            Phase::Lexical,
            format!("unexpected character '{}'", ch),
            span.start..span.start + ch.len_utf8(),
        ));

        let resume = span.start + ch.len_utf8();
        if resume != span.end {
            self.lexer = Token::lexer(&content[resume..]);
            self.base = resume;
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<SpannedToken> {
        loop {
            let result = self.lexer.next()?;
            let span = self.lexer.span();
            let span = span.start + self.base..span.end + self.base;
            match result {
                Ok(token) => {
                    return Some(SpannedToken {
                        token,
                        position: self.source.position(span.start),
                        span,
                    })
                }
                Err(()) => self.recover(span),
            }
        }
    }
}

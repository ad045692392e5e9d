use std::rc::Rc;

use crate::lexer::Token;
use mylang_value::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(Number),
    StringLit(String),
    /// An identifier (e.g. `foo`). `true` and `false` are identifiers too.
    Identifier(String),
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A prefix expression (e.g. `-x` or `not x`).
    Unary { op: Token, arg: Box<Expr> },
    FnCall(FnCall),
    /// `input("prompt")` used as a value.
    Input(String),
}

/// A call (e.g. `foo(1, bar)`).
#[derive(Debug, Clone, PartialEq)]
pub struct FnCall {
    pub ident: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var x = 1;` or `var x;`
    VarDeclaration {
        ident: String,
        initializer: Option<Expr>,
    },
    /// `x = 1;`
    Assignment { ident: String, value: Expr },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { condition: Expr, body: Block },
    /// Shared so that environments can keep the declaration alive after the program that
    /// declared it is dropped.
    FnDeclaration(Rc<FnDeclaration>),
    /// A call used as a statement (`foo(1);`).
    FnCall(FnCall),
    Print(Expr),
    Input(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclaration {
    pub ident: String,
    pub params: Vec<String>,
    pub body: Block,
}

/// An ordered list of statements. The root of every parsed program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(pub Vec<Stmt>);

use std::rc::Rc;

use mylang_parser::ast::{Block, Expr, FnCall, Stmt};
use mylang_value::Value;
use tracing::{debug, trace};

use crate::environment::{Environment, ScopeId};
use crate::error::{EvalResult, RuntimeError};
use crate::io::{Io, StdIo};
use crate::ops;
use crate::stack::ensure_sufficient_stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum nesting of user function calls.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 200,
        }
    }
}

/// Evaluates programs against a persistent global scope.
pub struct Interpreter<I = StdIo> {
    env: Environment,
    io: I,
    config: EvalConfig,
    /// Current nesting of user function calls.
    call_depth: usize,
}

impl Interpreter<StdIo> {
    pub fn new() -> Self {
        Self::with_io(StdIo)
    }
}

impl Default for Interpreter<StdIo> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Io> Interpreter<I> {
    pub fn with_io(io: I) -> Self {
        Self {
            env: Environment::new(),
            io,
            config: EvalConfig::default(),
            call_depth: 0,
        }
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    pub fn into_io(self) -> I {
        self.io
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Discards every global variable and function.
    pub fn reset(&mut self) {
        self.env = Environment::new();
        self.call_depth = 0;
    }

    /// Evaluates `program` in the global scope and returns the value of its last statement.
    /// Globals defined before an error are kept.
    pub fn interpret(&mut self, program: &Block) -> EvalResult<Value> {
        let result = self.eval_block(program, Environment::GLOBAL);
        debug_assert_eq!(self.env.depth(), 1, "scope leaked");
        self.call_depth = 0;
        result
    }

    /// Executes the statements of `block` in `scope` (a block does not open a scope by itself).
    pub fn eval_block(&mut self, block: &Block, scope: ScopeId) -> EvalResult<Value> {
        let mut result = Value::None;
        for stmt in &block.0 {
            result = self.eval_stmt(stmt, scope)?;
        }
        Ok(result)
    }

    /// Executes `block` in a fresh child scope of `parent`.
    fn eval_block_in_child(&mut self, block: &Block, parent: ScopeId) -> EvalResult<Value> {
        let scope = self.env.push_scope(parent);
        let result = self.eval_block(block, scope);
        self.env.pop_scope(scope);
        result
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt, scope: ScopeId) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_stmt_kind(stmt, scope))
    }

    fn eval_stmt_kind(&mut self, stmt: &Stmt, scope: ScopeId) -> EvalResult<Value> {
        match stmt {
            Stmt::VarDeclaration { ident, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::None,
                };
                self.env.define(scope, ident.as_str(), value);
                Ok(Value::None)
            }
            Stmt::Assignment { ident, value } => {
                let value = self.eval_expr(value, scope)?;
                self.env.set(scope, ident, value)?;
                Ok(Value::None)
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                if self.eval_expr(condition, scope)?.is_truthy() {
                    self.eval_block_in_child(then_block, scope)
                } else if let Some(else_block) = else_block {
                    self.eval_block_in_child(else_block, scope)
                } else {
                    Ok(Value::None)
                }
            }
            Stmt::While { condition, body } => {
                let mut result = Value::None;
                let mut iterations = 0usize;
                while self.eval_expr(condition, scope)?.is_truthy() {
                    iterations += 1;
                    trace!(iterations, "while iteration");
                    result = self.eval_block_in_child(body, scope)?;
                }
                Ok(result)
            }
            Stmt::FnDeclaration(func) => {
                debug!(function = %func.ident, params = func.params.len(), "declaring function");
                self.env.define_func(scope, Rc::clone(func));
                Ok(Value::None)
            }
            Stmt::FnCall(call) => self.eval_call(call, scope),
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, scope)?;
                self.print(&value)?;
                Ok(Value::None)
            }
            Stmt::Input(prompt) => self.read_input(prompt),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr_kind(expr, scope))
    }

    fn eval_expr_kind(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(val.clone())),
            Expr::StringLit(val) => Ok(Value::from(val.as_str())),
            // Boolean literals win over variables of the same name.
            Expr::Identifier(ident) => match ident.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => self.env.get(scope, ident),
            },
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_expr(lhs, scope)?;
                let rhs = self.eval_expr(rhs, scope)?;
                ops::binary(op, lhs, rhs)
            }
            Expr::Unary { op, arg } => {
                let arg = self.eval_expr(arg, scope)?;
                ops::unary(op, arg)
            }
            Expr::FnCall(call) => self.eval_call(call, scope),
            Expr::Input(prompt) => self.read_input(prompt),
        }
    }

    /// Calls a built-in or user function.
    ///
    /// The callee runs in a child scope of the *calling* scope, so it sees (and can assign) every
    /// variable visible at the call site. Arguments without a matching parameter are neither
    /// evaluated nor bound, and parameters without an argument stay unbound.
    fn eval_call(&mut self, call: &FnCall, scope: ScopeId) -> EvalResult<Value> {
        match call.ident.as_str() {
            "print" => {
                let value = self.builtin_arg("print", call, scope)?;
                self.print(&value)?;
                return Ok(Value::None);
            }
            "input" => {
                let prompt = self.builtin_arg("input", call, scope)?;
                return self.read_input(&prompt.to_string());
            }
            _ => {}
        }

        let func = self.env.get_func(scope, &call.ident)?;
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded(self.config.max_call_depth));
        }

        let mut bindings = Vec::with_capacity(func.params.len());
        for (param, arg) in func.params.iter().zip(&call.args) {
            bindings.push((param.as_str(), self.eval_expr(arg, scope)?));
        }

        debug!(function = %call.ident, depth = self.call_depth + 1, "calling function");
        let call_scope = self.env.push_scope(scope);
        for (param, value) in bindings {
            self.env.define(call_scope, param, value);
        }

        self.call_depth += 1;
        let result = self.eval_block(&func.body, call_scope);
        self.call_depth -= 1;
        self.env.pop_scope(call_scope);
        result
    }

    /// Evaluates the single argument of a built-in called with call syntax.
    fn builtin_arg(
        &mut self,
        name: &'static str,
        call: &FnCall,
        scope: ScopeId,
    ) -> EvalResult<Value> {
        match call.args.as_slice() {
            [arg] => self.eval_expr(arg, scope),
            args => Err(RuntimeError::BuiltinArity {
                name,
                found: args.len(),
            }),
        }
    }

    fn print(&mut self, value: &Value) -> EvalResult<()> {
        self.io.write_line(&value.to_string())?;
        Ok(())
    }

    fn read_input(&mut self, prompt: &str) -> EvalResult<Value> {
        let line = self.io.read_line(prompt)?;
        Ok(Value::from(line))
    }
}

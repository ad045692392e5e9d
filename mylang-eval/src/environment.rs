//! Scope chain.
//!
//! Scopes live in an arena and refer to their parent by [`ScopeId`]. Child scopes are strictly
//! nested: a scope is released together with every scope created after it.

use std::collections::HashMap;
use std::iter;
use std::rc::Rc;

use mylang_parser::ast::FnDeclaration;
use mylang_value::Value;

use crate::error::{EvalResult, RuntimeError};

/// Handle to a scope in an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    variables: HashMap<String, Value>,
    /// Separate namespace: a name can be both a variable and a function.
    functions: HashMap<String, Rc<FnDeclaration>>,
    parent: Option<ScopeId>,
}

#[derive(Debug)]
pub struct Environment {
    /// `scopes[0]` is the global scope.
    scopes: Vec<Scope>,
}

impl Environment {
    /// The global scope. Lives as long as the `Environment`.
    pub const GLOBAL: ScopeId = ScopeId(0);

    /// Creates an `Environment` containing only an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Creates an empty scope whose parent is `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Releases `scope` and every scope created after it. The global scope is never released.
    pub fn pop_scope(&mut self, scope: ScopeId) {
        if scope != Self::GLOBAL {
            self.scopes.truncate(scope.0);
        }
    }

    /// Number of live scopes, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `scope` followed by its ancestors, innermost first.
    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = &Scope> {
        iter::successors(Some(&self.scopes[scope.0]), move |scope| {
            scope.parent.map(|parent| &self.scopes[parent.0])
        })
    }

    /// Binds `name` in `scope` itself, shadowing any outer binding.
    pub fn define(&mut self, scope: ScopeId, name: impl Into<String>, value: Value) {
        self.scopes[scope.0].variables.insert(name.into(), value);
    }

    /// Registers `func` under its name in `scope` itself.
    pub fn define_func(&mut self, scope: ScopeId, func: Rc<FnDeclaration>) {
        self.scopes[scope.0]
            .functions
            .insert(func.ident.clone(), func);
    }

    /// Looks `name` up through the scope chain.
    pub fn get(&self, scope: ScopeId, name: &str) -> EvalResult<Value> {
        self.chain(scope)
            .find_map(|scope| scope.variables.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Updates the nearest existing binding of `name`.
    pub fn set(&mut self, scope: ScopeId, name: &str, value: Value) -> EvalResult<()> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &mut self.scopes[id.0];
            if let Some(slot) = scope.variables.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            current = scope.parent;
        }
        Err(RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Looks the function `name` up through the scope chain.
    pub fn get_func(&self, scope: ScopeId, name: &str) -> EvalResult<Rc<FnDeclaration>> {
        self.chain(scope)
            .find_map(|scope| scope.functions.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedFunction(name.to_string()))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

//! Operator semantics.

use std::cmp::Ordering;

use mylang_parser::lexer::Token;
use mylang_value::{Number, Value};

use crate::error::{EvalResult, RuntimeError};

/// Applies a binary operator to two already evaluated operands.
pub fn binary(op: &Token, lhs: Value, rhs: Value) -> EvalResult<Value> {
    match op {
        Token::Plus => Ok(add(&lhs, &rhs)),
        Token::Minus => {
            let (l, r) = coerce_pair(op, &lhs, &rhs)?;
            Ok(Value::Number(l - r))
        }
        Token::Asterisk => {
            let (l, r) = number_pair(op, &lhs, &rhs)?;
            Ok(Value::Number(l * r))
        }
        Token::Slash => {
            let (l, r) = number_pair(op, &lhs, &rhs)?;
            l.checked_div(&r)
                .map(Value::Number)
                .ok_or(RuntimeError::DivisionByZero)
        }
        Token::EqualsEquals => Ok(Value::Bool(lhs.equals(&rhs))),
        Token::NotEquals => Ok(Value::Bool(!lhs.equals(&rhs))),
        Token::LessThan => compare(op, &lhs, &rhs, Ordering::is_lt),
        Token::LessThanEquals => compare(op, &lhs, &rhs, Ordering::is_le),
        Token::GreaterThan => compare(op, &lhs, &rhs, Ordering::is_gt),
        Token::GreaterThanEquals => compare(op, &lhs, &rhs, Ordering::is_ge),
        // Both operands are always evaluated: no short-circuiting.
        Token::And => Ok(Value::Bool(lhs.is_truthy() && rhs.is_truthy())),
        Token::Or => Ok(Value::Bool(lhs.is_truthy() || rhs.is_truthy())),
        _ => Err(RuntimeError::UnknownOperator(op.to_string())),
    }
}

/// Applies a prefix operator.
pub fn unary(op: &Token, arg: Value) -> EvalResult<Value> {
    match op {
        Token::Minus => arg
            .cast_to_number()
            .map(|val| Value::Number(-val))
            .ok_or_else(|| unary_type_error(op, &arg)),
        Token::Plus => arg
            .cast_to_number()
            .map(Value::Number)
            .ok_or_else(|| unary_type_error(op, &arg)),
        Token::Not => Ok(Value::Bool(!arg.is_truthy())),
        _ => Err(RuntimeError::UnknownOperator(op.to_string())),
    }
}

/// Numeric addition when both sides coerce to numbers, string concatenation otherwise.
fn add(lhs: &Value, rhs: &Value) -> Value {
    match (lhs.coerce_to_number(), rhs.coerce_to_number()) {
        (Some(l), Some(r)) => Value::Number(l + r),
        _ => Value::from(format!("{}{}", lhs, rhs)),
    }
}

fn coerce_pair(op: &Token, lhs: &Value, rhs: &Value) -> EvalResult<(Number, Number)> {
    match (lhs.coerce_to_number(), rhs.coerce_to_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(binary_type_error(op, lhs, rhs)),
    }
}

fn number_pair(op: &Token, lhs: &Value, rhs: &Value) -> EvalResult<(Number, Number)> {
    match (lhs.cast_to_number(), rhs.cast_to_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(binary_type_error(op, lhs, rhs)),
    }
}

/// Ordering comparison between two strings or two numbers (booleans included).
/// NaN compares false with everything.
fn compare(
    op: &Token,
    lhs: &Value,
    rhs: &Value,
    predicate: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Str(l), Value::Str(r)) => Some(l.cmp(r)),
        _ => match (lhs.cast_to_number(), rhs.cast_to_number()) {
            (Some(l), Some(r)) => l.compare(&r),
            _ => return Err(binary_type_error(op, lhs, rhs)),
        },
    };
    Ok(Value::Bool(ordering.map_or(false, predicate)))
}

fn binary_type_error(op: &Token, lhs: &Value, rhs: &Value) -> RuntimeError {
    RuntimeError::BinaryType {
        op: op.to_string(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    }
}

fn unary_type_error(op: &Token, arg: &Value) -> RuntimeError {
    RuntimeError::UnaryType {
        op: op.to_string(),
        operand: arg.type_name(),
    }
}

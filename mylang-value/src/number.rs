use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// A numeric value. Integers have arbitrary precision and stay integers until
/// they meet a float.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    /// Parses a number literal (`123` or `1.5`).
    pub fn from_literal(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse().ok().map(Number::Float)
        } else {
            BigInt::from_str(text).ok().map(Number::Int)
        }
    }

    /// Attempts to interpret text as a number: first as an integer, then as a float.
    /// Surrounding whitespace is ignored.
    pub fn coerce_str(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(val) = BigInt::from_str(text) {
            return Some(Number::Int(val));
        }
        text.parse::<f64>().ok().map(Number::Float)
    }

    /// Integers beyond the range of `f64` become infinite.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(val) => val.to_f64().unwrap_or(f64::NAN),
            Number::Float(val) => *val,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(val) => val.is_zero(),
            Number::Float(val) => *val == 0.0,
        }
    }

    /// True division. Always produces a float, or `None` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Number) -> Option<Number> {
        if rhs.is_zero() {
            None
        } else {
            Some(Number::Float(self.as_f64() / rhs.as_f64()))
        }
    }

    /// Compares two numbers by value, regardless of subtype.
    /// Returns `None` if either side is NaN.
    pub fn compare(&self, rhs: &Number) -> Option<Ordering> {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => Some(l.cmp(r)),
            (l, r) => l.as_f64().partial_cmp(&r.as_f64()),
        }
    }

    fn float_op(self, rhs: Number, op: fn(f64, f64) -> f64) -> Number {
        Number::Float(op(self.as_f64(), rhs.as_f64()))
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => Number::Int(l + r),
            (l, r) => l.float_op(r, |l, r| l + r),
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => Number::Int(l - r),
            (l, r) => l.float_op(r, |l, r| l - r),
        }
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => Number::Int(l * r),
            (l, r) => l.float_op(r, |l, r| l * r),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Int(val) => Number::Int(-val),
            Number::Float(val) => Number::Float(-val),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            Number::Float(val) => fmt_float(*val, f),
        }
    }
}

/// Shortest round-trip digits. Exponent notation below `1e-4` and from `1e16` on, integral
/// floats keep a trailing `.0`.
fn fmt_float(val: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if val.is_nan() {
        return write!(f, "nan");
    }
    if val.is_infinite() {
        return write!(f, "{}", if val < 0.0 { "-inf" } else { "inf" });
    }

    let scientific = format!("{:e}", val);
    let exponent = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
    match exponent {
        Some((mantissa, exp)) if val != 0.0 && !(-4..16).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ if val.fract() == 0.0 => write!(f, "{:.1}", val),
        _ => write!(f, "{}", val),
    }
}

impl From<i64> for Number {
    fn from(val: i64) -> Self {
        Number::Int(BigInt::from(val))
    }
}

impl From<f64> for Number {
    fn from(val: f64) -> Self {
        Number::Float(val)
    }
}

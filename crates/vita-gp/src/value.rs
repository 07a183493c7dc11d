use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Runtime value of a MEP program. `Void` is the uniform failure marker:
/// division by zero, a domain error, or any non-finite arithmetic result
/// collapses to `Void` rather than panicking, and propagates through any
/// function that reads it as an argument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Void,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(Arc<str>),
}

impl Value {
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Void => ValueType::Void,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::Str(_) => ValueType::Str,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Wraps `f64::NAN`/`f64::INFINITY` results as `Void`, per the
    /// "never raise on arithmetic" rule.
    pub fn from_finite(v: f64) -> Value {
        if v.is_finite() { Value::Double(v) } else { Value::Void }
    }

    pub fn checked_div(a: f64, b: f64) -> Value {
        if b == 0.0 { Value::Void } else { Value::from_finite(a / b) }
    }

    pub fn checked_int_div(a: i64, b: i64) -> Value {
        if b == 0 { Value::Void } else { Value::Int(a / b) }
    }

    /// `ln(x)` is `Void` for `x <= 0`, matching the spec's boundary rule.
    pub fn checked_ln(x: f64) -> Value {
        if x <= 0.0 { Value::Void } else { Value::from_finite(x.ln()) }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    Void,
    Bool,
    Int,
    Double,
    Str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_void() {
        assert_eq!(Value::checked_div(1.0, 0.0), Value::Void);
        assert_eq!(Value::checked_int_div(1, 0), Value::Void);
    }

    #[test]
    fn ln_boundary() {
        assert_eq!(Value::checked_ln(0.0), Value::Void);
        assert_eq!(Value::checked_ln(1.0), Value::Double(0.0));
    }

    #[test]
    fn non_finite_collapses_to_void() {
        assert_eq!(Value::from_finite(f64::NAN), Value::Void);
        assert_eq!(Value::from_finite(f64::INFINITY), Value::Void);
    }
}

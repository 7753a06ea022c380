// ABOUTME: Runtime value types produced by the evaluator

use crate::ast::Stmt;
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::token::format_number;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Function {
        params: Rc<Vec<String>>,
        body: Rc<Stmt>,
        closure: Rc<Environment>,
    },
    BuiltIn(&'static str, fn(&[Value]) -> Result<Value, RuntimeError>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Function { .. } => "function",
            Value::BuiltIn(..) => "function",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function { .. } | Value::BuiltIn(..))
    }

    /// Dynamic truthiness: `false` and `nil` are false; numeric zero is
    /// also false (spec 9's resolution of the open truthiness question);
    /// every other value, including the empty string, is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Integer(0) => false,
            Value::Float(f) => *f != 0.0,
            _ => true,
        }
    }

    /// Structural equality used by `==`/`!=`. Integer/Float are promoted
    /// to compare numerically; genuinely disjoint types are never equal.
    pub fn values_equal(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => (*a as f64) == *b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for test assertions, not the language's `==`
    /// (see `values_equal`, which additionally promotes Integer/Float).
    /// Functions compare by closure identity since two function values
    /// are never the "same" binding unless they share an `Rc`.
    fn eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (BuiltIn(name_a, f_a), BuiltIn(name_b, f_b)) => {
                name_a == name_b && (*f_a as usize) == (*f_b as usize)
            }
            (
                Function { closure: a, .. },
                Function { closure: b, .. },
            ) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            // Integers print without a fractional part (spec 4.4's Number
            // stringification) -- distinct from the AST-dump/token rule in
            // token::format_number, which renders both kinds as N.0.
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Function { .. } => write!(f, "<fn>"),
            Value::BuiltIn(name, _) => write!(f, "<fn {}>", name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_display_has_no_fraction() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
    }

    #[test]
    fn float_display_canonicalizes_whole_numbers() {
        assert_eq!(format!("{}", Value::Float(42.0)), "42.0");
        assert_eq!(format!("{}", Value::Float(2.5)), "2.5");
    }

    #[test]
    fn truthiness_zero_and_nil_and_false_are_falsy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
        assert!(Value::Integer(-1).is_truthy());
    }

    #[test]
    fn equality_promotes_integer_and_float() {
        assert!(Value::Integer(2).values_equal(&Value::Float(2.0)));
        assert!(!Value::Integer(2).values_equal(&Value::String("2".into())));
    }

    #[test]
    fn builtin_display_shows_name() {
        fn noop(_: &[Value]) -> Result<Value, RuntimeError> {
            Ok(Value::Nil)
        }
        assert_eq!(format!("{}", Value::BuiltIn("clock", noop)), "<fn clock>");
    }
}

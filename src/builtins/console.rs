// ABOUTME: `print` built-in, writing through the swappable output sink

use crate::error::RuntimeError;
use crate::io_sink;
use crate::value::Value;

pub fn print(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::ArityMismatch {
            expected: 1,
            actual: args.len(),
        });
    }
    match &args[0] {
        // A bare reference to a built-in is observable as `<fn name>`
        // (spec 4.4); only a user-defined function value has no printable
        // form, since it carries no name of its own.
        Value::Function { .. } => Err(RuntimeError::NonPrintableValue),
        value => {
            io_sink::write_line(&value.to_string());
            Ok(Value::Nil)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn prints_value_display_form_and_returns_nil() {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let result;
        {
            let _guard = crate::io_sink::SinkGuard::capture(buffer.clone());
            result = print(&[Value::Integer(42)]);
        }
        assert_eq!(result, Ok(Value::Nil));
        assert_eq!(String::from_utf8(buffer.borrow().clone()).unwrap(), "42\n");
    }

    #[test]
    fn prints_a_referenced_builtin_by_name() {
        fn noop(_: &[Value]) -> Result<Value, RuntimeError> {
            Ok(Value::Nil)
        }
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let result;
        {
            let _guard = crate::io_sink::SinkGuard::capture(buffer.clone());
            result = print(&[Value::BuiltIn("clock", noop)]);
        }
        assert_eq!(result, Ok(Value::Nil));
        assert_eq!(String::from_utf8(buffer.borrow().clone()).unwrap(), "<fn clock>\n");
    }

    #[test]
    fn rejects_user_defined_function_values() {
        use crate::ast::Stmt;
        use crate::env::Environment;

        let function = Value::Function {
            params: Rc::new(Vec::new()),
            body: Rc::new(Stmt::Block(Vec::new())),
            closure: Environment::new(),
        };
        let err = print(&[function]).unwrap_err();
        assert_eq!(err, RuntimeError::NonPrintableValue);
    }

    #[test]
    fn wrong_arity_is_a_runtime_error() {
        let err = print(&[]).unwrap_err();
        assert_eq!(err, RuntimeError::ArityMismatch { expected: 1, actual: 0 });
    }
}

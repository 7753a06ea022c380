// ABOUTME: `clock` built-in, returning seconds since the Unix epoch

use crate::error::RuntimeError;
use crate::value::Value;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn clock(args: &[Value]) -> Result<Value, RuntimeError> {
    if !args.is_empty() {
        return Err(RuntimeError::ArityMismatch {
            expected: 0,
            actual: args.len(),
        });
    }
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::Integer(elapsed.as_secs() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_returns_a_positive_integer() {
        match clock(&[]).unwrap() {
            Value::Integer(n) => assert!(n > 0),
            other => panic!("expected Integer, got {:?}", other),
        }
    }

    #[test]
    fn clock_rejects_arguments() {
        let err = clock(&[Value::Integer(1)]).unwrap_err();
        assert_eq!(err, RuntimeError::ArityMismatch { expected: 0, actual: 1 });
    }
}

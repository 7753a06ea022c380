// ABOUTME: Tree-walking evaluator executing a parsed statement/expression tree

use crate::ast::{BinOp, Expr, Program, Stmt, UnOp};
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::value::Value;
use std::ops::ControlFlow;
use std::rc::Rc;

/// `Break` carries a `return` value out through arbitrarily nested blocks
/// and loops; `Continue` is ordinary statement completion. This replaces
/// the source language's "return signal tagged inside a value" with the
/// idiomatic Rust short-circuiting `?`/`ControlFlow` pair.
type ExecResult = Result<ControlFlow<Value, Value>, RuntimeError>;

/// Execute a whole program (the `run` subcommand's top level). A bare
/// `return` outside any function body simply stops execution early.
pub fn run_program(program: &Program, env: &Rc<Environment>) -> Result<(), RuntimeError> {
    exec_block(program, env)?;
    Ok(())
}

fn exec_block(stmts: &[Stmt], env: &Rc<Environment>) -> ExecResult {
    for stmt in stmts {
        match exec_stmt(stmt, env)? {
            ControlFlow::Break(v) => return Ok(ControlFlow::Break(v)),
            ControlFlow::Continue(_) => {}
        }
    }
    Ok(ControlFlow::Continue(Value::Nil))
}

fn exec_stmt(stmt: &Stmt, env: &Rc<Environment>) -> ExecResult {
    match stmt {
        Stmt::ExpressionStmt(expr) => {
            eval_expr(expr, env)?;
            Ok(ControlFlow::Continue(Value::Nil))
        }

        Stmt::Declaration { names, initializer } => {
            let value = eval_expr(initializer, env)?;
            // Open question resolution: a bare alias of an existing
            // callable (`var g = f;`) is rejected, but a callable returned
            // from a call (`var add5 = make_adder(5);`) is not -- otherwise
            // a function that returns a closure could never be bound.
            if value.is_callable() && matches!(initializer, Expr::Identifier(_)) {
                return Err(RuntimeError::NonPrimitiveInitializer);
            }
            for name in names {
                env.define(name.clone(), value.clone());
            }
            Ok(ControlFlow::Continue(Value::Nil))
        }

        Stmt::Block(stmts) => {
            let child = Environment::with_parent(env.clone());
            exec_block(stmts, &child)
        }

        Stmt::If {
            cond,
            then_block,
            else_block,
        } => {
            if eval_expr(cond, env)?.is_truthy() {
                exec_stmt(then_block, env)
            } else if let Some(else_block) = else_block {
                exec_stmt(else_block, env)
            } else {
                Ok(ControlFlow::Continue(Value::Nil))
            }
        }

        Stmt::While { cond, body } => {
            while eval_expr(cond, env)?.is_truthy() {
                if let ControlFlow::Break(v) = exec_stmt(body, env)? {
                    return Ok(ControlFlow::Break(v));
                }
            }
            Ok(ControlFlow::Continue(Value::Nil))
        }

        Stmt::For {
            init,
            cond,
            step,
            body,
        } => {
            let loop_env = Environment::with_parent(env.clone());
            if let Some(init) = init {
                exec_stmt(init, &loop_env)?;
            }
            while eval_expr(cond, &loop_env)?.is_truthy() {
                if let ControlFlow::Break(v) = exec_stmt(body, &loop_env)? {
                    return Ok(ControlFlow::Break(v));
                }
                if let Some(step) = step {
                    eval_expr(step, &loop_env)?;
                }
            }
            Ok(ControlFlow::Continue(Value::Nil))
        }

        Stmt::FunctionDecl { name, params, body } => {
            let function = Value::Function {
                params: Rc::new(params.clone()),
                body: Rc::new((**body).clone()),
                closure: env.clone(),
            };
            env.define(name.clone(), function);
            Ok(ControlFlow::Continue(Value::Nil))
        }

        Stmt::Return(expr) => {
            let value = match expr {
                Some(expr) => eval_expr(expr, env)?,
                None => Value::Nil,
            };
            Ok(ControlFlow::Break(value))
        }
    }
}

pub fn eval_expr(expr: &Expr, env: &Rc<Environment>) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Nil => Ok(Value::Nil),
        Expr::Boolean(b) => Ok(Value::Boolean(*b)),
        Expr::Integer(n) => Ok(Value::Integer(*n)),
        Expr::Float(n) => Ok(Value::Float(*n)),
        Expr::String(s) => Ok(Value::String(s.clone())),

        Expr::Identifier(name) => env
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedReference(name.clone())),

        Expr::Grouping(inner) => eval_expr(inner, env),

        Expr::Prefix(UnOp::Neg, right) => match eval_expr(right, env)? {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            Value::Float(n) => Ok(Value::Float(-n)),
            _ => Err(RuntimeError::OperandMustBeNumber),
        },
        Expr::Prefix(UnOp::Not, right) => {
            let value = eval_expr(right, env)?;
            Ok(Value::Boolean(!value.is_truthy()))
        }

        Expr::Infix(BinOp::And, left, right) => {
            let lv = eval_expr(left, env)?;
            if !lv.is_truthy() {
                Ok(lv)
            } else {
                eval_expr(right, env)
            }
        }
        Expr::Infix(BinOp::Or, left, right) => {
            let lv = eval_expr(left, env)?;
            if lv.is_truthy() {
                Ok(lv)
            } else {
                eval_expr(right, env)
            }
        }

        Expr::Infix(BinOp::Eq, left, right) => {
            let lv = eval_expr(left, env)?;
            let rv = eval_expr(right, env)?;
            Ok(Value::Boolean(lv.values_equal(&rv)))
        }
        Expr::Infix(BinOp::NotEq, left, right) => {
            let lv = eval_expr(left, env)?;
            let rv = eval_expr(right, env)?;
            Ok(Value::Boolean(!lv.values_equal(&rv)))
        }

        Expr::Infix(op @ (BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div), left, right) => {
            let lv = eval_expr(left, env)?;
            let rv = eval_expr(right, env)?;
            arithmetic(*op, lv, rv)
        }

        Expr::Infix(
            op @ (BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq),
            left,
            right,
        ) => {
            let lv = eval_expr(left, env)?;
            let rv = eval_expr(right, env)?;
            comparison(*op, lv, rv)
        }

        Expr::Assign(name, value) => {
            let v = eval_expr(value, env)?;
            env.assign(name, v.clone())?;
            Ok(v)
        }

        Expr::Call(callee, args) => {
            let callee_value = eval_expr(callee, env)?;
            let mut arg_values = Vec::with_capacity(args.len());
            for arg in args {
                arg_values.push(eval_expr(arg, env)?);
            }
            call(callee_value, arg_values)
        }
    }
}

/// `+` concatenates two strings; otherwise `+ - * /` require two numbers.
/// Two integers stay integer for `+ - *`; any float operand promotes the
/// result to float. Integer `/` stays integer only when the quotient is
/// exact, otherwise it promotes too, so `7 / 2` is `3.5` not a truncated
/// `3`.
fn arithmetic(op: BinOp, lv: Value, rv: Value) -> Result<Value, RuntimeError> {
    use Value::*;
    if let (String(a), String(b)) = (&lv, &rv) {
        if op == BinOp::Add {
            return Ok(String(format!("{}{}", a, b)));
        }
        return Err(RuntimeError::OperandsMustBeNumber);
    }

    match (lv, rv) {
        (Integer(a), Integer(b)) => match op {
            BinOp::Add => Ok(Integer(a + b)),
            BinOp::Sub => Ok(Integer(a - b)),
            BinOp::Mul => Ok(Integer(a * b)),
            // Exact quotients stay integer; anything else promotes to
            // float, so `7*2/7/1` is `2` but `7/2` is `3.5` (spec 4.4/9).
            BinOp::Div => {
                let result = a as f64 / b as f64;
                if result.is_finite() && result.fract() == 0.0 {
                    Ok(Integer(result as i64))
                } else {
                    Ok(Float(result))
                }
            }
            _ => unreachable!("arithmetic only called with + - * /"),
        },
        (a @ (Integer(_) | Float(_)), b @ (Integer(_) | Float(_))) => {
            let a = as_f64(&a);
            let b = as_f64(&b);
            match op {
                BinOp::Add => Ok(Float(a + b)),
                BinOp::Sub => Ok(Float(a - b)),
                BinOp::Mul => Ok(Float(a * b)),
                BinOp::Div => Ok(Float(a / b)),
                _ => unreachable!("arithmetic only called with + - * /"),
            }
        }
        _ => Err(RuntimeError::OperandsMustBeNumber),
    }
}

fn comparison(op: BinOp, lv: Value, rv: Value) -> Result<Value, RuntimeError> {
    use Value::*;
    match (&lv, &rv) {
        (Integer(_) | Float(_), Integer(_) | Float(_)) => {
            let a = as_f64(&lv);
            let b = as_f64(&rv);
            let result = match op {
                BinOp::Less => a < b,
                BinOp::LessEq => a <= b,
                BinOp::Greater => a > b,
                BinOp::GreaterEq => a >= b,
                _ => unreachable!("comparison only called with < <= > >="),
            };
            Ok(Boolean(result))
        }
        _ => Err(RuntimeError::OperandsMustBeNumber),
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Integer(n) => *n as f64,
        Value::Float(n) => *n,
        _ => unreachable!("as_f64 only called on numeric values"),
    }
}

fn call(callee: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    match callee {
        Value::BuiltIn(_, f) => f(&args),
        Value::Function {
            params,
            body,
            closure,
        } => {
            if params.len() != args.len() {
                return Err(RuntimeError::ArityMismatch {
                    expected: params.len(),
                    actual: args.len(),
                });
            }
            let call_env = Environment::with_parent(closure);
            for (param, arg) in params.iter().zip(args) {
                call_env.define(param.clone(), arg);
            }
            match exec_stmt(&body, &call_env)? {
                ControlFlow::Break(v) => Ok(v),
                ControlFlow::Continue(_) => Ok(Value::Nil),
            }
        }
        _ => Err(RuntimeError::NotCallable),
    }
}

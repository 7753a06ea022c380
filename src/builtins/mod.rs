// ABOUTME: Built-in functions installed into the global environment before a program runs

mod console;
mod system;

use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;

/// Installs every built-in as an ordinary `Value::BuiltIn` binding in the
/// global scope. Sharing the environment with user definitions, rather
/// than keeping a separate builtin table, is what makes `fun print() {}`
/// legally shadow the built-in the same way any other redefinition would
/// (spec 4.4/9).
pub fn install(env: &Rc<Environment>) {
    env.define("print".to_string(), Value::BuiltIn("print", console::print));
    env.define("clock".to_string(), Value::BuiltIn("clock", system::clock));
}

// ABOUTME: Error types for the scan/parse/evaluate pipeline, one taxonomy per exit code

use thiserror::Error;

/// A lexical diagnostic, reported on the standard error stream as
/// `[line L] Error: <message>` and contributing to exit code 65.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl LexError {
    pub fn unterminated_string(line: usize) -> Self {
        LexError {
            line,
            message: "Unterminated string.".to_string(),
        }
    }

    pub fn unexpected_character(line: usize, ch: char) -> Self {
        LexError {
            line,
            message: format!("Unexpected character: {}", ch),
        }
    }
}

/// A syntax diagnostic, reported as `[line L] <message>` and contributing
/// to exit code 65.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn expected_token(line: usize, expected: &str, got: &str) -> Self {
        ParseError::new(
            line,
            format!("expected token to be {}, got {} instead", expected, got),
        )
    }

    pub fn expect_expression(line: usize, lexeme: &str) -> Self {
        ParseError::new(line, format!("Error at '{}': Expect expression.", lexeme))
    }
}

/// A runtime diagnostic (exit code 70). Unlike lex/parse errors these are
/// printed bare, with no `[line L]` prefix — the original source's runtime
/// object carried no line information, and the worked examples in spec §8
/// show bare messages on stderr for every runtime-error scenario.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Operand must be a number")]
    OperandMustBeNumber,

    #[error("Operands must be a number")]
    OperandsMustBeNumber,

    #[error("Variable or function {0} doesnt exist")]
    UndefinedReference(String),

    #[error("Variable {0} doesnt exist")]
    UndefinedAssignTarget(String),

    #[error("Expected {expected} arguments but got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("Can only call functions")]
    NotCallable,

    #[error("Cannot bind a function value to a variable")]
    NonPrimitiveInitializer,

    #[error("Cannot print a function value")]
    NonPrintableValue,
}

// ABOUTME: Expression and statement tree produced by the parser

use crate::token::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    /// The source symbol, reused by the AST dump format (spec 4.3/6).
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Identifier(String),
    Grouping(Box<Expr>),
    Prefix(UnOp, Box<Expr>),
    Infix(BinOp, Box<Expr>, Box<Expr>),
    Assign(String, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
}

impl Expr {
    /// Prefix-notation AST dump used by the `parse` subcommand (spec 6).
    pub fn dump(&self) -> String {
        match self {
            Expr::Nil => "nil".to_string(),
            Expr::Boolean(b) => b.to_string(),
            Expr::Integer(n) => format_number(*n as f64),
            Expr::Float(n) => format_number(*n),
            Expr::String(s) => s.clone(),
            Expr::Identifier(name) => name.clone(),
            Expr::Grouping(inner) => format!("(group {})", inner.dump()),
            Expr::Prefix(op, right) => format!("({} {})", op.symbol(), right.dump()),
            Expr::Infix(op, left, right) => {
                format!("({} {} {})", op.symbol(), left.dump(), right.dump())
            }
            Expr::Assign(name, value) => format!("(= {} {})", name, value.dump()),
            Expr::Call(callee, args) => {
                let mut out = format!("(call {}", callee.dump());
                for a in args {
                    out.push(' ');
                    out.push_str(&a.dump());
                }
                out.push(')');
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    ExpressionStmt(Expr),
    Declaration {
        names: Vec<String>,
        initializer: Expr,
    },
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_block: Box<Stmt>,
        else_block: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Expr,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
}

pub type Program = Vec<Stmt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_infix_and_grouping() {
        let expr = Expr::Infix(
            BinOp::Add,
            Box::new(Expr::Grouping(Box::new(Expr::Integer(1)))),
            Box::new(Expr::Integer(2)),
        );
        assert_eq!(expr.dump(), "(+ (group 1.0) 2.0)");
    }

    #[test]
    fn dump_prefix() {
        let expr = Expr::Prefix(UnOp::Neg, Box::new(Expr::Float(3.5)));
        assert_eq!(expr.dump(), "(- 3.5)");
    }
}

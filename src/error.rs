// error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural or arithmetic fault found while evaluating one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Invalid character in the expression")]
    InvalidCharacter(char),
    #[error("Invalid operator placement")]
    InvalidOperatorPlacement,
    /// A `)` with no matching `(`.
    #[error("Missing parenthesis")]
    MissingParenthesis,
    /// A `(` that is never closed.
    #[error("Invalid parenthesis")]
    UnbalancedParenthesis,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid postfix expression")]
    MalformedPostfix,
}

/// Durable storage fault in the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot read history file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write history file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot clear history file {}: {source}", path.display())]
    Clear { path: PathBuf, source: io::Error },
}

/// Everything the front end can get back from one line of input.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid characters found in expression input")]
    Validation,
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Storage(#[from] HistoryError),
}

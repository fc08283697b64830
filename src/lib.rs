//! Interactive infix calculator: a shunting-yard evaluator plus a
//! session/persisted history with shell-style recall.

pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod history;
pub mod repl;
pub mod tokenizer;
pub mod util;

pub use error::{CalcError, EvalError, HistoryError};
pub use evaluator::evaluate;
pub use history::History;
pub use tokenizer::validate;

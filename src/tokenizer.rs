// tokenizer.rs

use std::fmt;

use crate::error::EvalError;

/// Binary operators accepted in an expression.
pub const OPERATORS: &str = "+-*/";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// All operators are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// Raw digit/`.` run, parsed only when the postfix program runs.
    Number(String),
    Op(Operator),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// True iff every character is a digit, `.`, a parenthesis or an operator.
/// Expects whitespace to be stripped already; says nothing about structure.
pub fn validate(expr: &str) -> bool {
    expr.chars()
        .all(|c| is_number_char(c) || c == '(' || c == ')' || OPERATORS.contains(c))
}

pub fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            c if is_number_char(c) => {
                let mut num = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !is_number_char(next) {
                        break;
                    }
                    num.push(next);
                    chars.next();
                }
                tokens.push(Token::Number(num));
            }
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            c => match Operator::from_char(c) {
                Some(op) => tokens.push(Token::Op(op)),
                None => return Err(EvalError::InvalidCharacter(c)),
            },
        }
    }
    Ok(tokens)
}

// evaluator.rs
//
// Shunting-yard conversion to postfix, then a stack machine over the postfix
// program. Both stacks live only for the duration of one call.

use itertools::Itertools;
use log::debug;

use crate::error::EvalError;
use crate::tokenizer::{tokenize, Operator, Token};

/// Evaluates a whitespace-free infix expression and renders the result.
pub fn evaluate(expr: &str) -> Result<String, EvalError> {
    let tokens = tokenize(expr)?;
    let postfix = infix_to_postfix(&tokens)?;
    debug!("postfix for {:?}: {}", expr, postfix.iter().join(" "));
    let value = evaluate_postfix(&postfix)?;
    Ok(render(value))
}

/// Fixed six fractional digits, e.g. `14` renders as `14.000000`.
pub fn render(value: f64) -> String {
    format!("{:.6}", value)
}

/// Converts infix tokens into a postfix program with no parentheses left.
pub fn infix_to_postfix(tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();
    // an expression may not open with a binary operator
    let mut expect_operand = true;

    for tok in tokens {
        match tok {
            Token::Number(_) => {
                output.push(tok.clone());
                expect_operand = false;
            }
            Token::LParen => {
                ops.push(Token::LParen);
                expect_operand = true;
            }
            Token::RParen => {
                loop {
                    match ops.pop() {
                        Some(Token::LParen) => break,
                        Some(op) => output.push(op),
                        None => return Err(EvalError::MissingParenthesis),
                    }
                }
                expect_operand = false;
            }
            Token::Op(op) => {
                if expect_operand {
                    return Err(EvalError::InvalidOperatorPlacement);
                }
                while let Some(Token::Op(top)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Op(*top));
                    ops.pop();
                }
                ops.push(Token::Op(*op));
                expect_operand = true;
            }
        }
    }

    while let Some(top) = ops.pop() {
        if top == Token::LParen {
            return Err(EvalError::UnbalancedParenthesis);
        }
        output.push(top);
    }
    Ok(output)
}

fn apply(op: Operator, a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            // exact comparison, no tolerance
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    })
}

/// Runs a postfix program; exactly one value must be left on the stack.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut operands: Vec<f64> = Vec::new();
    for tok in postfix {
        match tok {
            Token::Number(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
                operands.push(value);
            }
            Token::Op(op) => {
                let (Some(b), Some(a)) = (operands.pop(), operands.pop()) else {
                    return Err(EvalError::MalformedPostfix);
                };
                operands.push(apply(*op, a, b)?);
            }
            Token::LParen | Token::RParen => return Err(EvalError::MalformedPostfix),
        }
    }
    match operands.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::MalformedPostfix),
    }
}

//! Tokenizer for arithmetic expressions
//!
//! Scans an expression string into a flat token vector. Numbers are maximal
//! digit-and-optional-decimal-point runs; `**` is consumed greedily before
//! `*` so exponentiation never splits into two multiplications.

use crate::calc::{CalcError, CalcResult};

/// A lexical token of an arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Number literal, already parsed to f64
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**`
    StarStar,
    LParen,
    RParen,
}

/// Scan `input` into tokens, skipping whitespace.
///
/// Returns `InvalidToken` for any character outside the grammar and
/// `InvalidExpression` for malformed number literals (e.g. `1.2.3`).
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                let mut seen_dot = false;
                while let Some(&d) = chars.peek() {
                    match d {
                        '0'..='9' => literal.push(d),
                        '.' if !seen_dot => {
                            seen_dot = true;
                            literal.push(d);
                        }
                        '.' => return Err(CalcError::InvalidExpression),
                        _ => break,
                    }
                    chars.next();
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| CalcError::InvalidExpression)?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                // greedy: `**` is one token
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::StarStar);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(CalcError::InvalidToken(other)),
        }
    }

    Ok(tokens)
}

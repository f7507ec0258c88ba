//! Recursive-descent evaluator over the token stream
//!
//! Grammar (BODMAS precedence, no AST materialized):
//!
//! ```text
//! expr   := term (('+'|'-') term)*
//! term   := factor (('*'|'/') factor)*
//! factor := base ('**' factor)?        // right-recursion: ** right-assoc
//! base   := number | '(' expr ')' | '-' base
//! ```

use crate::calc::{tokenize, CalcError, CalcResult, Token};

/// Evaluate an arithmetic expression string.
///
/// Returns the value as `f64` (integer-looking inputs still produce floats)
/// or the first error encountered. Errors inside parenthesized
/// sub-expressions short-circuit the enclosing expression unchanged.
pub fn evaluate(expression: &str) -> CalcResult<f64> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let value = parser.expr()?;

    // anything left over after a complete expr is a structural error
    match parser.peek() {
        None => Ok(value),
        Some(Token::RParen) => Err(CalcError::UnmatchedParentheses),
        Some(_) => Err(CalcError::InvalidExpression),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> CalcResult<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> CalcResult<f64> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> CalcResult<f64> {
        let base = self.base()?;
        if self.peek() == Some(&Token::StarStar) {
            self.advance();
            let exponent = self.factor()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn base(&mut self) -> CalcResult<f64> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::Minus) => Ok(-self.base()?),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(CalcError::UnmatchedParentheses),
                }
            }
            _ => Err(CalcError::InvalidExpression),
        }
    }
}

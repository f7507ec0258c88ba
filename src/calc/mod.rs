//! BODMAS arithmetic expression evaluator
//!
//! Parses and evaluates expressions over `+ - * / **` with parentheses and
//! unary minus, returning `f64` or a descriptive error. This is the only
//! computation facility exposed to the model; there is deliberately no
//! generic code-execution path.
//!
//! Pure and reentrant: no I/O, no shared state, bounded time proportional
//! to input length.
//!
//! Associativity: `+ - * /` are left-associative; `**` is right-associative
//! (`2**3**2 == 2**(3**2) == 512`), the conventional mathematical reading.

use thiserror::Error;

mod eval;
mod lexer;

pub use eval::evaluate;
pub(crate) use lexer::{tokenize, Token};

/// Errors produced while evaluating an expression.
///
/// All variants are recoverable by the caller; evaluation never panics on
/// malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A `/` with a zero right operand, at any nesting depth
    #[error("division by zero")]
    DivisionByZero,

    /// An opening parenthesis with no matching close, or vice versa
    #[error("unmatched parentheses")]
    UnmatchedParentheses,

    /// A character sequence that is not a number, operator, or parenthesis
    #[error("invalid token '{0}'")]
    InvalidToken(char),

    /// Structurally malformed input, e.g. empty input or two adjacent numbers
    #[error("invalid expression")]
    InvalidExpression,
}

/// Result alias local to the evaluator.
pub type CalcResult<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(expr: &str) -> f64 {
        evaluate(expr).unwrap_or_else(|e| panic!("'{}' failed: {}", expr, e))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(ok("2+3*4"), 14.0);
        assert_eq!(ok("2*3+4"), 10.0);
        assert_eq!(ok("10-4/2"), 8.0);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(ok("(2+3)*4"), 20.0);
        assert_eq!(ok("2*(3+4)/7"), 2.0);
        assert_eq!(ok("(125 + 75)/2"), 100.0);
    }

    #[test]
    fn test_integer_inputs_produce_floats() {
        assert_eq!(ok("2"), 2.0);
        assert_eq!(ok("(7)"), 7.0);
    }

    #[test]
    fn test_decimals() {
        assert_eq!(ok("1.5+2.25"), 3.75);
        assert_eq!(ok("0.1*10"), 0.1f64 * 10.0);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        // 2**(3**2), not (2**3)**2
        assert_eq!(ok("2**3**2"), 512.0);
        assert_eq!(ok("2**3"), 8.0);
        assert_eq!(ok("2**3+1"), 9.0);
    }

    #[test]
    fn test_exponent_binds_tighter_than_mul() {
        assert_eq!(ok("2*3**2"), 18.0);
        assert_eq!(ok("3**2*2"), 18.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(ok("-5+2"), -3.0);
        assert_eq!(ok("-(2+3)"), -5.0);
        assert_eq!(ok("2--3"), 5.0);
        assert_eq!(ok("--4"), 4.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("10/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_division_by_zero_propagates_through_nesting() {
        // inner error must not be swallowed by enclosing levels
        assert_eq!(evaluate("(1+(4/0))*2"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("((3/0))"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_unmatched_parentheses() {
        assert_eq!(evaluate("(1+2"), Err(CalcError::UnmatchedParentheses));
        assert_eq!(evaluate("1+2)"), Err(CalcError::UnmatchedParentheses));
        assert_eq!(evaluate("((1+2)"), Err(CalcError::UnmatchedParentheses));
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(evaluate("2x+1"), Err(CalcError::InvalidToken('x')));
        assert_eq!(evaluate("1+@"), Err(CalcError::InvalidToken('@')));
    }

    #[test]
    fn test_invalid_expression() {
        assert_eq!(evaluate(""), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("   "), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("()"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("2 3"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("+"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("2+"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("*3"), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(ok(" 2 + 3 * 4 "), 14.0);
        assert_eq!(ok("2 ** 3"), 8.0);
    }

    #[test]
    fn test_idempotent() {
        let first = evaluate("2*(3+4)/7");
        let second = evaluate("2*(3+4)/7");
        assert_eq!(first, second);
    }
}

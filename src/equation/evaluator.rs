//! Evaluation of the player's equation.
//!
//! The token grammar is tiny (integer literals and four operators), so it is parsed
//! directly with a two-level recursive descent:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := literal (('×' | '÷') literal)*
//! literal    := number number*      (adjacent numbers concatenate as digits)
//! ```

use smallvec::SmallVec;

use super::{EquationItem, Operator};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Literal(f64),
    Operator(Operator),
}

/// Evaluates an equation, returning `None` when it has no usable value.
///
/// - An empty equation, or one ending in an operator, is incomplete.
/// - Dividing by a literal `0` evaluates to positive infinity. This never matches an
///   enemy, but it is still a value the keypad can show.
/// - Any other non-finite or malformed result is `None`.
/// - Results are rounded to two decimal places, halves towards positive infinity.
pub fn evaluate(items: &[EquationItem]) -> Option<f64> {
    if items.last()?.is_operator() {
        return None;
    }

    if divides_by_literal_zero(items) {
        return Some(f64::INFINITY);
    }

    let tokens = tokenize(items);
    let mut parser = Parser { tokens: &tokens, cursor: 0 };
    let value = parser.expression()?;

    if parser.cursor != tokens.len() || !value.is_finite() {
        return None;
    }

    Some(round_to_hundredths(value))
}

fn divides_by_literal_zero(items: &[EquationItem]) -> bool {
    items.windows(2).any(|pair| {
        matches!(
            pair,
            [EquationItem::Operator(Operator::Divide), EquationItem::Number(0)]
        )
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn digit_count(mut n: u32) -> i32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Collapses runs of numbers into single literals.
fn tokenize(items: &[EquationItem]) -> SmallVec<[Token; 16]> {
    let mut tokens: SmallVec<[Token; 16]> = SmallVec::new();
    for item in items {
        match *item {
            EquationItem::Number(n) => {
                if let Some(Token::Literal(previous)) = tokens.last_mut() {
                    *previous = *previous * 10f64.powi(digit_count(n)) + f64::from(n);
                } else {
                    tokens.push(Token::Literal(f64::from(n)));
                }
            }
            EquationItem::Operator(op) => tokens.push(Token::Operator(op)),
        }
    }
    tokens
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl Parser<'_> {
    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.next_operator(|op| !op.binds_tightly()) {
            value = apply(op, value, self.term()?);
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.literal()?;
        while let Some(op) = self.next_operator(Operator::binds_tightly) {
            value = apply(op, value, self.literal()?);
        }
        Some(value)
    }

    fn literal(&mut self) -> Option<f64> {
        match self.tokens.get(self.cursor) {
            Some(Token::Literal(value)) => {
                self.cursor += 1;
                Some(*value)
            }
            _ => None,
        }
    }

    /// Consumes the next token if it is an operator accepted by `accept`.
    fn next_operator(&mut self, accept: impl Fn(Operator) -> bool) -> Option<Operator> {
        match self.tokens.get(self.cursor) {
            Some(Token::Operator(op)) if accept(*op) => {
                self.cursor += 1;
                Some(*op)
            }
            _ => None,
        }
    }
}

fn apply(op: Operator, lhs: f64, rhs: f64) -> f64 {
    match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => lhs / rhs,
    }
}

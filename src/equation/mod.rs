//! The player's equation: the tokens they have typed so far and the rules for typing more.

use bevy_ecs::resource::Resource;
use smallvec::SmallVec;
use strum_macros::{EnumCount, EnumIter};

use crate::difficulty::DifficultyConfig;
use crate::error::InputError;

pub mod evaluator;

pub use evaluator::evaluate;

/// One of the four arithmetic operators offered on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The symbol printed on the keypad.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '×' | '*' | 'x' => Some(Operator::Multiply),
            '÷' | '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Multiplication and division bind tighter than addition and subtraction.
    pub const fn binds_tightly(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single key press recorded in the equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationItem {
    Number(u32),
    Operator(Operator),
}

impl EquationItem {
    pub fn is_operator(&self) -> bool {
        matches!(self, EquationItem::Operator(_))
    }
}

impl std::fmt::Display for EquationItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquationItem::Number(n) => write!(f, "{n}"),
            EquationItem::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// The equation being composed, together with its most recent evaluation.
///
/// Every edit re-evaluates, so `result()` always reflects the current tokens. The buffer
/// enforces the input rules (no leading operator, no two operators in a row); the
/// evaluator itself stays tolerant of malformed sequences.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Equation {
    items: SmallVec<[EquationItem; 16]>,
    result: Option<f64>,
}

impl Equation {
    pub fn items(&self) -> &[EquationItem] {
        &self.items
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a number, provided the current level offers that button.
    pub fn push_number(&mut self, number: u32, difficulty: &DifficultyConfig) -> Result<(), InputError> {
        if !difficulty.available_buttons.contains(&number) {
            return Err(InputError::ButtonUnavailable(number));
        }
        self.items.push(EquationItem::Number(number));
        self.reevaluate();
        Ok(())
    }

    /// Appends an operator after a number, provided the current level allows it.
    pub fn push_operator(&mut self, operator: Operator, difficulty: &DifficultyConfig) -> Result<(), InputError> {
        match self.items.last() {
            None => return Err(InputError::EmptyEquation),
            Some(item) if item.is_operator() => return Err(InputError::ConsecutiveOperator),
            Some(_) => {}
        }
        if !difficulty.allowed_operators.allows(operator) {
            return Err(InputError::OperatorUnavailable(operator));
        }
        self.items.push(EquationItem::Operator(operator));
        self.reevaluate();
        Ok(())
    }

    /// Removes the last token, if any.
    pub fn backspace(&mut self) {
        self.items.pop();
        self.reevaluate();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.result = None;
    }

    fn reevaluate(&mut self) {
        self.result = evaluate(&self.items);
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

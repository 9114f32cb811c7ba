use math_castle::{
    difficulty::DifficultyConfig,
    equation::{evaluate, Equation, EquationItem, Operator},
    error::InputError,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

use common::items;

#[test]
fn test_evaluate_empty_is_none() {
    assert_that(&evaluate(&[])).is_none();
}

#[test]
fn test_evaluate_trailing_operator_is_none() {
    for operator in Operator::iter() {
        let mut sequence = items("2+3");
        sequence.push(EquationItem::Operator(operator));
        assert_that(&evaluate(&sequence)).is_none();
    }
    assert_that(&evaluate(&[EquationItem::Operator(Operator::Add)])).is_none();
}

#[test]
fn test_evaluate_precedence() {
    assert_that(&evaluate(&items("2+3×4"))).is_equal_to(Some(14.0));
    assert_that(&evaluate(&items("2×3+4"))).is_equal_to(Some(10.0));
    assert_that(&evaluate(&items("9-4÷2"))).is_equal_to(Some(7.0));
}

#[test]
fn test_evaluate_left_associative() {
    assert_that(&evaluate(&items("9-4-3"))).is_equal_to(Some(2.0));
    assert_that(&evaluate(&items("8÷4÷2"))).is_equal_to(Some(1.0));
}

#[test]
fn test_evaluate_division_by_literal_zero_is_infinity() {
    assert_that(&evaluate(&items("6÷0"))).is_equal_to(Some(f64::INFINITY));
    assert_that(&evaluate(&items("1+6÷0"))).is_equal_to(Some(f64::INFINITY));
}

#[test]
fn test_evaluate_division_by_computed_zero_is_none() {
    // Only a literal zero after the division sign is the special case.
    assert_that(&evaluate(&items("6÷2-2"))).is_equal_to(Some(1.0));
    assert_that(&evaluate(&items("6÷5×0"))).is_equal_to(Some(0.0));
}

#[test]
fn test_evaluate_rounds_to_hundredths() {
    assert_that(&evaluate(&items("10÷3"))).is_equal_to(Some(3.33));
    assert_that(&evaluate(&items("2÷3"))).is_equal_to(Some(0.67));
}

#[test]
fn test_evaluate_rounds_halves_upwards() {
    assert_that(&evaluate(&items("33÷24"))).is_equal_to(Some(1.38));
    assert_that(&evaluate(&items("1-33÷24"))).is_equal_to(Some(-0.37));
    assert_that(&evaluate(&items("1-21÷8"))).is_equal_to(Some(-1.62));
}

#[test]
fn test_evaluate_negative_results() {
    assert_that(&evaluate(&items("2-5"))).is_equal_to(Some(-3.0));
}

#[test]
fn test_adjacent_numbers_concatenate() {
    assert_that(&evaluate(&items("12+3"))).is_equal_to(Some(15.0));
    assert_that(&evaluate(&[EquationItem::Number(10), EquationItem::Number(5)])).is_equal_to(Some(105.0));
    assert_that(&evaluate(&[EquationItem::Number(2), EquationItem::Number(20)])).is_equal_to(Some(220.0));
}

#[test]
fn test_evaluate_leading_operator_is_none() {
    assert_that(&evaluate(&items("+3"))).is_none();
    assert_that(&evaluate(&items("3++3"))).is_none();
}

#[test]
fn test_equation_tracks_result() {
    let config = DifficultyConfig::for_level(1);
    let mut equation = Equation::default();

    equation.push_number(4, &config).unwrap();
    assert_that(&equation.result()).is_equal_to(Some(4.0));

    equation.push_operator(Operator::Add, &config).unwrap();
    assert_that(&equation.result()).is_none();

    equation.push_number(3, &config).unwrap();
    assert_that(&equation.result()).is_equal_to(Some(7.0));
    assert_eq!(equation.to_string(), "4 + 3");

    equation.backspace();
    assert_that(&equation.result()).is_none();
    assert_that(&equation.items().len()).is_equal_to(2);

    equation.clear();
    assert_that(&equation.is_empty()).is_true();
    assert_that(&equation.result()).is_none();
}

#[test]
fn test_equation_rejects_leading_operator() {
    let config = DifficultyConfig::for_level(1);
    let mut equation = Equation::default();

    assert_that(&equation.push_operator(Operator::Add, &config)).is_err_containing(InputError::EmptyEquation);
    assert_that(&equation.is_empty()).is_true();
}

#[test]
fn test_equation_rejects_consecutive_operators() {
    let config = DifficultyConfig::for_level(1);
    let mut equation = Equation::default();
    equation.push_number(2, &config).unwrap();
    equation.push_operator(Operator::Add, &config).unwrap();

    assert_that(&equation.push_operator(Operator::Subtract, &config)).is_err_containing(InputError::ConsecutiveOperator);
    assert_eq!(
        equation.items(),
        &[EquationItem::Number(2), EquationItem::Operator(Operator::Add)]
    );
}

#[test]
fn test_equation_rejects_keys_the_level_does_not_offer() {
    let config = DifficultyConfig::for_level(1);
    let mut equation = Equation::default();

    assert_that(&equation.push_number(10, &config)).is_err_containing(InputError::ButtonUnavailable(10));
    equation.push_number(3, &config).unwrap();
    assert_that(&equation.push_operator(Operator::Multiply, &config))
        .is_err_containing(InputError::OperatorUnavailable(Operator::Multiply));

    let config = DifficultyConfig::for_level(5);
    assert_that(&equation.push_operator(Operator::Divide, &config)).is_ok();
}

#[test]
fn test_backspace_on_empty_equation() {
    let mut equation = Equation::default();
    equation.backspace();
    assert_that(&equation.is_empty()).is_true();
    assert_that(&equation.result()).is_none();
}

#[test]
fn test_operator_symbols() {
    for operator in Operator::iter() {
        assert_that(&Operator::from_symbol(operator.symbol())).is_equal_to(Some(operator));
    }
    assert_that(&Operator::from_symbol('*')).is_equal_to(Some(Operator::Multiply));
    assert_that(&Operator::from_symbol('?')).is_none();
}

//! Expression evaluation using fasteval.
//!
//! The arithmetic itself is delegated to an [`Evaluator`]; this module owns
//! what happens around that call: precondition checks, glyph sanitization and
//! classification of the returned value.

use super::error::{CalcError, EvaluatorError};
use super::sanitize::{check_committable, sanitize};

/// An arithmetic evaluation service.
///
/// Receives a sanitized infix expression (`+ - * / ( ) sqrt`) and returns
/// the raw `f64`. Non-finite values are returned as-is; classification is the
/// caller's job.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluatorError>;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluatorError> {
        (**self).evaluate(expression)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluatorError> {
        (**self).evaluate(expression)
    }
}

/// Default evaluator backed by fasteval.
///
/// fasteval has no built-in square root, so `sqrt` is provided through the
/// namespace callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastevalEvaluator;

impl Evaluator for FastevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluatorError> {
        let mut namespace = |name: &str, args: Vec<f64>| -> Option<f64> {
            match (name, args.as_slice()) {
                ("sqrt", [x]) => Some(x.sqrt()),
                _ => None,
            }
        };

        fasteval::ez_eval(expression, &mut namespace)
            .map_err(|e| EvaluatorError(format!("{:?}", e)))
    }
}

/// Check, sanitize and evaluate a display buffer.
///
/// Precondition failures are returned without calling the evaluator.
pub fn evaluate_buffer<E: Evaluator + ?Sized>(
    evaluator: &E,
    buffer: &str,
) -> Result<f64, CalcError> {
    check_committable(buffer)?;

    let sanitized = sanitize(buffer);
    let value = evaluator
        .evaluate(&sanitized)
        .map_err(|e| CalcError::MalformedExpression(e.0))?;

    classify(value)
}

/// Sort a raw evaluator value into a finite result or a failure kind.
pub fn classify(value: f64) -> Result<f64, CalcError> {
    if value.is_infinite() {
        Err(CalcError::DivisionByZero)
    } else if value.is_nan() {
        Err(CalcError::InvalidDomain)
    } else {
        Ok(value)
    }
}

/// Format a number for display with thousand separators.
pub fn format_display(value: f64) -> String {
    let raw = format_result(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    format!("{}{}{}", sign, with_separators(int_part), frac_part)
}

/// Insert a comma every three digits, counting from the right.
fn with_separators(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a number for the input buffer (raw number, no separators).
///
/// Uses the shortest text that parses back to the same `f64`. It never has an
/// exponent, so it only contains digits, `.` and `-` and can be edited and
/// committed again without losing precision.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(buffer: &str) -> Result<f64, CalcError> {
        evaluate_buffer(&FastevalEvaluator, buffer)
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(eval("2+2"), Ok(4.0));
        assert_eq!(eval("(2+3)×4"), Ok(20.0));
        assert_eq!(eval("9÷4"), Ok(2.25));
    }

    #[test]
    fn test_percent() {
        assert_eq!(eval("50%"), Ok(0.5));
        assert_eq!(eval("200×50%"), Ok(100.0));
    }

    #[test]
    fn test_square_root() {
        assert_eq!(eval("√(16)"), Ok(4.0));
        assert_eq!(eval("√(9)+1"), Ok(4.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5÷0"), Err(CalcError::DivisionByZero));
        assert_eq!(eval("-5÷0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_negative_square_root() {
        assert_eq!(eval("√(-4)"), Err(CalcError::InvalidDomain));
    }

    #[test]
    fn test_invalid_expression() {
        // Operator with no right-hand operand.
        assert!(matches!(
            FastevalEvaluator.evaluate("2 +* 2"),
            Err(EvaluatorError(_))
        ));
        assert!(matches!(
            eval("2+×2"),
            Err(CalcError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_unknown_function_is_malformed() {
        assert!(FastevalEvaluator.evaluate("cbrt(8)").is_err());
    }

    #[test]
    fn test_preconditions_before_evaluation() {
        assert_eq!(eval("(1+2"), Err(CalcError::UnbalancedParentheses));
        assert_eq!(eval("3+"), Err(CalcError::TrailingOperator));
        assert_eq!(eval(""), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(1.5), Ok(1.5));
        assert_eq!(classify(f64::INFINITY), Err(CalcError::DivisionByZero));
        assert_eq!(classify(f64::NEG_INFINITY), Err(CalcError::DivisionByZero));
        assert_eq!(classify(f64::NAN), Err(CalcError::InvalidDomain));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(-12.0), "-12");
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_result(1000000.0), "1000000");
    }

    #[test]
    fn test_format_result_keeps_small_values() {
        assert_eq!(format_result(1e-12), "0.000000000001");
        assert_eq!(format_result(-2.5e-11), "-0.000000000025");
    }

    #[test]
    fn test_format_result_round_trips() {
        for value in [1.0 / 3.0, 0.1 + 0.2, 1e-12, 123456.789, -7.25, 1e20] {
            assert_eq!(format_result(value).parse::<f64>(), Ok(value));
        }
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_display(1000000.0), "1,000,000");
        assert_eq!(format_display(-1234.5), "-1,234.5");
        assert_eq!(format_display(-0.25), "-0.25");
        assert_eq!(format_display(999.0), "999");
        assert_eq!(format_display(1e-12), "0.000000000001");
    }
}

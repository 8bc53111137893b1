//! Error types for admission and evaluation.

use thiserror::Error;

/// Every failure the calculator surfaces to the user.
///
/// None of these are fatal: admission errors leave the buffer untouched,
/// commit errors clear it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Appending the key would push the buffer past its maximum length.
    #[error("Maximum input length of {max} characters reached.")]
    InputTooLong { max: usize },
    #[error("Unbalanced parentheses.")]
    UnbalancedParentheses,
    #[error("Expression cannot end with an operator.")]
    TrailingOperator,
    #[error("Nothing to evaluate.")]
    EmptyExpression,
    #[error("Cannot divide by zero.")]
    DivisionByZero,
    /// The evaluator produced an undefined real result, e.g. the square root
    /// of a negative number.
    #[error("Result is undefined for real numbers.")]
    InvalidDomain,
    /// The evaluator rejected the syntax. Holds the evaluator's own detail,
    /// which is logged but not shown to the user.
    #[error("Invalid expression.")]
    MalformedExpression(String),
}

/// Coarse failure categories used by the notification layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InputTooLong,
    DivisionByZero,
    InvalidDomain,
    MalformedExpression,
}

impl CalcError {
    /// Collapse this error into the category shown to the user.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InputTooLong { .. } => FailureKind::InputTooLong,
            Self::DivisionByZero => FailureKind::DivisionByZero,
            Self::InvalidDomain => FailureKind::InvalidDomain,
            Self::UnbalancedParentheses
            | Self::TrailingOperator
            | Self::EmptyExpression
            | Self::MalformedExpression(_) => FailureKind::MalformedExpression,
        }
    }

    /// Whether this error was raised before the buffer reached the evaluator.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedParentheses | Self::TrailingOperator | Self::EmptyExpression
        )
    }
}

/// Failure reported by an [`Evaluator`](super::Evaluator) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EvaluatorError(pub String);

/// A tap token that is not part of the keypad alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key: {0:?}")]
pub struct UnknownKey(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_errors_are_malformed() {
        for err in [
            CalcError::UnbalancedParentheses,
            CalcError::TrailingOperator,
            CalcError::EmptyExpression,
        ] {
            assert!(err.is_precondition());
            assert_eq!(err.kind(), FailureKind::MalformedExpression);
        }
    }

    #[test]
    fn test_evaluation_errors_keep_their_kind() {
        assert_eq!(CalcError::DivisionByZero.kind(), FailureKind::DivisionByZero);
        assert_eq!(CalcError::InvalidDomain.kind(), FailureKind::InvalidDomain);
        assert!(!CalcError::DivisionByZero.is_precondition());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CalcError::InputTooLong { max: 20 }.to_string(),
            "Maximum input length of 20 characters reached."
        );
        assert_eq!(
            CalcError::MalformedExpression("UnparsedTokensRemaining(\"(3)\")".into()).to_string(),
            "Invalid expression."
        );
    }
}

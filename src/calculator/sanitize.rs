//! Commit-time checks and glyph substitution.

use super::admission::ends_with_operator;
use super::error::CalcError;

/// Display glyph to evaluator syntax. The glyphs don't overlap, so the order
/// of substitution doesn't matter.
const SUBSTITUTIONS: &[(char, &str)] = &[('×', "*"), ('÷', "/"), ('%', "/100"), ('√', "sqrt")];

/// Reject buffers that must never reach the evaluator.
pub fn check_committable(buffer: &str) -> Result<(), CalcError> {
    if buffer.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let opened = buffer.chars().filter(|&c| c == '(').count();
    let closed = buffer.chars().filter(|&c| c == ')').count();
    if opened != closed {
        return Err(CalcError::UnbalancedParentheses);
    }

    if ends_with_operator(buffer) {
        return Err(CalcError::TrailingOperator);
    }

    Ok(())
}

/// Rewrite display glyphs into the evaluator's operator syntax.
pub fn sanitize(buffer: &str) -> String {
    let mut out = String::with_capacity(buffer.len() + 8);
    for c in buffer.chars() {
        match SUBSTITUTIONS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

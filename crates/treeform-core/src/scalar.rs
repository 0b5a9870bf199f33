// crates/treeform-core/src/scalar.rs
// ============================================================================
// Module: Scalar Text Codec
// Description: Renders scalar values to leaf-file text and parses them back.
// Purpose: Keep the bit-exact leaf convention in one place for both sides.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Leaf files carry one scalar each as UTF-8 text. The rules both sides must
//! agree on live here: booleans are written as exactly `true`/`false` and
//! read against a permissive allow-list; integers are plain base-10 digits;
//! a float is recognized on read by the presence of `.` or `e`/`E`, so the
//! writer guarantees every float carries one of those markers (a whole float
//! renders with a trailing `.0`). Strings are raw text.
//!
//! Rendering and parsing are total over their own domain and return `None`
//! for anything outside it; callers turn that into a diagnostic naming the
//! file.

use serde_json::Number;
use serde_json::Value;

use crate::schema::ScalarKind;

// ============================================================================
// SECTION: Leaf Vocabulary
// ============================================================================

/// Exact text written for a true boolean.
pub const TRUE_TEXT: &str = "true";

/// Exact text written for a false boolean.
pub const FALSE_TEXT: &str = "false";

/// Spellings read as true, compared ASCII-case-insensitively.
pub const TRUE_SPELLINGS: [&str; 3] = ["true", "1", "yes"];

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a scalar value as the exact file text for its kind.
///
/// Returns `None` when the value's shape does not fit the kind: a
/// float-backed number under [`ScalarKind::Integer`], or any value of the
/// wrong variant. Under [`ScalarKind::Number`] both integer- and
/// float-backed numbers render, and the int/float distinction survives in
/// the text (float text always carries a `.` or an exponent marker).
#[must_use]
pub fn render(kind: ScalarKind, value: &Value) -> Option<String> {
    match (kind, value) {
        (ScalarKind::String, Value::String(text)) => Some(text.clone()),
        (ScalarKind::Boolean, Value::Bool(flag)) => {
            Some(if *flag { TRUE_TEXT } else { FALSE_TEXT }.to_owned())
        }
        (ScalarKind::Integer, Value::Number(number)) if !number.is_f64() => {
            Some(number.to_string())
        }
        (ScalarKind::Number, Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses trimmed leaf text into a value of the given kind.
///
/// Strings and booleans always parse (the boolean allow-list maps everything
/// outside it to false). Integer and number parses return `None` on text
/// that does not fit, including non-finite float spellings.
#[must_use]
pub fn parse(kind: ScalarKind, text: &str) -> Option<Value> {
    match kind {
        ScalarKind::String => Some(Value::String(text.to_owned())),
        ScalarKind::Boolean => Some(Value::Bool(parse_boolean(text))),
        ScalarKind::Integer => parse_integer(text),
        ScalarKind::Number => {
            if has_float_marker(text) {
                parse_float(text)
            } else {
                parse_integer(text)
            }
        }
    }
}

/// Reads boolean text: true for the allow-list spellings, false otherwise.
#[must_use]
pub fn parse_boolean(text: &str) -> bool {
    TRUE_SPELLINGS
        .iter()
        .any(|accepted| text.eq_ignore_ascii_case(accepted))
}

/// Float-detection rule of the read side: `.` or `e`/`E` present.
#[must_use]
pub fn has_float_marker(text: &str) -> bool {
    text.contains(['.', 'e', 'E'])
}

/// Base-10 integer parse covering the full `i64` range, with a `u64`
/// fallback for larger non-negative values.
fn parse_integer(text: &str) -> Option<Value> {
    text.parse::<i64>()
        .map(Value::from)
        .ok()
        .or_else(|| text.parse::<u64>().map(Value::from).ok())
}

/// Finite float parse; overflowing or non-numeric text yields `None`.
fn parse_float(text: &str) -> Option<Value> {
    let parsed = text.parse::<f64>().ok()?;
    Number::from_f64(parsed).map(Value::Number)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

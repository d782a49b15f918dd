//! Template, selector, and condition resolution against the user context.
//!
//! Resolution never aborts a run: a missing template variable stays in the
//! output as its literal `{{...}}` token, and a condition that cannot be
//! evaluated (no operator, non-numeric operands, unknown check operator)
//! evaluates to false. Both degradations are surfaced as log diagnostics.

use crate::context::{ContextValue, UserContext};
use crate::workflow::{CheckOperator, DataCheck};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

mod selectors;

pub use selectors::SelectorRegistry;

static TEMPLATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("template pattern is valid"));

/// Comparison tokens in priority order; the first token present in a resolved
/// expression decides how the condition is evaluated.
const CONDITION_OPERATORS: &[&str] = &[" > ", " < ", " >= ", " <= ", " == ", " != ", " contains "];

/// Resolves template placeholders, selector constants, and branch conditions
/// for a single run.
///
/// Owns the run's [`UserContext`] and a [`SelectorRegistry`]; the executor
/// consults it for every node parameter and branch decision.
pub struct TemplateResolver {
    context: UserContext,
    selectors: SelectorRegistry,
}

impl TemplateResolver {
    pub fn new(context: UserContext) -> Self {
        Self {
            context,
            selectors: SelectorRegistry::default(),
        }
    }

    pub fn with_selectors(context: UserContext, selectors: SelectorRegistry) -> Self {
        Self { context, selectors }
    }

    pub fn context(&self) -> &UserContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut UserContext {
        &mut self.context
    }

    pub fn selectors(&self) -> &SelectorRegistry {
        &self.selectors
    }

    pub fn selectors_mut(&mut self) -> &mut SelectorRegistry {
        &mut self.selectors
    }

    /// Replaces every `{{key}}` placeholder with the context value bound to
    /// the whole trimmed key (dots included). Unknown placeholders are left
    /// untouched; text without placeholders passes through unchanged.
    pub fn resolve(&self, template: &str) -> String {
        if template.is_empty() {
            return String::new();
        }

        TEMPLATE_PATTERN
            .replace_all(template, |captures: &Captures<'_>| {
                let expr = captures[1].trim();
                match self.context.get(expr) {
                    Some(value) => {
                        let resolved = value.to_string();
                        debug!(expr = %expr, resolved = %resolved, "template resolved");
                        resolved
                    }
                    None => {
                        warn!(expr = %expr, "template variable not found");
                        captures[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    /// Maps a selector constant through the registry when the token has the
    /// constant lexical shape, then applies template resolution to the result,
    /// so a mapped selector may itself contain `{{...}}` placeholders.
    pub fn resolve_selector(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let mapped = if SelectorRegistry::is_constant(raw) {
            match self.selectors.get(raw) {
                Some(selector) => {
                    debug!(constant = %raw, selector = %selector, "mapped selector constant");
                    selector.to_string()
                }
                None => {
                    warn!(constant = %raw, "unknown selector constant");
                    raw.to_string()
                }
            }
        } else {
            raw.to_string()
        };

        self.resolve(&mapped)
    }

    /// Resolves templates in the expression, then evaluates it against the
    /// first comparison operator found. An expression without any recognized
    /// operator is false; a bare flag is not a condition.
    pub fn evaluate_condition(&self, expression: &str) -> bool {
        let resolved = self.resolve(expression);
        debug!(expression = %expression, resolved = %resolved, "evaluating condition");

        for &token in CONDITION_OPERATORS {
            if !resolved.contains(token) {
                continue;
            }
            return match token {
                " > " => numeric_comparison(&resolved, token, |l, r| l > r),
                " < " => numeric_comparison(&resolved, token, |l, r| l < r),
                " >= " => numeric_comparison(&resolved, token, |l, r| l >= r),
                " <= " => numeric_comparison(&resolved, token, |l, r| l <= r),
                " == " => string_equality(&resolved, token, true),
                " != " => string_equality(&resolved, token, false),
                " contains " => substring_containment(&resolved, token),
                _ => false,
            };
        }

        warn!(resolved = %resolved, "no comparison operator in condition");
        false
    }

    /// Evaluates a structured data check against the context. A missing data
    /// path or an unknown operator yields false.
    pub fn evaluate_data_check(&self, check: &DataCheck) -> bool {
        let Some(value) = self.context.get(&check.data_path) else {
            debug!(data_path = %check.data_path, "data path not found");
            return false;
        };

        let expected = &check.expected_value;
        match &check.operator {
            CheckOperator::Equals => value.to_string() == expected.to_string(),
            CheckOperator::GreaterThan => numeric_pair(value, expected)
                .map(|(actual, threshold)| actual > threshold)
                .unwrap_or(false),
            CheckOperator::Contains => value.to_string().contains(&expected.to_string()),
            CheckOperator::Other(name) => {
                warn!(operator = %name, "unknown data check operator");
                false
            }
        }
    }
}

fn split_operands<'a>(expression: &'a str, token: &str) -> Option<(&'a str, &'a str)> {
    let (left, right) = expression.split_once(token)?;
    Some((left.trim(), right.trim()))
}

fn numeric_comparison(expression: &str, token: &str, compare: impl Fn(f64, f64) -> bool) -> bool {
    let Some((left, right)) = split_operands(expression, token) else {
        return false;
    };
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => compare(l, r),
        _ => {
            warn!(left = %left, right = %right, "non-numeric comparison operands");
            false
        }
    }
}

fn string_equality(expression: &str, token: &str, want_equal: bool) -> bool {
    let Some((left, right)) = split_operands(expression, token) else {
        return false;
    };
    (strip_quotes(left) == strip_quotes(right)) == want_equal
}

fn substring_containment(expression: &str, token: &str) -> bool {
    let Some((left, right)) = split_operands(expression, token) else {
        return false;
    };
    strip_quotes(left).contains(strip_quotes(right))
}

/// Removes one balanced pair of surrounding quote characters, if present.
fn strip_quotes(operand: &str) -> &str {
    let bytes = operand.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &operand[1..operand.len() - 1];
        }
    }
    operand
}

fn numeric_pair(value: &ContextValue, expected: &ContextValue) -> Option<(f64, f64)> {
    let actual = value.to_string().parse::<f64>().ok()?;
    let threshold = expected.to_string().parse::<f64>().ok()?;
    Some((actual, threshold))
}

//! Policy evaluation engine.
//!
//! Evaluates a record against a policy by checking rules in list order.
//! The first matching rule wins. If no rule matches, the policy's default
//! decision applies.

use std::sync::LazyLock;

use crate::attributes::Record;
use crate::policy::{Condition, Decision, Policy};

static AZURE_AD_POLICY: LazyLock<Policy> = LazyLock::new(Policy::azure_ad);

// ============================================================================
// Evaluation
// ============================================================================

/// The result of evaluating a record against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether access is granted.
    pub decision: Decision,
    /// The name of the rule that matched, or `None` if the default was applied.
    pub matched_rule: Option<String>,
    /// Human-readable explanation of why this decision was made.
    pub reason: String,
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluates a record against a policy.
///
/// # Postcondition
///
/// Always returns an `Evaluation`; absent attributes compare as `""`.
pub fn evaluate(policy: &Policy, record: &Record) -> Evaluation {
    for (index, rule) in policy.rules.iter().enumerate() {
        let all_conditions_match = rule
            .conditions
            .iter()
            .all(|cond| evaluate_condition(cond, record));

        if all_conditions_match {
            return Evaluation {
                decision: rule.decision,
                matched_rule: Some(rule.name.clone()),
                reason: format!("Matched rule '{}' (position {})", rule.name, index + 1),
            };
        }
    }

    Evaluation {
        decision: policy.default_decision,
        matched_rule: None,
        reason: format!(
            "No rule matched; applying default decision: {}",
            policy.default_decision
        ),
    }
}

/// Decides a record against the built-in [`Policy::azure_ad`] rule set.
pub fn evaluate_record(record: &Record) -> Decision {
    evaluate(&AZURE_AD_POLICY, record).decision
}

/// Returns the built-in policy shared by [`evaluate_record`] and the processor.
pub fn builtin_policy() -> &'static Policy {
    &AZURE_AD_POLICY
}

// ============================================================================
// Condition Evaluation
// ============================================================================

fn evaluate_condition(condition: &Condition, record: &Record) -> bool {
    match condition {
        Condition::Equals { attribute, value } => record.get(attribute) == value.as_str(),
        Condition::Contains { attribute, value } => record.get(attribute).contains(value.as_str()),
        Condition::EndsWith { attribute, value } => record.get(attribute).ends_with(value.as_str()),
        Condition::Not(sub) => !evaluate_condition(sub, record),
    }
}

// ============================================================================
// Tests
// ============================================================================

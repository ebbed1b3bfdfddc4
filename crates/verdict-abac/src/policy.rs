//! Authorization policy definitions.
//!
//! A policy is an ordered list of rules. Each rule carries conditions that
//! must all hold for it to match and the decision it produces. Rules are
//! evaluated in list order and the first matching rule determines the
//! outcome; when none matches, the policy's default decision applies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{AUTHENTICATED, DEPARTMENT, EMAIL, GROUPS, ROLE};

// ============================================================================
// Decision
// ============================================================================

/// The verdict for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Grant access.
    Authorized,
    /// Deny access.
    Unauthorized,
}

impl Decision {
    /// The literal text written to the output stream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Unauthorized => "unauthorized",
        }
    }

    pub fn is_authorized(self) -> bool {
        self == Self::Authorized
    }
}

impl Default for Decision {
    /// Defaults to `Unauthorized` (fail closed).
    fn default() -> Self {
        Self::Unauthorized
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Condition
// ============================================================================

/// A predicate over one attribute of a record.
///
/// Comparisons are case-sensitive and operate on the coerced text; an absent
/// attribute compares as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Attribute text must equal the value exactly.
    Equals { attribute: String, value: String },
    /// Attribute text must contain the value as a substring.
    Contains { attribute: String, value: String },
    /// Attribute text must end with the value.
    EndsWith { attribute: String, value: String },
    /// The sub-condition must be false.
    Not(Box<Condition>),
}

impl Condition {
    pub fn equals(attribute: &str, value: &str) -> Self {
        Self::Equals {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn contains(attribute: &str, value: &str) -> Self {
        Self::Contains {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn ends_with(attribute: &str, value: &str) -> Self {
        Self::EndsWith {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn not(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }
}

// ============================================================================
// Rule
// ============================================================================

/// A single rule within a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable name, reported with every decision it produces.
    pub name: String,
    /// The decision when this rule matches.
    pub decision: Decision,
    /// All conditions must be true for this rule to match.
    pub conditions: Vec<Condition>,
}

impl Rule {
    /// A rule producing `Authorized` when all conditions hold.
    pub fn allow(name: &str, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.to_string(),
            decision: Decision::Authorized,
            conditions,
        }
    }

    /// A rule producing `Unauthorized` when all conditions hold.
    pub fn deny(name: &str, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.to_string(),
            decision: Decision::Unauthorized,
            conditions,
        }
    }
}

// ============================================================================
// Policy
// ============================================================================

/// An ordered, first-match-wins rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
    /// Decision applied when no rule matches. Defaults to `Unauthorized`.
    pub default_decision: Decision,
}

impl Policy {
    /// Creates an empty policy with the specified default decision.
    pub fn new(default_decision: Decision) -> Self {
        Self {
            rules: Vec::new(),
            default_decision,
        }
    }

    /// Appends a rule after all existing rules (builder pattern).
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the built-in policy for Azure AD identity attributes.
    ///
    /// Rules, in order:
    /// 1. Unauthenticated callers are denied (`azure.authenticated` is not `"true"`)
    /// 2. The `admin` role is allowed
    /// 3. `Engineering` department members in a `developers` group are allowed
    /// 4. `user` role holders with an `@example.com` email are allowed
    ///
    /// Everything else is denied.
    pub fn azure_ad() -> Self {
        Self::new(Decision::Unauthorized)
            .with_rule(Rule::deny(
                "require-authentication",
                vec![Condition::not(Condition::equals(AUTHENTICATED, "true"))],
            ))
            .with_rule(Rule::allow(
                "admin-role",
                vec![Condition::equals(ROLE, "admin")],
            ))
            .with_rule(Rule::allow(
                "engineering-developers",
                vec![
                    Condition::equals(DEPARTMENT, "Engineering"),
                    Condition::contains(GROUPS, "developers"),
                ],
            ))
            .with_rule(Rule::allow(
                "example-com-users",
                vec![
                    Condition::ends_with(EMAIL, "@example.com"),
                    Condition::equals(ROLE, "user"),
                ],
            ))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Kani proofs for policy evaluation
//!
//! Bounded model checking of the built-in policy's key guarantees.
//!
//! Run with: `cargo kani --tests --harness verify_*`

#[cfg(kani)]
use crate::attributes::{AUTHENTICATED, EMAIL, ROLE, Record};
#[cfg(kani)]
use crate::evaluator::{self, builtin_policy};
#[cfg(kani)]
use crate::policy::Decision;

/// Proof: Evaluation determinism
///
/// **Property**: Same record always produces the same evaluation
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(16)]
fn verify_evaluation_determinism() {
    let record = Record::new()
        .with(AUTHENTICATED, "true")
        .with(ROLE, "user")
        .with(EMAIL, "joe@example.com");

    let first = evaluator::evaluate(builtin_policy(), &record);
    let second = evaluator::evaluate(builtin_policy(), &record);

    assert_eq!(first.decision, second.decision);
    assert_eq!(first.matched_rule, second.matched_rule);
}

/// Proof: Unauthenticated short-circuit
///
/// **Property**: Whatever the role, a record without `azure.authenticated`
/// = "true" is denied by the authentication rule
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(16)]
fn verify_unauthenticated_denied() {
    let admin: bool = kani::any();
    let role = if admin { "admin" } else { "user" };
    let record = Record::new()
        .with(AUTHENTICATED, "false")
        .with(ROLE, role)
        .with(EMAIL, "joe@example.com");

    let evaluation = evaluator::evaluate(builtin_policy(), &record);

    assert_eq!(evaluation.decision, Decision::Unauthorized);
    assert_eq!(
        evaluation.matched_rule.as_deref(),
        Some("require-authentication")
    );
}

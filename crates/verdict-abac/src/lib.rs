//! # verdict-abac: Attribute-Based Authorization Decisions
//!
//! Reads identity attribute records, one JSON object per line, and answers
//! each with `authorized` or `unauthorized` under a fixed rule set.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Input Line                                  │
//! │  {"azure.authenticated":"true", ...}         │
//! └─────────────────┬───────────────────────────┘
//!                   │  trim, parse, coerce to text
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Record                                      │
//! │  attribute name -> text ("" when absent)     │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Evaluator                                   │
//! │  ├─ Walk rules in order                      │
//! │  ├─ First rule whose conditions hold wins    │
//! │  └─ Otherwise the default (unauthorized)     │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision: authorized | unauthorized         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Lines that are not JSON objects are answered `unauthorized` and reported
//! on the error stream; processing continues with the next line.
//!
//! ## Built-in Policy
//!
//! 1. Deny unless `azure.authenticated` is exactly `"true"`
//! 2. Allow `azure.role` = `"admin"`
//! 3. Allow `azure.department` = `"Engineering"` with `"developers"` in `azure.groups`
//! 4. Allow `azure.role` = `"user"` with `azure.email` ending in `"@example.com"`
//! 5. Deny everything else
//!
//! ## Examples
//!
//! ```
//! use std::io::Cursor;
//! use verdict_abac::processor;
//!
//! let input = Cursor::new(concat!(
//!     "{\"azure.authenticated\":\"true\",\"azure.role\":\"admin\"}\n",
//!     "not json\n",
//! ));
//! let mut output = Vec::new();
//! let mut errors = Vec::new();
//!
//! let summary = processor::run(input, &mut output, &mut errors).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "authorized\nunauthorized\n");
//! assert!(String::from_utf8(errors).unwrap().starts_with("Error parsing JSON:"));
//! assert_eq!(summary.rejected, 1);
//! ```

pub mod attributes;
pub mod error;
pub mod evaluator;
pub mod policy;
pub mod processor;

// Kani proofs for bounded model checking
#[cfg(any(test, kani))]
mod kani_proofs;

pub use attributes::{Record, coerce_value};
pub use error::{ParseError, StreamError};
pub use evaluator::{Evaluation, evaluate, evaluate_record};
pub use policy::{Condition, Decision, Policy, Rule};
pub use processor::{LineOutcome, RunSummary, process_line, run};

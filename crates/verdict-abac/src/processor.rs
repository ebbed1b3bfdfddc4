//! Line-oriented decision processing.
//!
//! Each input line is handled independently: trimmed, parsed into a
//! [`Record`], evaluated, and answered with one decision line. A line that
//! cannot be parsed is answered `unauthorized` with a diagnostic on the error
//! stream; only a failure of the streams themselves stops the run.

use std::io::{self, BufRead, Write};

use tracing::{debug, trace};

use crate::attributes::Record;
use crate::error::{ParseError, Result, StreamError};
use crate::evaluator::{Evaluation, builtin_policy, evaluate};
use crate::policy::{Decision, Policy};

/// Prefix of the diagnostic written for every rejected line.
pub const PARSE_ERROR_PREFIX: &str = "Error parsing JSON:";

// ============================================================================
// Line Outcome
// ============================================================================

/// What became of a single input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Empty after trimming; produces no output.
    Blank,
    /// Parsed and evaluated against the policy.
    Evaluated(Evaluation),
    /// Could not be parsed; decided `unauthorized`.
    Rejected(ParseError),
}

impl LineOutcome {
    /// The decision to emit, or `None` for a blank line.
    pub fn decision(&self) -> Option<Decision> {
        match self {
            Self::Blank => None,
            Self::Evaluated(evaluation) => Some(evaluation.decision),
            Self::Rejected(_) => Some(Decision::Unauthorized),
        }
    }

    /// The parse failure, if the line was rejected.
    pub fn error(&self) -> Option<&ParseError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Processes one line against the built-in policy.
pub fn process_line(raw: &str) -> LineOutcome {
    process_line_with(builtin_policy(), raw)
}

/// Processes one line against the given policy.
pub fn process_line_with(policy: &Policy, raw: &str) -> LineOutcome {
    let line = raw.trim();
    if line.is_empty() {
        return LineOutcome::Blank;
    }

    match Record::from_json_line(line) {
        Ok(record) => LineOutcome::Evaluated(evaluate(policy, &record)),
        Err(err) => LineOutcome::Rejected(err),
    }
}

/// Processes one raw line of bytes, rejecting it if it is not UTF-8.
pub fn process_bytes_with(policy: &Policy, raw: &[u8]) -> LineOutcome {
    match std::str::from_utf8(raw) {
        Ok(line) => process_line_with(policy, line),
        Err(err) => LineOutcome::Rejected(ParseError::from(err)),
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Lazily yields raw lines from a reader, without the trailing `\n`.
///
/// The final line is yielded even when the input does not end in a newline.
/// After the first read error the iterator is exhausted.
pub struct RecordLines<R> {
    reader: R,
    finished: bool,
}

impl<R: BufRead> RecordLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordLines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

// ============================================================================
// Run
// ============================================================================

/// Counters for one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines answered with a decision.
    pub records: u64,
    pub authorized: u64,
    pub unauthorized: u64,
    /// Lines that failed to parse (counted in `unauthorized` too).
    pub rejected: u64,
    /// Lines skipped because they were empty after trimming.
    pub blank: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &LineOutcome) {
        match outcome.decision() {
            None => self.blank += 1,
            Some(decision) => {
                self.records += 1;
                match decision {
                    Decision::Authorized => self.authorized += 1,
                    Decision::Unauthorized => self.unauthorized += 1,
                }
                if outcome.error().is_some() {
                    self.rejected += 1;
                }
            }
        }
    }
}

/// Processes every line of `input` against the built-in policy.
///
/// See [`run_with_policy`].
pub fn run<R, W, E>(input: R, output: W, errors: E) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_policy(builtin_policy(), input, output, errors)
}

/// Processes every line of `input`, writing one decision per non-blank line.
///
/// For a rejected line the diagnostic goes to `errors` before the decision
/// goes to `output`. Both streams are flushed before the next line is read.
///
/// Returns the run counters at end of input. A read or write failure on the
/// streams is reported on `errors` (best effort) and returned as
/// [`StreamError`].
pub fn run_with_policy<R, W, E>(
    policy: &Policy,
    input: R,
    mut output: W,
    mut errors: E,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = RunSummary::default();

    for (index, line) in RecordLines::new(input).enumerate() {
        let line_number = index + 1;
        let raw = line.map_err(|err| fail(&mut errors, StreamError::Read(err)))?;

        let outcome = process_bytes_with(policy, &raw);
        summary.record(&outcome);

        let decision = match &outcome {
            LineOutcome::Blank => {
                trace!(line = line_number, "skipping blank line");
                continue;
            }
            LineOutcome::Evaluated(evaluation) => {
                debug!(
                    line = line_number,
                    decision = %evaluation.decision,
                    rule = evaluation.matched_rule.as_deref().unwrap_or("<default>"),
                    reason = %evaluation.reason,
                    "record evaluated"
                );
                evaluation.decision
            }
            LineOutcome::Rejected(err) => {
                debug!(line = line_number, error = %err, "record rejected");
                writeln!(errors, "{PARSE_ERROR_PREFIX} {err}")
                    .and_then(|()| errors.flush())
                    .map_err(StreamError::Diagnostic)?;
                Decision::Unauthorized
            }
        };

        writeln!(output, "{decision}")
            .and_then(|()| output.flush())
            .map_err(|err| fail(&mut errors, StreamError::Write(err)))?;
    }

    debug!(
        records = summary.records,
        authorized = summary.authorized,
        unauthorized = summary.unauthorized,
        rejected = summary.rejected,
        blank = summary.blank,
        "end of input"
    );

    Ok(summary)
}

/// Reports a fatal stream failure on the error stream and hands it back.
fn fail<E: Write>(errors: &mut E, err: StreamError) -> StreamError {
    debug!(error = %err, "stream failure");
    // The error stream may be the one that failed; nothing more can be done.
    let _ = writeln!(errors, "{err}");
    let _ = errors.flush();
    err
}

// ============================================================================
// Tests
// ============================================================================

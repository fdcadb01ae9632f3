//! Per-assertion verification outcomes and the aggregate report.

use clinicgate_client::ClientError;
use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// What happened to a single assertion.
///
/// A `Mismatch` is a policy verification failure: the service answered, but
/// not with the documented expectation. An `Error` is a decision-service
/// failure: the query itself could not be answered. The two are first-class
/// and never conflated.
#[derive(Debug)]
pub enum AssertionOutcome {
    Pass,
    MismatchedDecision {
        expected: bool,
        actual: bool,
    },
    MissingObject {
        expected: String,
        actual: BTreeSet<String>,
    },
    Error(ClientError),
}

impl AssertionOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, AssertionOutcome::Pass)
    }
}

impl Display for AssertionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionOutcome::Pass => write!(f, "pass"),
            AssertionOutcome::MismatchedDecision { expected, actual } => {
                write!(f, "mismatch: expected {expected}, service decided {actual}")
            }
            AssertionOutcome::MissingObject { expected, actual } => {
                write!(f, "mismatch: {expected} not in result set {actual:?}")
            }
            AssertionOutcome::Error(e) => write!(f, "query failed: {e}"),
        }
    }
}

/// One executed assertion: the query, its intent, and what came back.
#[derive(Debug)]
pub struct AssertionResult {
    /// The documented intent, from the verification plan.
    pub label: &'static str,
    /// Human-readable form of the query that was issued.
    pub query: String,
    pub outcome: AssertionOutcome,
}

/// The aggregate result of the verification stage.
#[derive(Debug, Default)]
pub struct VerificationReport {
    pub results: Vec<AssertionResult>,
}

impl VerificationReport {
    /// True when every assertion passed.
    pub fn verified(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.outcome.is_pass())
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn mismatched(&self) -> usize {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    AssertionOutcome::MismatchedDecision { .. }
                        | AssertionOutcome::MissingObject { .. }
                )
            })
            .count()
    }

    pub fn errored(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, AssertionOutcome::Error(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &'static str, outcome: AssertionOutcome) -> AssertionResult {
        AssertionResult {
            label,
            query: String::new(),
            outcome,
        }
    }

    #[test]
    fn empty_report_is_not_verified() {
        assert!(!VerificationReport::default().verified());
    }

    #[test]
    fn mismatch_and_error_are_counted_separately() {
        let report = VerificationReport {
            results: vec![
                result("a", AssertionOutcome::Pass),
                result(
                    "b",
                    AssertionOutcome::MismatchedDecision {
                        expected: true,
                        actual: false,
                    },
                ),
                result(
                    "c",
                    AssertionOutcome::Error(ClientError::MalformedResponse {
                        operation: "check",
                        reason: "truncated".to_string(),
                    }),
                ),
            ],
        };
        assert!(!report.verified());
        assert_eq!(report.passed(), 1);
        assert_eq!(report.mismatched(), 1);
        assert_eq!(report.errored(), 1);
    }
}

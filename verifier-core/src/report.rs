//! Structured diagnostic events, separate from the text/JSON renderers.
//!
//! The reference Python implementation prints failures as it finds them;
//! here every verifier returns data (a [`Report`]) and rendering to stderr
//! or a machine-readable JSON summary is a caller concern layered on top.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::FailureKind;

/// One verification failure, naming the offending object.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub location: String,
}

/// The accumulated result of a verification run: every failure found,
/// collected rather than short-circuited (unless `--fail-fast` was given).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    pub fn push(&mut self, kind: FailureKind, location: impl Into<String>) {
        self.failures.push(Failure {
            kind,
            location: location.into(),
        });
    }

    /// Absorbs another report's failures into this one.
    pub fn merge(&mut self, other: Report) {
        self.failures.extend(other.failures);
    }

    /// True iff no failures were recorded.
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// The first `max` failures, in the order they were recorded.
    pub fn first_n(&self, max: usize) -> &[Failure] {
        &self.failures[..self.failures.len().min(max)]
    }

    /// Counts failures by their [`FailureKind`] discriminant, for a summary line.
    pub fn counts_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for f in &self.failures {
            *counts.entry(kind_name(&f.kind)).or_insert(0) += 1;
        }
        counts
    }

    /// Renders a human-readable summary to a string, honoring `max_failures`
    /// as a cap on how many offending locations are printed in detail.
    pub fn render_text(&self, max_failures: usize) -> String {
        let mut out = String::new();
        if self.ok() {
            out.push_str("PASS: all checks succeeded\n");
            return out;
        }

        out.push_str(&format!("FAIL: {} check(s) failed\n", self.failures.len()));
        for (kind, count) in self.counts_by_kind() {
            out.push_str(&format!("  {kind}: {count}\n"));
        }
        for f in self.first_n(max_failures) {
            out.push_str(&format!("  {} at {}\n", f.kind, f.location));
        }
        if self.failures.len() > max_failures {
            out.push_str(&format!(
                "  ... and {} more\n",
                self.failures.len() - max_failures
            ));
        }
        out
    }

    /// The machine-readable summary from spec §6: `{ "ok": bool, "failures": [...] }`.
    pub fn to_summary_json(&self, max_failures: usize) -> serde_json::Value {
        serde_json::json!({
            "ok": self.ok(),
            "failures": self.first_n(max_failures),
        })
    }
}

fn kind_name(kind: &FailureKind) -> &'static str {
    match kind {
        FailureKind::ParameterError(_) => "ParameterError",
        FailureKind::MembershipError(_) => "MembershipError",
        FailureKind::ChallengeMismatch(_) => "ChallengeMismatch",
        FailureKind::EquationFailure(_) => "EquationFailure",
        FailureKind::PlaceholderCountError(_) => "PlaceholderCountError",
        FailureKind::AggregationMismatch(_) => "AggregationMismatch",
        FailureKind::MissingShare(_) => "MissingShare",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        let r = Report::new();
        assert!(r.ok());
        assert_eq!(r.render_text(50), "PASS: all checks succeeded\n");
    }

    #[test]
    fn failures_are_capped_in_text_rendering() {
        let mut r = Report::new();
        for i in 0..5 {
            r.push(FailureKind::EquationFailure("E1".to_string()), format!("s{i}"));
        }
        let text = r.render_text(2);
        assert!(text.contains("5 check(s) failed"));
        assert!(text.contains("... and 3 more"));
    }

    #[test]
    fn merge_combines_failures() {
        let mut a = Report::new();
        a.push(FailureKind::MembershipError("x".to_string()), "a");
        let mut b = Report::new();
        b.push(FailureKind::MembershipError("y".to_string()), "b");
        a.merge(b);
        assert_eq!(a.len(), 2);
    }
}

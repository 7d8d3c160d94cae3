use std::collections::BTreeSet;
use std::fmt::Display;

use crate::expectation::{InputIndex, PatIndex, Pattern};
use crate::matcher::Match;
use crate::value::Value;

/// Why the expectations registered under a name did not accept an invocation.
#[derive(Clone, Debug)]
pub struct Mismatches {
    candidates: usize,
    mismatches: Vec<(PatIndex, Mismatch)>,
}

#[derive(Clone, Debug)]
pub(crate) enum Mismatch {
    Arity {
        expected: usize,
        actual: usize,
    },
    Input {
        input_index: InputIndex,
        kind: MismatchKind,
        actual: String,
        expected: String,
    },
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum MismatchKind {
    /// An equality matcher saw a different value.
    Eq,
    /// Any other matcher rejected the value.
    Predicate,
}

impl Mismatches {
    /// Explain, for each candidate pattern of the invoked operation, why it rejected `args`.
    pub(crate) fn collect(patterns: &[Pattern], args: &[Value]) -> Self {
        let mut mismatches = vec![];

        for pattern in patterns {
            let pat_index = pattern.pat_index;

            if pattern.matchers.len() != args.len() {
                mismatches.push((
                    pat_index,
                    Mismatch::Arity {
                        expected: pattern.matchers.len(),
                        actual: args.len(),
                    },
                ));
                continue;
            }

            for (input_index, (matcher, actual)) in
                pattern.matchers.iter().zip(args).enumerate()
            {
                if matcher.matches(actual) {
                    continue;
                }
                let (kind, expected) = match matcher.expected_value() {
                    Some(expected) => (MismatchKind::Eq, expected.to_string()),
                    None => (MismatchKind::Predicate, format!("{matcher:?}")),
                };
                mismatches.push((
                    pat_index,
                    Mismatch::Input {
                        input_index: InputIndex(input_index),
                        kind,
                        actual: actual.to_string(),
                        expected,
                    },
                ));
            }
        }

        Self {
            candidates: patterns.len(),
            mismatches,
        }
    }

    fn has_unique_pat_index(&self) -> bool {
        let pat_indexes: BTreeSet<usize> = self
            .mismatches
            .iter()
            .map(|(pat_index, _)| pat_index.0)
            .collect();

        pat_indexes.len() <= 1
    }
}

impl Display for Mismatches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.candidates == 0 {
            return write!(f, " No expectations are registered under that name.");
        }

        writeln!(f)?;

        let is_unique_pat = self.has_unique_pat_index();

        for (pat_index, mismatch) in &self.mismatches {
            match mismatch {
                Mismatch::Arity { expected, actual } => {
                    writeln!(
                        f,
                        "Arity mismatch for expectation {pat_index}: expected {expected} inputs, got {actual}."
                    )?;
                }
                Mismatch::Input {
                    input_index,
                    kind: MismatchKind::Eq,
                    actual,
                    expected,
                } => {
                    MismatchMsg::new(*pat_index, *input_index, is_unique_pat, "Equality").fmt(f)?;
                    writeln!(f, " (actual / expected):")?;
                    Diff::new(actual, expected).fmt(f)?;
                }
                Mismatch::Input {
                    input_index,
                    kind: MismatchKind::Predicate,
                    actual,
                    expected,
                } => {
                    MismatchMsg::new(*pat_index, *input_index, is_unique_pat, "Predicate").fmt(f)?;
                    writeln!(f, ": {actual} did not match {expected}.")?;
                }
            }
        }

        Ok(())
    }
}

struct MismatchMsg {
    pat_index: PatIndex,
    input_index: InputIndex,
    is_unique_pat: bool,
    kind: &'static str,
}

impl MismatchMsg {
    fn new(
        pat_index: PatIndex,
        input_index: InputIndex,
        is_unique_pat: bool,
        kind: &'static str,
    ) -> Self {
        Self {
            pat_index,
            input_index,
            is_unique_pat,
            kind,
        }
    }
}

impl Display for MismatchMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mismatch for ", self.kind)?;

        if self.is_unique_pat {
            write!(f, "input #{}", self.input_index.0)
        } else {
            write!(
                f,
                "expectation {}, input #{}",
                self.pat_index, self.input_index.0
            )
        }
    }
}

struct Diff<'s> {
    actual: &'s str,
    expected: &'s str,
}

impl<'s> Diff<'s> {
    fn new(actual: &'s impl AsRef<str>, expected: &'s impl AsRef<str>) -> Self {
        Self {
            actual: actual.as_ref(),
            expected: expected.as_ref(),
        }
    }
}

impl<'s> Display for Diff<'s> {
    #[cfg(feature = "pretty-print")]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let comparison = pretty_assertions::StrComparison::new(self.actual, self.expected);
        write!(f, "{comparison}")
    }

    #[cfg(not(feature = "pretty-print"))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  actual: {}", self.actual)?;
        writeln!(f, "expected: {}", self.expected)
    }
}
